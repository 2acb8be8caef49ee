//! Usage guard: the restrict-on-delete rule for entities referenced from a
//! recipe's ingredient document.
//!
//! A base ingredient may only be deleted when no recipe lists it with
//! `is_recipe = false`; a recipe only when no other recipe lists it with
//! `is_recipe = true`. Backends answer the containment question and perform
//! the delete atomically, then hand back a [`Removal`].

use crate::constants::{
    BASE_INGREDIENT_IN_USE, BASE_INGREDIENT_NOT_FOUND, RECIPE_IN_USE, RECIPE_NOT_FOUND,
};
use crate::database::{error::CatalogError, schema::ItemRef};

/// Outcome of a guarded delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    /// Refused; the record is untouched
    InUse { references: i64 },
    Missing,
}

impl Removal {
    /// Decides the outcome from the reference count and whether a row was deleted.
    pub fn decide(references: i64, deleted: bool) -> Self {
        if references > 0 {
            Removal::InUse { references }
        } else if deleted {
            Removal::Deleted
        } else {
            Removal::Missing
        }
    }

    pub fn into_result(self, target: ItemRef) -> Result<(), CatalogError> {
        match self {
            Removal::Deleted => {
                log::info!("Deleted {}", describe(target));
                Ok(())
            }
            Removal::InUse { references } => {
                log::warn!(
                    "Refused to delete {}: referenced by {references} recipe(s)",
                    describe(target)
                );
                Err(CatalogError::conflict(in_use_message(target)))
            }
            Removal::Missing => Err(CatalogError::not_found(not_found_message(target))),
        }
    }
}

pub fn in_use_message(target: ItemRef) -> &'static str {
    match target {
        ItemRef::BaseIngredient(_) => BASE_INGREDIENT_IN_USE,
        ItemRef::Recipe(_) => RECIPE_IN_USE,
    }
}

pub fn not_found_message(target: ItemRef) -> &'static str {
    match target {
        ItemRef::BaseIngredient(_) => BASE_INGREDIENT_NOT_FOUND,
        ItemRef::Recipe(_) => RECIPE_NOT_FOUND,
    }
}

fn describe(target: ItemRef) -> String {
    match target {
        ItemRef::BaseIngredient(id) => format!("base ingredient {id}"),
        ItemRef::Recipe(id) => format!("recipe {id}"),
    }
}
