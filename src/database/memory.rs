use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    error::CatalogError,
    schema::{BaseIngredient, ItemRef, Recipe},
    store::Store,
};
use crate::{constants::NAME_TAKEN, integrity::Removal};

#[derive(Default)]
struct Tables {
    base_ingredients: HashMap<Uuid, BaseIngredient>,
    recipes: HashMap<Uuid, Recipe>,
}

impl Tables {
    fn count_references(&self, target: ItemRef) -> i64 {
        self.recipes
            .values()
            .filter(|recipe| recipe.id != target.id() && recipe.references(&target))
            .count() as i64
    }
}

/// In-process `Store`. Same uniqueness and guard rules as Postgres; the
/// guard and the delete happen under one write lock.
///
/// Lists sort by case-folded name, then byte-wise. Postgres sorts by the
/// database collation, so exotic names may still order differently.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_unique_name<'a, I>(name: &str, id: Uuid, mut existing: I) -> Result<(), CatalogError>
where
    I: Iterator<Item = (&'a Uuid, &'a str)>,
{
    if existing.any(|(other, other_name)| *other != id && other_name == name) {
        return Err(CatalogError::conflict(NAME_TAKEN));
    }
    Ok(())
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_base_ingredients(&self) -> Result<Vec<BaseIngredient>, CatalogError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<BaseIngredient> = tables.base_ingredients.values().cloned().collect();
        rows.sort_by(|a, b| by_name(&a.name, &b.name));
        Ok(rows)
    }

    async fn insert_base_ingredient(
        &self,
        ingredient: &BaseIngredient,
    ) -> Result<BaseIngredient, CatalogError> {
        let mut tables = self.tables.write().await;
        if tables.base_ingredients.contains_key(&ingredient.id) {
            return Err(CatalogError::Internal(format!(
                "duplicate key {}",
                ingredient.id
            )));
        }
        ensure_unique_name(
            &ingredient.name,
            ingredient.id,
            tables
                .base_ingredients
                .iter()
                .map(|(id, row)| (id, row.name.as_str())),
        )?;

        tables
            .base_ingredients
            .insert(ingredient.id, ingredient.clone());
        Ok(ingredient.clone())
    }

    async fn update_base_ingredient(
        &self,
        ingredient: &BaseIngredient,
    ) -> Result<Option<BaseIngredient>, CatalogError> {
        let mut tables = self.tables.write().await;
        if !tables.base_ingredients.contains_key(&ingredient.id) {
            return Ok(None);
        }
        ensure_unique_name(
            &ingredient.name,
            ingredient.id,
            tables
                .base_ingredients
                .iter()
                .map(|(id, row)| (id, row.name.as_str())),
        )?;

        tables
            .base_ingredients
            .insert(ingredient.id, ingredient.clone());
        Ok(Some(ingredient.clone()))
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Recipe> = tables.recipes.values().cloned().collect();
        rows.sort_by(|a, b| by_name(&a.name, &b.name));
        Ok(rows)
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<Recipe, CatalogError> {
        let mut tables = self.tables.write().await;
        if tables.recipes.contains_key(&recipe.id) {
            return Err(CatalogError::Internal(format!("duplicate key {}", recipe.id)));
        }
        ensure_unique_name(
            &recipe.name,
            recipe.id,
            tables.recipes.iter().map(|(id, row)| (id, row.name.as_str())),
        )?;

        tables.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe.clone())
    }

    async fn update_recipe(&self, recipe: &Recipe) -> Result<Option<Recipe>, CatalogError> {
        let mut tables = self.tables.write().await;
        if !tables.recipes.contains_key(&recipe.id) {
            return Ok(None);
        }
        ensure_unique_name(
            &recipe.name,
            recipe.id,
            tables.recipes.iter().map(|(id, row)| (id, row.name.as_str())),
        )?;

        tables.recipes.insert(recipe.id, recipe.clone());
        Ok(Some(recipe.clone()))
    }

    async fn remove(&self, target: ItemRef) -> Result<Removal, CatalogError> {
        let mut tables = self.tables.write().await;

        let references = tables.count_references(target);
        if references > 0 {
            return Ok(Removal::decide(references, false));
        }

        let deleted = match target {
            ItemRef::BaseIngredient(id) => tables.base_ingredients.remove(&id).is_some(),
            ItemRef::Recipe(id) => tables.recipes.remove(&id).is_some(),
        };

        Ok(Removal::decide(0, deleted))
    }
}
