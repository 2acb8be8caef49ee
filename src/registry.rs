use uuid::Uuid;

use crate::{
    constants::RECIPE_NOT_FOUND,
    database::{
        error::CatalogError,
        form::{Form, RecipeDraft},
        schema::{ItemRef, Recipe},
        store::SharedStore,
    },
};

/// Owns recipes and their ingredient lists.
///
/// Ingredient references are stored as given: an `item_id` that does not
/// resolve to an existing record of the tagged kind is accepted.
#[derive(Clone)]
pub struct RecipeRegistry {
    store: SharedStore,
}

impl RecipeRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, CatalogError> {
        self.store.list_recipes().await
    }

    pub async fn create(&self, form: &Form) -> Result<Recipe, CatalogError> {
        let draft = RecipeDraft::try_from(form)?;
        let created = self
            .store
            .insert_recipe(&draft.into_record(Uuid::new_v4()))
            .await?;

        log::info!(
            "Created recipe {} ({}) with {} ingredient(s)",
            created.id,
            created.name,
            created.ingredients.len()
        );
        Ok(created)
    }

    /// Replaces the whole record; the previous ingredient list is discarded.
    pub async fn update(&self, id: Uuid, form: &Form) -> Result<Recipe, CatalogError> {
        let draft = RecipeDraft::try_from(form)?;
        let updated = self
            .store
            .update_recipe(&draft.into_record(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(RECIPE_NOT_FOUND))?;

        log::info!("Updated recipe {id}");
        Ok(updated)
    }

    /// Refused with `Conflict` while another recipe uses this one as an ingredient.
    pub async fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        let target = ItemRef::Recipe(id);
        self.store.remove(target).await?.into_result(target)
    }
}
