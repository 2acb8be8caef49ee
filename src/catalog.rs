use uuid::Uuid;

use crate::{
    constants::BASE_INGREDIENT_NOT_FOUND,
    database::{
        error::CatalogError,
        form::{BaseIngredientDraft, Form},
        schema::{BaseIngredient, ItemRef},
        store::SharedStore,
    },
};

/// Owns base ingredients, the leaves of every recipe.
#[derive(Clone)]
pub struct IngredientCatalog {
    store: SharedStore,
}

impl IngredientCatalog {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<BaseIngredient>, CatalogError> {
        self.store.list_base_ingredients().await
    }

    pub async fn create(&self, form: &Form) -> Result<BaseIngredient, CatalogError> {
        let draft = BaseIngredientDraft::try_from(form)?;
        let created = self
            .store
            .insert_base_ingredient(&draft.into_record(Uuid::new_v4()))
            .await?;

        log::info!("Created base ingredient {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, form: &Form) -> Result<BaseIngredient, CatalogError> {
        let draft = BaseIngredientDraft::try_from(form)?;
        let updated = self
            .store
            .update_base_ingredient(&draft.into_record(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(BASE_INGREDIENT_NOT_FOUND))?;

        log::info!("Updated base ingredient {id}");
        Ok(updated)
    }

    /// Refused with `Conflict` while any recipe lists this ingredient.
    pub async fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        let target = ItemRef::BaseIngredient(id);
        self.store.remove(target).await?.into_result(target)
    }
}
