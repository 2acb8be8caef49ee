use std::sync::Arc;

use async_trait::async_trait;

use super::error::CatalogError;
use super::schema::{BaseIngredient, ItemRef, Recipe};
use crate::integrity::Removal;

pub type SharedStore = Arc<dyn Store>;

/// Storage backend shared by the catalog and the registry.
///
/// Name uniqueness is enforced here and reported as `CatalogError::Conflict`.
/// `remove` must run the usage guard and the delete as one atomic step; a
/// recipe's references to itself do not count against it.
#[async_trait]
pub trait Store: Send + Sync {
    /// All base ingredients, ordered by name
    async fn list_base_ingredients(&self) -> Result<Vec<BaseIngredient>, CatalogError>;

    async fn insert_base_ingredient(
        &self,
        ingredient: &BaseIngredient,
    ) -> Result<BaseIngredient, CatalogError>;

    /// Overwrites every mutable field; `None` when the id does not exist
    async fn update_base_ingredient(
        &self,
        ingredient: &BaseIngredient,
    ) -> Result<Option<BaseIngredient>, CatalogError>;

    /// All recipes, ordered by name
    async fn list_recipes(&self) -> Result<Vec<Recipe>, CatalogError>;

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<Recipe, CatalogError>;

    /// Replaces the whole record, ingredient list included
    async fn update_recipe(&self, recipe: &Recipe) -> Result<Option<Recipe>, CatalogError>;

    /// Deletes `target` unless some other recipe still references it
    async fn remove(&self, target: ItemRef) -> Result<Removal, CatalogError>;
}
