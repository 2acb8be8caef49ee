use serde_json::Value;
use uuid::Uuid;
use warp::{http::StatusCode, reply, Rejection, Reply};

use crate::{
    catalog::IngredientCatalog,
    constants::{BASE_INGREDIENT_NOT_FOUND, RECIPE_NOT_FOUND},
    database::{error::CatalogError, form::Form},
    registry::RecipeRegistry,
};

/// A path id that is not a UUID cannot name any record.
fn parse_id(raw: &str, missing: &str) -> Result<Uuid, CatalogError> {
    Uuid::parse_str(raw).map_err(|_e| CatalogError::not_found(missing))
}

pub async fn list_base_ingredients(catalog: IngredientCatalog) -> Result<impl Reply, Rejection> {
    let rows = catalog.list().await?;
    Ok(reply::json(&rows))
}

pub async fn create_base_ingredient(
    body: Value,
    catalog: IngredientCatalog,
) -> Result<impl Reply, Rejection> {
    let form = Form::from_value(body)?;
    let created = catalog.create(&form).await?;
    Ok(reply::with_status(reply::json(&created), StatusCode::CREATED))
}

pub async fn update_base_ingredient(
    id: String,
    body: Value,
    catalog: IngredientCatalog,
) -> Result<impl Reply, Rejection> {
    let form = Form::from_value(body)?;
    let id = parse_id(&id, BASE_INGREDIENT_NOT_FOUND)?;
    let updated = catalog.update(id, &form).await?;
    Ok(reply::json(&updated))
}

pub async fn delete_base_ingredient(
    id: String,
    catalog: IngredientCatalog,
) -> Result<impl Reply, Rejection> {
    let id = parse_id(&id, BASE_INGREDIENT_NOT_FOUND)?;
    catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_recipes(registry: RecipeRegistry) -> Result<impl Reply, Rejection> {
    let rows = registry.list().await?;
    Ok(reply::json(&rows))
}

pub async fn create_recipe(body: Value, registry: RecipeRegistry) -> Result<impl Reply, Rejection> {
    let form = Form::from_value(body)?;
    let created = registry.create(&form).await?;
    Ok(reply::with_status(reply::json(&created), StatusCode::CREATED))
}

pub async fn update_recipe(
    id: String,
    body: Value,
    registry: RecipeRegistry,
) -> Result<impl Reply, Rejection> {
    let form = Form::from_value(body)?;
    let id = parse_id(&id, RECIPE_NOT_FOUND)?;
    let updated = registry.update(id, &form).await?;
    Ok(reply::json(&updated))
}

pub async fn delete_recipe(id: String, registry: RecipeRegistry) -> Result<impl Reply, Rejection> {
    let id = parse_id(&id, RECIPE_NOT_FOUND)?;
    registry.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
