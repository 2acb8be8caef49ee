use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::CatalogError,
    schema::{Recipe, RecipeRow},
};

pub async fn list_recipes(pool: &Pool<Postgres>) -> Result<Vec<Recipe>, CatalogError> {
    let rows: Vec<RecipeRow> = sqlx::query_as(
        "SELECT id, name, image_url, prep_time, unit_price, ingredients FROM recipes ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Recipe::from).collect())
}

pub async fn insert_recipe(recipe: &Recipe, pool: &Pool<Postgres>) -> Result<Recipe, CatalogError> {
    let row: RecipeRow = sqlx::query_as(
        "
        INSERT INTO recipes (id, name, image_url, prep_time, unit_price, ingredients)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, image_url, prep_time, unit_price, ingredients
    ",
    )
    .bind(recipe.id)
    .bind(&recipe.name)
    .bind(&recipe.image_url)
    .bind(&recipe.prep_time)
    .bind(recipe.unit_price)
    .bind(Json(&recipe.ingredients))
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// The ingredient document is overwritten as a whole, never merged.
pub async fn update_recipe(
    recipe: &Recipe,
    pool: &Pool<Postgres>,
) -> Result<Option<Recipe>, CatalogError> {
    let row: Option<RecipeRow> = sqlx::query_as(
        "
        UPDATE recipes
        SET name = $1, image_url = $2, prep_time = $3, unit_price = $4, ingredients = $5
        WHERE id = $6
        RETURNING id, name, image_url, prep_time, unit_price, ingredients
    ",
    )
    .bind(&recipe.name)
    .bind(&recipe.image_url)
    .bind(&recipe.prep_time)
    .bind(recipe.unit_price)
    .bind(Json(&recipe.ingredients))
    .bind(recipe.id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Recipe::from))
}
