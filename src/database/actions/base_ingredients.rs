use sqlx::{Pool, Postgres};

use crate::{error::CatalogError, schema::BaseIngredient};

pub async fn list_base_ingredients(
    pool: &Pool<Postgres>,
) -> Result<Vec<BaseIngredient>, CatalogError> {
    let rows: Vec<BaseIngredient> = sqlx::query_as(
        "SELECT id, name, image_url, unit, price FROM base_ingredients ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn insert_base_ingredient(
    ingredient: &BaseIngredient,
    pool: &Pool<Postgres>,
) -> Result<BaseIngredient, CatalogError> {
    let row: BaseIngredient = sqlx::query_as(
        "
        INSERT INTO base_ingredients (id, name, image_url, unit, price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, image_url, unit, price
    ",
    )
    .bind(ingredient.id)
    .bind(&ingredient.name)
    .bind(&ingredient.image_url)
    .bind(&ingredient.unit)
    .bind(ingredient.price)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update_base_ingredient(
    ingredient: &BaseIngredient,
    pool: &Pool<Postgres>,
) -> Result<Option<BaseIngredient>, CatalogError> {
    let row: Option<BaseIngredient> = sqlx::query_as(
        "
        UPDATE base_ingredients
        SET name = $1, image_url = $2, unit = $3, price = $4
        WHERE id = $5
        RETURNING id, name, image_url, unit, price
    ",
    )
    .bind(&ingredient.name)
    .bind(&ingredient.image_url)
    .bind(&ingredient.unit)
    .bind(ingredient.price)
    .bind(ingredient.id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
