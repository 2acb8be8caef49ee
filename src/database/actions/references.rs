use sqlx::{types::Json, Executor, Pool, Postgres};

use crate::{
    constants::{BASE_INGREDIENTS_TABLE, RECIPES_TABLE},
    error::CatalogError,
    integrity::Removal,
    schema::ItemRef,
};

fn table_of(target: ItemRef) -> &'static str {
    match target {
        ItemRef::BaseIngredient(_) => BASE_INGREDIENTS_TABLE,
        ItemRef::Recipe(_) => RECIPES_TABLE,
    }
}

/// Counts recipes whose ingredient document contains `{item_id, is_recipe}` of
/// `target`. Other keys of the element are ignored by `@>`.
pub async fn count_references<'e, E>(target: ItemRef, executor: E) -> Result<i64, CatalogError>
where
    E: Executor<'e, Database = Postgres>,
{
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE ingredients @> $1 AND id <> $2")
            .bind(Json(target.containment_probe()))
            .bind(target.id())
            .fetch_one(executor)
            .await?;

    Ok(count.0)
}

/// Guard and delete in one transaction. The table lock keeps recipe writes
/// from slipping a new reference in between the count and the delete.
pub async fn remove_unreferenced(
    target: ItemRef,
    pool: &Pool<Postgres>,
) -> Result<Removal, CatalogError> {
    let mut tx = pool.begin().await?;

    sqlx::query("LOCK TABLE recipes IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await?;

    let references = count_references(target, &mut *tx).await?;
    if references > 0 {
        tx.rollback().await?;
        return Ok(Removal::decide(references, false));
    }

    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table_of(target)))
        .bind(target.id())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Removal::decide(0, result.rows_affected() > 0))
}
