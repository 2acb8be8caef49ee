use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Pool, Postgres,
};

use super::{
    actions,
    error::CatalogError,
    schema::{BaseIngredient, ItemRef, Recipe},
    store::Store,
};
use crate::{config::DatabaseConfig, integrity::Removal};

/// Builds the shared connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<Postgres>, sqlx::Error> {
    let options = match &config.url {
        Some(url) => url.parse::<PgConnectOptions>()?,
        None => {
            let mut options = PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .database(&config.name)
                .username(&config.user);
            if let Some(password) = &config.password {
                options = options.password(password);
            }
            options
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    log::info!(
        "Connected to database (max {} connections)",
        config.max_connections
    );

    Ok(pool)
}

/// Idempotent schema bootstrap.
pub async fn create_tables(pool: &Pool<Postgres>) -> Result<(), CatalogError> {
    sqlx::query(
        "
        CREATE TABLE IF NOT EXISTS base_ingredients (
            id UUID PRIMARY KEY,
            name VARCHAR(255) UNIQUE NOT NULL,
            image_url VARCHAR(255),
            unit VARCHAR(50),
            price NUMERIC(10, 2)
        );
    ",
    )
    .execute(pool)
    .await?;
    log::info!("Table base_ingredients ready");

    sqlx::query(
        "
        CREATE TABLE IF NOT EXISTS recipes (
            id UUID PRIMARY KEY,
            name VARCHAR(255) UNIQUE NOT NULL,
            image_url VARCHAR(255),
            prep_time VARCHAR(50),
            unit_price NUMERIC(10, 2),
            ingredients JSONB NOT NULL
        );
    ",
    )
    .execute(pool)
    .await?;
    log::info!("Table recipes ready");

    Ok(())
}

/// `Store` over a Postgres pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_base_ingredients(&self) -> Result<Vec<BaseIngredient>, CatalogError> {
        actions::list_base_ingredients(&self.pool).await
    }

    async fn insert_base_ingredient(
        &self,
        ingredient: &BaseIngredient,
    ) -> Result<BaseIngredient, CatalogError> {
        actions::insert_base_ingredient(ingredient, &self.pool).await
    }

    async fn update_base_ingredient(
        &self,
        ingredient: &BaseIngredient,
    ) -> Result<Option<BaseIngredient>, CatalogError> {
        actions::update_base_ingredient(ingredient, &self.pool).await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        actions::list_recipes(&self.pool).await
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<Recipe, CatalogError> {
        actions::insert_recipe(recipe, &self.pool).await
    }

    async fn update_recipe(&self, recipe: &Recipe) -> Result<Option<Recipe>, CatalogError> {
        actions::update_recipe(recipe, &self.pool).await
    }

    async fn remove(&self, target: ItemRef) -> Result<Removal, CatalogError> {
        actions::remove_unreferenced(target, &self.pool).await
    }
}
