use std::{net::SocketAddr, sync::Arc};

use env_logger::Env;
use recipe_bom::{
    config::{Settings, StorageKind},
    memory::MemoryStore,
    postgres::{self, PgStore},
    store::SharedStore,
    IngredientCatalog, RecipeRegistry,
};
use warp::{http::HeaderValue, Filter};

/// `warp::cors` panics on a malformed origin, so reject it up front.
fn check_origin(origin: &str) -> Result<(), String> {
    let well_formed = match origin.split_once("://") {
        Some((scheme, host)) => !scheme.is_empty() && !host.is_empty(),
        None => false,
    };
    if !well_formed || HeaderValue::from_str(origin).is_err() {
        return Err(format!("Invalid frontend_url {origin:?}"));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    check_origin(&settings.server.frontend_url)?;

    let (store, pool): (SharedStore, _) = match settings.storage {
        StorageKind::Postgres => {
            let pool = postgres::connect(&settings.database).await?;
            if settings.database.create_tables {
                postgres::create_tables(&pool).await?;
            }
            (Arc::new(PgStore::new(pool.clone())), Some(pool))
        }
        StorageKind::Memory => {
            log::warn!("Using in-memory storage; data is lost on shutdown");
            (Arc::new(MemoryStore::new()), None)
        }
    };

    let cors = warp::cors()
        .allow_origin(settings.server.frontend_url.as_str())
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_header("content-type");

    let routes = recipe_bom::routes(
        IngredientCatalog::new(store.clone()),
        RecipeRegistry::new(store),
    )
    .with(cors)
    .with(warp::log("recipe_bom::api"));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {e}");
        }
    })?;

    log::info!("Backend API listening on {addr}");
    server.await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    log::info!("Shut down");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_needs_scheme_and_host() {
        assert!(check_origin("http://localhost:3000").is_ok());
        assert!(check_origin("localhost:3000").is_err());
        assert!(check_origin("http://").is_err());
        assert!(check_origin("http://bad\nhost").is_err());
    }
}
