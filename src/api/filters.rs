use std::convert::Infallible;

use serde_json::Value;
use warp::{Filter, Rejection, Reply};

use super::{handlers, rejection::handle_rejection};
use crate::{catalog::IngredientCatalog, constants::BODY_LIMIT_BYTES, registry::RecipeRegistry};

/// Every `/api` route, with rejections already turned into JSON error replies.
pub fn routes(
    catalog: IngredientCatalog,
    registry: RecipeRegistry,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    base_ingredients(catalog)
        .or(recipes(registry))
        .recover(handle_rejection)
}

pub fn base_ingredients(
    catalog: IngredientCatalog,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let collection = warp::path!("api" / "base-ingredients");
    let item = warp::path!("api" / "base-ingredients" / String);

    let list = collection
        .clone()
        .and(warp::get())
        .and(with_catalog(catalog.clone()))
        .and_then(handlers::list_base_ingredients);
    let create = collection
        .and(warp::post())
        .and(json_body())
        .and(with_catalog(catalog.clone()))
        .and_then(handlers::create_base_ingredient);
    let update = item
        .clone()
        .and(warp::put())
        .and(json_body())
        .and(with_catalog(catalog.clone()))
        .and_then(handlers::update_base_ingredient);
    let delete = item
        .and(warp::delete())
        .and(with_catalog(catalog))
        .and_then(handlers::delete_base_ingredient);

    list.or(create).or(update).or(delete)
}

pub fn recipes(
    registry: RecipeRegistry,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let collection = warp::path!("api" / "recipes");
    let item = warp::path!("api" / "recipes" / String);

    let list = collection
        .clone()
        .and(warp::get())
        .and(with_registry(registry.clone()))
        .and_then(handlers::list_recipes);
    let create = collection
        .and(warp::post())
        .and(json_body())
        .and(with_registry(registry.clone()))
        .and_then(handlers::create_recipe);
    let update = item
        .clone()
        .and(warp::put())
        .and(json_body())
        .and(with_registry(registry.clone()))
        .and_then(handlers::update_recipe);
    let delete = item
        .and(warp::delete())
        .and(with_registry(registry))
        .and_then(handlers::delete_recipe);

    list.or(create).or(update).or(delete)
}

fn with_catalog(
    catalog: IngredientCatalog,
) -> impl Filter<Extract = (IngredientCatalog,), Error = Infallible> + Clone {
    warp::any().map(move || catalog.clone())
}

fn with_registry(
    registry: RecipeRegistry,
) -> impl Filter<Extract = (RecipeRegistry,), Error = Infallible> + Clone {
    warp::any().map(move || registry.clone())
}

fn json_body() -> impl Filter<Extract = (Value,), Error = Rejection> + Clone {
    warp::body::content_length_limit(BODY_LIMIT_BYTES).and(warp::body::json())
}
