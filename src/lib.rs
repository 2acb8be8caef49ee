mod database {
    pub mod actions;
    pub mod error;
    pub mod form;
    pub mod memory;
    pub mod postgres;
    pub mod schema;
    pub mod store;
}
pub mod api {
    pub mod filters;
    pub mod handlers;
    pub mod rejection;
}
pub mod catalog;
pub mod config;
mod constants;
pub mod integrity;
pub mod registry;

pub use api::filters::routes;
pub use catalog::IngredientCatalog;
pub use constants::*;
pub use database::*;
pub use registry::RecipeRegistry;
