pub mod base_ingredients;
pub mod recipes;
pub mod references;

pub use base_ingredients::*;
pub use recipes::*;
pub use references::*;
