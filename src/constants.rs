pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_IMAGE_URL_LENGTH: usize = 255;
pub const MAX_LABEL_LENGTH: usize = 50;

/// NUMERIC(10, 2): eight integer digits, two fractional.
pub const DECIMAL_SCALE: u32 = 2;
pub const DECIMAL_INTEGER_DIGITS: u32 = 8;

pub const BODY_LIMIT_BYTES: u64 = 64 * 1024;

pub const BASE_INGREDIENTS_TABLE: &str = "base_ingredients";
pub const RECIPES_TABLE: &str = "recipes";

pub const BASE_INGREDIENT_NAME_REQUIRED: &str = "Base ingredient name is required.";
pub const RECIPE_NAME_REQUIRED: &str = "Recipe name is required.";
pub const RECIPE_INGREDIENTS_REQUIRED: &str = "Recipe ingredients must be a non-empty list.";
pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object.";

pub const BASE_INGREDIENT_NOT_FOUND: &str = "Base ingredient not found.";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found.";

pub const BASE_INGREDIENT_IN_USE: &str =
    "Cannot delete: base ingredient is used in one or more recipes.";
pub const RECIPE_IN_USE: &str =
    "Cannot delete: recipe is an ingredient of one or more other recipes.";
pub const NAME_TAKEN: &str = "An entry with this name already exists.";

pub const INTERNAL_ERROR: &str = "Internal server error";
