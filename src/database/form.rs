use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::error::CatalogError;
use super::schema::{BaseIngredient, IngredientEntry, Recipe};
use crate::constants::{
    BASE_INGREDIENT_NAME_REQUIRED, BODY_NOT_OBJECT, DECIMAL_INTEGER_DIGITS, DECIMAL_SCALE,
    MAX_IMAGE_URL_LENGTH, MAX_LABEL_LENGTH, MAX_NAME_LENGTH, RECIPE_INGREDIENTS_REQUIRED,
    RECIPE_NAME_REQUIRED,
};

pub type FormData = HashMap<String, Value>;

/// Untyped request body. Keys are normalised to snake_case so `imageUrl` and
/// `image_url` read the same; when both are sent the snake_case key wins.
#[derive(Debug, Clone, Default)]
pub struct Form {
    inner: FormData,
}

impl Form {
    pub fn from_data(data: FormData) -> Self {
        let mut inner = FormData::with_capacity(data.len());
        for (key, value) in data {
            let normalised = snake_case(&key);
            if normalised == key {
                inner.insert(key, value);
            } else {
                inner.entry(normalised).or_insert(value);
            }
        }
        Self { inner }
    }

    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        match value {
            Value::Object(map) => Ok(Self::from_data(map.into_iter().collect())),
            _ => Err(CatalogError::validation(BODY_NOT_OBJECT)),
        }
    }

    /// Missing and `null` both read as absent.
    fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key).filter(|value| !value.is_null())
    }

    /// Required, non-blank string. `missing` is the message for an absent value.
    pub fn get_name(&self, key: &str, missing: &str) -> Result<String, CatalogError> {
        let name = match self.get(key) {
            Some(Value::String(name)) => name.trim(),
            Some(_) => return Err(CatalogError::Validation(format!("`{key}` must be a string."))),
            None => "",
        };
        if name.is_empty() {
            return Err(CatalogError::validation(missing));
        }
        check_length(key, name, MAX_NAME_LENGTH)?;

        Ok(name.to_string())
    }

    pub fn get_optional_str(
        &self,
        key: &str,
        max_length: usize,
    ) -> Result<Option<String>, CatalogError> {
        match self.get(key) {
            Some(Value::String(value)) => {
                check_length(key, value, max_length)?;
                Ok(Some(value.to_owned()))
            }
            Some(_) => Err(CatalogError::Validation(format!("`{key}` must be a string."))),
            None => Ok(None),
        }
    }

    /// Numbers and numeric strings are accepted and rounded to exactly two places.
    pub fn get_optional_decimal(&self, key: &str) -> Result<Option<Decimal>, CatalogError> {
        let value = match self.get(key) {
            Some(value @ (Value::Number(_) | Value::String(_))) => value.to_owned(),
            Some(_) => return Err(CatalogError::Validation(format!("`{key}` must be a number."))),
            None => return Ok(None),
        };
        let number: Decimal = serde_json::from_value(value)
            .map_err(|_e| CatalogError::Validation(format!("`{key}` must be a number.")))?;
        let mut number = number.round_dp(DECIMAL_SCALE);
        number.rescale(DECIMAL_SCALE);

        if number.abs() >= Decimal::from(10_i64.pow(DECIMAL_INTEGER_DIGITS)) {
            return Err(CatalogError::Validation(format!("`{key}` is out of range.")));
        }

        Ok(Some(number))
    }

    pub fn get_ingredients(&self, key: &str) -> Result<Vec<IngredientEntry>, CatalogError> {
        let items = match self.get(key) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(CatalogError::validation(RECIPE_INGREDIENTS_REQUIRED)),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item.to_owned()).map_err(|e| {
                    CatalogError::Validation(format!("Ingredient {index} is invalid: {e}"))
                })
            })
            .collect()
    }
}

fn check_length(key: &str, value: &str, max_length: usize) -> Result<(), CatalogError> {
    if value.chars().count() > max_length {
        return Err(CatalogError::Validation(format!(
            "`{key}` must be at most {max_length} characters."
        )));
    }
    Ok(())
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Validated input for creating or overwriting a base ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseIngredientDraft {
    pub name: String,
    pub image_url: Option<String>,
    pub unit: Option<String>,
    pub price: Option<Decimal>,
}

impl TryFrom<&Form> for BaseIngredientDraft {
    type Error = CatalogError;

    fn try_from(form: &Form) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.get_name("name", BASE_INGREDIENT_NAME_REQUIRED)?,
            image_url: form.get_optional_str("image_url", MAX_IMAGE_URL_LENGTH)?,
            unit: form.get_optional_str("unit", MAX_LABEL_LENGTH)?,
            price: form.get_optional_decimal("price")?,
        })
    }
}

impl BaseIngredientDraft {
    pub fn into_record(self, id: Uuid) -> BaseIngredient {
        BaseIngredient {
            id,
            name: self.name,
            image_url: self.image_url,
            unit: self.unit,
            price: self.price,
        }
    }
}

/// Validated input for creating or wholesale-replacing a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub image_url: Option<String>,
    pub prep_time: Option<String>,
    pub unit_price: Option<Decimal>,
    pub ingredients: Vec<IngredientEntry>,
}

impl TryFrom<&Form> for RecipeDraft {
    type Error = CatalogError;

    fn try_from(form: &Form) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.get_name("name", RECIPE_NAME_REQUIRED)?,
            image_url: form.get_optional_str("image_url", MAX_IMAGE_URL_LENGTH)?,
            prep_time: form.get_optional_str("prep_time", MAX_LABEL_LENGTH)?,
            unit_price: form.get_optional_decimal("unit_price")?,
            ingredients: form.get_ingredients("ingredients")?,
        })
    }
}

impl RecipeDraft {
    pub fn into_record(self, id: Uuid) -> Recipe {
        Recipe {
            id,
            name: self.name,
            image_url: self.image_url,
            prep_time: self.prep_time,
            unit_price: self.unit_price,
            ingredients: self.ingredients,
        }
    }
}
