use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqlx::types::Json;
use uuid::Uuid;

/// Target of an ingredient reference: either a base ingredient or another recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemRef {
    BaseIngredient(Uuid),
    Recipe(Uuid),
}

impl ItemRef {
    pub fn id(&self) -> Uuid {
        match self {
            ItemRef::BaseIngredient(id) | ItemRef::Recipe(id) => *id,
        }
    }

    pub fn is_recipe(&self) -> bool {
        matches!(self, ItemRef::Recipe(_))
    }

    fn from_parts(item_id: Uuid, is_recipe: bool) -> Self {
        if is_recipe {
            ItemRef::Recipe(item_id)
        } else {
            ItemRef::BaseIngredient(item_id)
        }
    }

    /// Partial element shape used for `@>` containment against `recipes.ingredients`.
    pub fn containment_probe(&self) -> Value {
        json!([{ "item_id": self.id(), "is_recipe": self.is_recipe() }])
    }
}

/// One element of a recipe's ingredient list.
///
/// Only `item_id` and `is_recipe` carry meaning here; any other keys
/// (quantities, notes) are kept in `details` and written back verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredIngredient", into = "StoredIngredient")]
pub struct IngredientEntry {
    pub item: ItemRef,
    pub details: Map<String, Value>,
}

impl IngredientEntry {
    pub fn new(item: ItemRef) -> Self {
        Self {
            item,
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }

    pub fn refers_to(&self, target: &ItemRef) -> bool {
        &self.item == target
    }
}

/// Document form of an `IngredientEntry`. Both tag fields are mandatory, so a
/// missing or non-boolean `is_recipe` fails deserialization.
#[derive(Serialize, Deserialize)]
struct StoredIngredient {
    #[serde(alias = "itemId")]
    item_id: Uuid,
    #[serde(alias = "isRecipe")]
    is_recipe: bool,
    #[serde(flatten)]
    details: Map<String, Value>,
}

impl From<StoredIngredient> for IngredientEntry {
    fn from(value: StoredIngredient) -> Self {
        Self {
            item: ItemRef::from_parts(value.item_id, value.is_recipe),
            details: value.details,
        }
    }
}

impl From<IngredientEntry> for StoredIngredient {
    fn from(value: IngredientEntry) -> Self {
        Self {
            item_id: value.item.id(),
            is_recipe: value.item.is_recipe(),
            details: value.details,
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize)]
pub struct BaseIngredient {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub unit: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub prep_time: Option<String>,
    pub unit_price: Option<Decimal>,
    pub ingredients: Vec<IngredientEntry>,
}

impl Recipe {
    pub fn references(&self, target: &ItemRef) -> bool {
        self.ingredients.iter().any(|entry| entry.refers_to(target))
    }
}

/// `recipes` row as stored, with the JSONB ingredient document.
#[derive(sqlx::FromRow, Debug)]
pub struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub prep_time: Option<String>,
    pub unit_price: Option<Decimal>,
    pub ingredients: Json<Vec<IngredientEntry>>,
}

impl From<RecipeRow> for Recipe {
    fn from(value: RecipeRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image_url: value.image_url,
            prep_time: value.prep_time,
            unit_price: value.unit_price,
            ingredients: value.ingredients.0,
        }
    }
}
