use std::sync::Arc;

use recipe_bom::{
    memory::MemoryStore, routes, store::SharedStore, IngredientCatalog, RecipeRegistry,
    BASE_INGREDIENT_IN_USE, BASE_INGREDIENT_NAME_REQUIRED, INTERNAL_ERROR, NAME_TAKEN,
    RECIPE_INGREDIENTS_REQUIRED, RECIPE_IN_USE,
};
use serde_json::{json, Value};
use warp::{http::StatusCode, Filter, Reply};

fn app() -> impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + Clone {
    let store: SharedStore = Arc::new(MemoryStore::new());
    routes(
        IngredientCatalog::new(store.clone()),
        RecipeRegistry::new(store),
    )
}

async fn call<F>(app: &F, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value)
where
    F: Filter + Clone + Send + Sync + 'static,
    F::Extract: Reply + Send,
{
    let mut request = warp::test::request().method(method).path(path);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.reply(app).await;
    let status = response.status();
    let body = if response.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(response.body()).unwrap()
    };
    (status, body)
}

fn id_of(record: &Value) -> String {
    record["id"].as_str().unwrap().to_string()
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn base_ingredient_blocked_until_recipe_is_gone() {
    let app = app();

    let (status, flour) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": "Flour" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let flour_id = id_of(&flour);

    let (status, bread) = call(
        &app,
        "POST",
        "/api/recipes",
        Some(json!({
            "name": "Bread",
            "ingredients": [{ "itemId": flour_id, "isRecipe": false, "qty": 2 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bread["ingredients"][0]["qty"], json!(2));
    assert_eq!(bread["ingredients"][0]["is_recipe"], json!(false));
    let bread_id = id_of(&bread);

    let path = format!("/api/base-ingredients/{flour_id}");
    let (status, body) = call(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(BASE_INGREDIENT_IN_USE));

    let (status, _) = call(&app, "DELETE", &format!("/api/recipes/{bread_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = call(&app, "GET", "/api/base-ingredients", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn recipe_used_by_another_recipe_cannot_be_deleted() {
    let app = app();

    let (_, flour) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": "Flour" }))).await;
    let (_, dough) = call(
        &app,
        "POST",
        "/api/recipes",
        Some(json!({
            "name": "Dough",
            "ingredients": [{ "item_id": id_of(&flour), "is_recipe": false }]
        })),
    )
    .await;
    let dough_id = id_of(&dough);

    let (status, _) = call(
        &app,
        "POST",
        "/api/recipes",
        Some(json!({
            "name": "Pizza",
            "ingredients": [{ "item_id": dough_id, "is_recipe": true }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "DELETE", &format!("/api/recipes/{dough_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(RECIPE_IN_USE));

    // Flour is still listed by Dough.
    let (status, _) = call(&app, "DELETE", &format!("/api/base-ingredients/{}", id_of(&flour)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = call(&app, "GET", "/api/recipes", None).await;
    assert_eq!(names(&list), vec!["Dough", "Pizza"]);
}

#[tokio::test]
async fn duplicate_names_conflict_without_side_effects() {
    let app = app();

    call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": "Salt", "price": "1.25" }))).await;
    let (status, body) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": "Salt" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(NAME_TAKEN));

    let (_, list) = call(&app, "GET", "/api/base-ingredients", None).await;
    assert_eq!(names(&list), vec!["Salt"]);
    assert_eq!(list[0]["price"], json!("1.25"));
}

#[tokio::test]
async fn duplicate_recipe_names_conflict_without_side_effects() {
    let app = app();

    let (_, flour) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": "Flour" }))).await;
    let parts = json!([{ "item_id": id_of(&flour), "is_recipe": false }]);

    let (status, zeta) = call(&app, "POST", "/api/recipes", Some(json!({ "name": "Zeta", "ingredients": parts }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "POST", "/api/recipes", Some(json!({ "name": "Zeta", "ingredients": parts }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(NAME_TAKEN));

    let (_, list) = call(&app, "GET", "/api/recipes", None).await;
    assert_eq!(names(&list), vec!["Zeta"]);
    assert_eq!(id_of(&list[0]), id_of(&zeta));

    let (status, alpha) = call(&app, "POST", "/api/recipes", Some(json!({ "name": "Alpha", "ingredients": parts }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/recipes/{}", id_of(&alpha)),
        Some(json!({ "name": "Zeta", "prep_time": "5 min", "ingredients": parts })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(NAME_TAKEN));

    let (_, list) = call(&app, "GET", "/api/recipes", None).await;
    assert_eq!(names(&list), vec!["Alpha", "Zeta"]);
    assert_eq!(list[0]["prep_time"], Value::Null);
}

#[tokio::test]
async fn lists_are_sorted_by_name() {
    let app = app();

    for name in ["Yeast", "Butter", "Milk", "Eggs"] {
        let (status, _) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = call(&app, "GET", "/api/base-ingredients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&list), vec!["Butter", "Eggs", "Milk", "Yeast"]);

    let yeast = id_of(&list[3]);
    for name in ["Zeta", "Pretzel", "Alpha", "Muffin"] {
        let body = json!({ "name": name, "ingredients": [{ "item_id": yeast, "is_recipe": false }] });
        let (status, _) = call(&app, "POST", "/api/recipes", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = call(&app, "GET", "/api/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&list), vec!["Alpha", "Muffin", "Pretzel", "Zeta"]);
}

#[tokio::test]
async fn prices_come_back_with_two_decimals() {
    let app = app();

    let (_, salt) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": "Salt", "price": "0.5" }))).await;
    assert_eq!(salt["price"], json!("0.50"));

    let (_, list) = call(&app, "GET", "/api/base-ingredients", None).await;
    assert_eq!(list[0]["price"], json!("0.50"));
}

#[tokio::test]
async fn update_replaces_ingredient_list_wholesale() {
    let app = app();

    let mut ids = vec![];
    for name in ["Flour", "Water", "Salt"] {
        let (_, row) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": name }))).await;
        ids.push(id_of(&row));
    }

    let parts: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "item_id": id, "is_recipe": false }))
        .collect();
    let (_, bread) = call(
        &app,
        "POST",
        "/api/recipes",
        Some(json!({ "name": "Bread", "prep_time": "3h", "ingredients": parts })),
    )
    .await;
    let path = format!("/api/recipes/{}", id_of(&bread));

    let (status, updated) = call(
        &app,
        "PUT",
        &path,
        Some(json!({
            "name": "Flatbread",
            "unit_price": "4.5",
            "ingredients": [{ "item_id": ids[0], "is_recipe": false, "qty": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["prep_time"], Value::Null);

    let (_, list) = call(&app, "GET", "/api/recipes", None).await;
    let ingredients = list[0]["ingredients"].as_array().unwrap();
    assert_eq!(list[0]["name"], json!("Flatbread"));
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["item_id"], json!(ids[0]));

    // Water and Salt are free again.
    let (status, _) = call(&app, "DELETE", &format!("/api/base-ingredients/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn validation_errors_are_bad_requests() {
    let app = app();

    let (status, body) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "unit": "kg" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(BASE_INGREDIENT_NAME_REQUIRED));

    let (status, body) = call(&app, "POST", "/api/recipes", Some(json!({ "name": "Bread", "ingredients": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(RECIPE_INGREDIENTS_REQUIRED));

    let (status, _) = call(
        &app,
        "POST",
        "/api/recipes",
        Some(json!({ "name": "Bread", "ingredients": [{ "item_id": "not-a-uuid", "is_recipe": false }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = call(&app, "GET", "/api/recipes", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app();
    let missing = uuid::Uuid::new_v4();

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/base-ingredients/{missing}"),
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &format!("/api/recipes/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, "DELETE", "/api/recipes/bread", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_ne!(body["error"], json!(INTERNAL_ERROR));
}

#[tokio::test]
async fn generated_ids_are_unique() {
    let app = app();
    let mut seen = std::collections::HashSet::new();

    for n in 0..20 {
        let (_, row) = call(&app, "POST", "/api/base-ingredients", Some(json!({ "name": format!("Item {n}") }))).await;
        assert!(seen.insert(id_of(&row)));
    }
}
