use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn creating_a_cocktail_returns_its_detail_with_material_ids(){
    let app = TestApp::spawn_app().await;

    let body = json!({
        "name": "Godfather",
        "materials": [
            { "name": "Whiskey", "quantity": { "quantity": 30, "unit": "ml" } },
            { "name": "Amaretto", "quantity": { "quantity": 10, "unit": "ml" } }
        ]
    });

    let response = app.post_json("/cocktails", &body).await;
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = response.json().await.unwrap();
    assert!(detail["id"].as_i64().unwrap() > 0);
    assert_eq!(detail["name"], "Godfather");
    assert_eq!(detail["image_url"], "");

    let materials = detail["materials"].as_array().unwrap();
    assert_eq!(materials.len(), 2);
    assert_eq!(materials[0]["name"], "Whiskey");
    assert_eq!(materials[0]["quantity"], json!({ "quantity": 30, "unit": "ml" }));
    assert_eq!(materials[1]["name"], "Amaretto");
    assert_eq!(materials[1]["quantity"], json!({ "quantity": 10, "unit": "ml" }));
    assert!(materials.iter().all(|m| m["id"].as_i64().unwrap() > 0));
}

#[actix_web::test]
async fn materials_with_the_same_name_are_reused(){
    let app = TestApp::spawn_app().await;

    let godfather = app.create_cocktail("Godfather", &[("Whiskey", 30, "ml")]).await;
    let highball = app.create_cocktail("Highball", &[("Whiskey", 45, "ml"), ("Soda", 90, "ml")]).await;

    assert_eq!(godfather["materials"][0]["id"], highball["materials"][0]["id"]);
    assert_ne!(highball["materials"][0]["id"], highball["materials"][1]["id"]);
}

#[actix_web::test]
async fn image_url_is_kept_when_given(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/cocktails", &json!({
        "name": "Mojito",
        "image_url": "https://img.example/mojito.png",
        "materials": []
    }))
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = response.json().await.unwrap();
    assert_eq!(detail["image_url"], "https://img.example/mojito.png");
    assert_eq!(detail["materials"], json!([]));
}

#[actix_web::test]
async fn invalid_cocktails_are_rejected_with_400(){
    let app = TestApp::spawn_app().await;

    let test_cases = vec![
        (json!({ "name": "   ", "materials": [] }), "blank name"),
        (json!({ "name": "a".repeat(256), "materials": [] }), "name too long"),
        (
            json!({ "name": "Godfather", "materials": [{ "name": "Whiskey", "quantity": { "quantity": 0, "unit": "ml" } }] }),
            "zero quantity"
        ),
        (
            json!({ "name": "Godfather", "materials": [{ "name": "", "quantity": { "quantity": 30, "unit": "ml" } }] }),
            "blank material name"
        ),
        (
            json!({ "name": "Godfather", "materials": [{ "name": "Whiskey", "quantity": { "quantity": 30, "unit": "" } }] }),
            "empty unit"
        ),
        (
            json!({ "name": "Godfather", "materials": [{ "name": "Whiskey", "quantity": { "quantity": 30, "unit": "x".repeat(33) } }] }),
            "unit longer than 32 characters"
        ),
        (json!({ "materials": [] }), "missing name"),
        (json!({ "name": "Godfather", "materials": "Whiskey" }), "materials not a list")
    ];

    for (body, description) in test_cases {
        let response = app.post_json("/cocktails", &body).await;

        assert_eq!(response.status().as_u16(), 400, "Did not reject body with {}", description);
        assert_eq!(response.text().await.unwrap(), "Bad Request");
    }

    let listed: Vec<Value> = app.get("/cocktails").await.json().await.unwrap();
    assert!(listed.is_empty());
}

#[actix_web::test]
async fn listing_respects_limit_and_offset_in_insertion_order(){
    let app = TestApp::spawn_app().await;

    for name in ["Godfather", "Mojito", "Negroni"] {
        app.create_cocktail(name, &[]).await;
    }

    let first_two: Vec<Value> = app.get("/cocktails?limit=2&offset=0").await.json().await.unwrap();
    let names: Vec<&str> = first_two.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Godfather", "Mojito"]);

    let rest: Vec<Value> = app.get("/cocktails?limit=2&offset=2").await.json().await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0]["name"], "Negroni");

    let past_the_end: Vec<Value> = app.get("/cocktails?offset=10").await.json().await.unwrap();
    assert!(past_the_end.is_empty());
}

#[actix_web::test]
async fn empty_query_values_use_defaults(){
    let app = TestApp::spawn_app().await;
    app.create_cocktail("Godfather", &[]).await;

    let response = app.get("/cocktails?limit=&offset=&keyword=").await;
    assert_eq!(response.status().as_u16(), 200);

    let listed: Vec<Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[actix_web::test]
async fn empty_store_lists_as_empty_array(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/cocktails").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[actix_web::test]
async fn keyword_filters_by_substring(){
    let app = TestApp::spawn_app().await;

    for name in ["Godfather", "Godmother", "Mojito"] {
        app.create_cocktail(name, &[]).await;
    }

    let listed: Vec<Value> = app.get("/cocktails?keyword=God").await.json().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c["name"].as_str().unwrap()).collect();

    assert_eq!(names, vec!["Godfather", "Godmother"]);
}

#[actix_web::test]
async fn keyword_ignores_case(){
    let app = TestApp::spawn_app().await;

    for name in ["Godfather", "Mojito"] {
        app.create_cocktail(name, &[]).await;
    }

    for keyword in ["godfather", "GODF", "gOdFaThEr"] {
        let listed: Vec<Value> = app.get(&format!("/cocktails?keyword={}", keyword)).await.json().await.unwrap();

        assert_eq!(listed.len(), 1, "{} did not match", keyword);
        assert_eq!(listed[0]["name"], "Godfather");
    }
}

#[actix_web::test]
async fn bad_paging_values_are_rejected_with_400(){
    let app = TestApp::spawn_app().await;

    for query in ["limit=ten", "offset=-1", "limit=-5", "limit=1.5"] {
        let response = app.get(&format!("/cocktails?{}", query)).await;
        assert_eq!(response.status().as_u16(), 400, "Did not reject {}", query);
    }
}

#[actix_web::test]
async fn detail_lists_materials_with_quantities(){
    let app = TestApp::spawn_app().await;
    let created = app.create_cocktail("Godfather", &[("Whiskey", 30, "ml"), ("Amaretto", 10, "ml")]).await;

    let response = app.get(&format!("/cocktails/{}", created["id"])).await;
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = response.json().await.unwrap();
    assert_eq!(detail, created);
}

#[actix_web::test]
async fn unknown_cocktail_is_a_zero_value_200(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/cocktails/4242").await;
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = response.json().await.unwrap();
    assert_eq!(detail, json!({
        "id": 0,
        "name": "",
        "image_url": "",
        "materials": [],
        "created_at": 0,
        "updated_at": 0
    }));
}

#[actix_web::test]
async fn non_numeric_cocktail_id_is_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/cocktails/godfather").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "Not Found");
}

#[actix_web::test]
async fn cocktails_can_be_fetched_by_ids(){
    let app = TestApp::spawn_app().await;

    let godfather = app.create_cocktail("Godfather", &[]).await;
    app.create_cocktail("Mojito", &[]).await;
    let negroni = app.create_cocktail("Negroni", &[]).await;

    let response = app.get(&format!("/cocktails/list?ids={},{},999", godfather["id"], negroni["id"])).await;
    assert_eq!(response.status().as_u16(), 200);

    let listed: Vec<Value> = response.json().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Godfather", "Negroni"]);
}

#[actix_web::test]
async fn fetching_no_ids_returns_an_empty_array(){
    let app = TestApp::spawn_app().await;
    app.create_cocktail("Godfather", &[]).await;

    for path in ["/cocktails/list", "/cocktails/list?ids="] {
        let response = app.get(path).await;

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "[]");
    }
}

#[actix_web::test]
async fn non_numeric_ids_are_rejected_with_400(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/cocktails/list?ids=1,two").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn storage_failures_surface_as_500(){
    let app = TestApp::spawn_app().await;
    app.store().break_storage();

    let response = app.get("/cocktails").await;
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "Internal Server Error");

    let response = app.post_json("/cocktails", &json!({ "name": "Godfather", "materials": [] })).await;
    assert_eq!(response.status().as_u16(), 500);
}
