use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn creating_a_shop_returns_it(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/shop", &json!({ "name": "  Bar Moon " })).await;
    assert_eq!(response.status().as_u16(), 200);

    let shop: Value = response.json().await.unwrap();
    assert!(shop["id"].as_i64().unwrap() > 0);
    assert_eq!(shop["name"], "Bar Moon");

    let fetched: Value = app.get(&format!("/shop/{}", shop["id"])).await.json().await.unwrap();
    assert_eq!(fetched, shop);
}

#[actix_web::test]
async fn blank_shop_name_is_rejected_with_400(){
    let app = TestApp::spawn_app().await;

    for body in [json!({ "name": "" }), json!({ "name": "   " }), json!({})] {
        let response = app.post_json("/shop", &body).await;
        assert_eq!(response.status().as_u16(), 400, "Did not reject {}", body);
    }
}

#[actix_web::test]
async fn shops_are_listed_with_default_limit_of_ten(){
    let app = TestApp::spawn_app().await;

    for i in 0..12 {
        app.create_shop(&format!("Bar {}", i)).await;
    }

    let listed: Vec<Value> = app.get("/shop").await.json().await.unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0]["name"], "Bar 0");

    let tail: Vec<Value> = app.get("/shop?offset=10").await.json().await.unwrap();
    let names: Vec<&str> = tail.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Bar 10", "Bar 11"]);
}

#[actix_web::test]
async fn unknown_shop_is_a_zero_value_200(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/shop/77").await;
    assert_eq!(response.status().as_u16(), 200);

    let shop: Value = response.json().await.unwrap();
    assert_eq!(shop, json!({ "id": 0, "name": "" }));
}

#[actix_web::test]
async fn offering_cocktails_returns_associations(){
    let app = TestApp::spawn_app().await;
    let shop_id = app.create_shop("Bar Moon").await;
    let godfather = app.create_cocktail("Godfather", &[]).await["id"].as_i64().unwrap();
    let mojito = app.create_cocktail("Mojito", &[]).await["id"].as_i64().unwrap();

    let response = app.offer_cocktails(shop_id, &[godfather, mojito]).await;
    assert_eq!(response.status().as_u16(), 201);

    let associations: Vec<Value> = response.json().await.unwrap();
    assert_eq!(associations.len(), 2);
    assert_eq!(associations[0]["shop_id"], shop_id);
    assert_eq!(associations[0]["cocktail_id"], godfather);
    assert_eq!(associations[1]["cocktail_id"], mojito);

    let offered: Vec<Value> = app.get(&format!("/shop/{}/cocktail", shop_id)).await.json().await.unwrap();
    let names: Vec<&str> = offered.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Godfather", "Mojito"]);
}

#[actix_web::test]
async fn offering_a_cocktail_twice_keeps_one_association(){
    let app = TestApp::spawn_app().await;
    let shop_id = app.create_shop("Bar Moon").await;
    let godfather = app.create_cocktail("Godfather", &[]).await["id"].as_i64().unwrap();

    let first: Vec<Value> = app.offer_cocktails(shop_id, &[godfather]).await.json().await.unwrap();
    let second: Vec<Value> = app.offer_cocktails(shop_id, &[godfather]).await.json().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(app.store().shop_cocktail_count(), 1);
}

#[actix_web::test]
async fn offering_a_missing_cocktail_rolls_back_the_batch(){
    let app = TestApp::spawn_app().await;
    let shop_id = app.create_shop("Bar Moon").await;
    let godfather = app.create_cocktail("Godfather", &[]).await["id"].as_i64().unwrap();

    let response = app.offer_cocktails(shop_id, &[godfather, 9999]).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "Internal Server Error");
    assert_eq!(app.store().shop_cocktail_count(), 0);
}

#[actix_web::test]
async fn offering_cocktails_to_a_missing_shop_is_a_500(){
    let app = TestApp::spawn_app().await;
    let godfather = app.create_cocktail("Godfather", &[]).await["id"].as_i64().unwrap();

    let response = app.offer_cocktails(999, &[godfather]).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(app.store().shop_cocktail_count(), 0);
}

#[actix_web::test]
async fn shop_cocktail_detail_omits_quantities(){
    let app = TestApp::spawn_app().await;
    let (shop_id, _, cocktail_id) = app.seed_bar().await;

    let response = app.get(&format!("/shop/{}/cocktail/{}", shop_id, cocktail_id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = response.json().await.unwrap();
    assert_eq!(detail["name"], "Godfather");

    let materials = detail["materials"].as_array().unwrap();
    assert_eq!(materials.len(), 2);
    for material in materials {
        let keys: Vec<&String> = material.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(material.get("quantity").is_none());
    }
}

#[actix_web::test]
async fn cocktail_not_offered_by_shop_is_a_zero_value_200(){
    let app = TestApp::spawn_app().await;
    let (_, _, cocktail_id) = app.seed_bar().await;
    let other_shop = app.create_shop("Bar Sun").await;

    let response = app.get(&format!("/shop/{}/cocktail/{}", other_shop, cocktail_id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let detail: Value = response.json().await.unwrap();
    assert_eq!(detail["id"], 0);
    assert_eq!(detail["name"], "");
    assert_eq!(detail["materials"], json!([]));
}
