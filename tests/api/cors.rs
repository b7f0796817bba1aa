use crate::helpers::TestApp;

async fn preflight(app: &TestApp, path: &str, method: &str, headers: &str) -> reqwest::Response{
    app.api_client
        .request(reqwest::Method::OPTIONS, format!("{}{}", app.get_app_url(), path))
        .header("Origin", "https://menu.example")
        .header("Access-Control-Request-Method", method)
        .header("Access-Control-Request-Headers", headers)
        .send()
        .await
        .expect("Failed to execute request")
}

#[actix_web::test]
async fn preflight_for_a_json_write_is_allowed(){
    let app = TestApp::spawn_app().await;

    let response = preflight(&app, "/shop", "POST", "content-type").await;

    assert!(response.status().is_success(), "Preflight answered {}", response.status());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let methods = response.headers()["access-control-allow-methods"].to_str().unwrap().to_string();
    for method in ["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS"] {
        assert!(methods.contains(method), "{} missing from {}", method, methods);
    }
}

#[actix_web::test]
async fn preflight_for_a_csrf_header_is_allowed(){
    let app = TestApp::spawn_app().await;

    let response = preflight(&app, "/shop/1/table/1/order/1", "PUT", "content-type,x-csrf-token").await;

    assert!(response.status().is_success(), "Preflight answered {}", response.status());
}

#[actix_web::test]
async fn preflight_for_an_unlisted_method_is_refused(){
    let app = TestApp::spawn_app().await;

    let response = preflight(&app, "/shop", "PATCH", "content-type").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn cross_origin_reads_carry_the_wildcard_origin(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .get(format!("{}/health", app.get_app_url()))
        .header("Origin", "https://menu.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
