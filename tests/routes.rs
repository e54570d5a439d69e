use actix_web::{App, http::StatusCode, test, web};
use serde_json::Value;

use textile_crm::models::config::ServerConfig;
use textile_crm::repository::DieselRepository;
use textile_crm::{configure, run};

use common::CustomerSeed;

mod common;

fn server_config(page_size: i64) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: String::new(),
        page_size,
    }
}

macro_rules! init_app {
    ($test_db:expr, $page_size:expr) => {
        test::init_service(
            App::new()
                .configure(configure)
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new(
                    server_config($page_size).page_limit().unwrap(),
                )),
        )
        .await
    };
}

fn seed(test_db: &common::TestDb) -> i32 {
    let first = test_db.insert_customer(CustomerSeed::new("K001", "Alfa").area("PL-N"));
    test_db.insert_customer(CustomerSeed::new("K002", "Beta").area("PL-S"));
    test_db.insert_customer(CustomerSeed::new("K003", "Gamma").area("PL-N"));
    first
}

#[actix_web::test]
async fn list_page_returns_first_page_and_filters() {
    let test_db = common::TestDb::new("routes_list_page.db");
    seed(&test_db);
    let app = init_app!(test_db, 2);

    let req = test::TestRequest::get()
        .uri("/customers?sortBy=customer_code&sortOrder=asc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let data = body["customers"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["code"], "K001");
    assert_eq!(body["customers"]["hasMore"], true);
    assert!(body["customers"]["nextCursor"].is_string());
    assert_eq!(body["salesAreas"], serde_json::json!(["PL-N", "PL-S"]));
    assert_eq!(body["filters"]["sortBy"], "customer_code");
    assert_eq!(body["filters"]["sortOrder"], "asc");
}

#[actix_web::test]
async fn load_more_continues_after_cursor() {
    let test_db = common::TestDb::new("routes_load_more.db");
    seed(&test_db);
    let app = init_app!(test_db, 2);

    let req = test::TestRequest::get()
        .uri("/customers/more?sortBy=customer_code")
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    let cursor = first["nextCursor"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/customers/more?sortBy=customer_code&cursor={cursor}"))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;

    let data = second["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["code"], "K003");
    assert_eq!(second["hasMore"], false);
    assert!(second["nextCursor"].is_null());
}

#[actix_web::test]
async fn invalid_sort_returns_validation_panel() {
    let test_db = common::TestDb::new("routes_invalid_sort.db");
    seed(&test_db);
    let app = init_app!(test_db, 20);

    let req = test::TestRequest::get()
        .uri("/customers?query=alfa&sortBy=customer_status&cursor=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["category"], "validation");
    assert_eq!(body["clearUrl"], "/customers");
    let retry = body["retryUrl"].as_str().unwrap();
    assert!(retry.starts_with("/customers?"));
    assert!(retry.contains("query=alfa"));
    assert!(!retry.contains("cursor"));
}

#[actix_web::test]
async fn customer_codes_are_returned_as_json() {
    let test_db = common::TestDb::new("routes_customer_codes.db");
    seed(&test_db);
    let app = init_app!(test_db, 20);

    let req = test::TestRequest::get().uri("/customers/codes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["K001", "K002", "K003"]);
}

#[actix_web::test]
async fn sales_areas_are_returned_as_json() {
    let test_db = common::TestDb::new("routes_sales_areas.db");
    seed(&test_db);
    let app = init_app!(test_db, 20);

    let req = test::TestRequest::get()
        .uri("/customers/sales-areas")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, serde_json::json!(["PL-N", "PL-S"]));
}

#[actix_web::test]
async fn customer_detail_by_id() {
    let test_db = common::TestDb::new("routes_customer_detail.db");
    let id = seed(&test_db);
    test_db.insert_contact(id, "Jan Kowalski", "jan@example.com");
    let app = init_app!(test_db, 20);

    let req = test::TestRequest::get()
        .uri(&format!("/customers/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["code"], "K001");
    assert_eq!(body["contacts"][0]["name"], "Jan Kowalski");
}

#[actix_web::test]
async fn non_numeric_id_is_bad_request() {
    let test_db = common::TestDb::new("routes_bad_id.db");
    let app = init_app!(test_db, 20);

    let req = test::TestRequest::get().uri("/customers/abc").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_id_is_not_found() {
    let test_db = common::TestDb::new("routes_unknown_id.db");
    seed(&test_db);
    let app = init_app!(test_db, 20);

    let req = test::TestRequest::get().uri("/customers/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["error"], "Customer not found");
}

#[actix_web::test]
async fn load_more_with_stale_cursor_is_bad_request() {
    let test_db = common::TestDb::new("routes_load_more_stale.db");
    seed(&test_db);
    let app = init_app!(test_db, 1);

    let req = test::TestRequest::get()
        .uri("/customers/more?sortBy=customer_code")
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    let cursor = first["nextCursor"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/customers/more?sortBy=customer_name&cursor={cursor}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;

    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to load more customers:")
    );
}

#[actix_web::test]
async fn server_refuses_to_start_with_out_of_range_page_size() {
    for page_size in [0, -1, 101] {
        let result = run(server_config(page_size)).await;

        assert!(result.is_err(), "page size {page_size} should be rejected");
    }
}
