use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{test, App};
use serde_json::{json, Value};

use linkbuilder::{Database, MemoryDatabase, PlacementBody, ValidationReportBody};

fn memory() -> Data<Box<dyn Database>> {
    Data::new(Box::new(MemoryDatabase::new()) as Box<dyn Database>)
}

fn valid_draft() -> Value {
    json!({
        "base_url": "https://example.com",
        "campaign_type": "Display Ads",
        "campaign_source": "Google",
        "ad_type": "Banner",
        "ad_type_detail": "Standard Banner",
        "brand1": "Brand A",
        "product_category": "Hardware",
        "campaign_owner": "Daniel Konig",
        "start_date": "2024-05-01",
        "campaign_notes": "launch",
        "project_reference_number": "1234567",
        "industry": "Technology",
        "tactic": "Awareness",
        "targeting": false,
        "partnering": false,
        "third_party": false
    })
}

#[actix_web::test]
async fn options_follow_the_hierarchy() {
    let app = test::init_service(
        App::new()
            .app_data(memory())
            .configure(linkbuilder::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/options/sources?campaign_type=Unknown")
        .to_request();
    let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/options/ad-types?campaign_type=Display%20Ads&campaign_source=Newsletter")
        .to_request();
    let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/options/ad-types?campaign_type=Display%20Ads&campaign_source=Google")
        .to_request();
    let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(body.contains(&"Banner".to_string()));

    let req = test::TestRequest::get()
        .uri("/api/options/sub-ledgers")
        .to_request();
    let body: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn validate_reports_conditional_requirements() {
    let app = test::init_service(
        App::new()
            .app_data(memory())
            .configure(linkbuilder::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/placements/validate")
        .set_json(valid_draft())
        .to_request();
    let report: ValidationReportBody = test::call_and_read_body_json(&app, req).await;
    assert!(report.valid);
    assert!(report.errors.is_empty());

    let mut draft = valid_draft();
    draft["cost_center"] = json!("Engineering");
    let req = test::TestRequest::post()
        .uri("/api/placements/validate")
        .set_json(draft)
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["errors"],
        json!({ "sub_ledger": "This field is required" })
    );
    assert_eq!(report["statuses"]["sub_ledger"], "error");
    assert_eq!(report["statuses"]["cost_center"], "completed");
}

#[actix_web::test]
async fn create_lookup_and_archive_placement() {
    let app = test::init_service(
        App::new()
            .app_data(memory())
            .configure(linkbuilder::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/placements")
        .set_json(valid_draft())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: PlacementBody = test::read_body_json(resp).await;
    assert_eq!(created.draft.campaign_owner, "Daniel Konig");
    assert!(created
        .tracking_url
        .starts_with("https://example.com/?utm_source=Google&utm_medium=Banner"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/placements/by-code/{}", created.tracking_code))
        .to_request();
    let found: PlacementBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.id, created.id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/placements/{}/status", created.id))
        .set_json(json!({ "status": "archived" }))
        .to_request();
    let archived: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(archived["status"], "archived");

    let req = test::TestRequest::put()
        .uri(&format!("/api/placements/{}/status", created.id))
        .set_json(json!({ "status": "active" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/api/placements").to_request();
    let body: Vec<PlacementBody> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 1);
}

#[actix_web::test]
async fn invalid_draft_is_not_stored() {
    let app = test::init_service(
        App::new()
            .app_data(memory())
            .configure(linkbuilder::configure),
    )
    .await;

    let mut draft = valid_draft();
    draft["base_url"] = json!("not a url");
    let req = test::TestRequest::post()
        .uri("/api/placements")
        .set_json(draft)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001005");
    assert!(body["error_meta"]["violations"]["base_url"].is_string());

    let req = test::TestRequest::get().uri("/api/placements").to_request();
    let body: Vec<PlacementBody> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/placements/by-code/ZZZZZZZZZZ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
