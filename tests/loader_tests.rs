//! Integration tests for the dependent-fetch loader against a mocked API
//!
//! Exercises the tri-state contract: chain ordering, short-circuit on absent
//! prerequisite fields, abort on first failure, and precondition failures
//! that never touch the network.

use agridesk::api::{ApiClient, ApiError};
use agridesk::config::{Config, HttpConfig};
use agridesk::loader::{find_fpo, load_farmer_dossier};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a config pointing at the mock server
fn create_test_config(base_url: String, token: Option<&str>) -> Config {
    Config {
        api_base_url: base_url,
        api_token: token.map(|t| t.to_string()),
        page_limit: 10,
        http: HttpConfig::default(),
    }
}

fn test_client(server: &MockServer, token: Option<&str>) -> ApiClient {
    let config = create_test_config(server.uri(), token);
    ApiClient::new(&config).unwrap()
}

fn farmer_body(farmer_id: &str) -> serde_json::Value {
    json!({
        "id": "f-123",
        "farmer_id": farmer_id,
        "phone_no": "9876543210",
        "referral_id": null,
        "name": "Ramesh",
        "village": "Kothapalli",
        "status": 2,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T10:00:00Z"
    })
}

fn kyc_body(poi: Option<&str>, poa: Option<&str>) -> serde_json::Value {
    json!({
        "farmer_id": "FARM-9",
        "poi_version_id": poi,
        "poa_version_id": poa,
        "created_at": "2024-03-03T10:00:00Z",
        "updated_at": "2024-03-04T10:00:00Z"
    })
}

fn poi_body() -> serde_json::Value {
    json!({
        "id": "poi-1",
        "name": "Ramesh",
        "name_cs": 0.97,
        "date_of_birth": "1988-06-12",
        "date_of_birth_cs": 0.91,
        "id_number": "XXXX-1234",
        "id_number_cs": 0.99,
        "front_image": "https://img.example/poi-front.jpg",
        "is_verified": true,
        "verification_id": "ver-77"
    })
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test]
async fn test_dossier_chain_skips_poa_when_version_id_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farmers/f-123/"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farmer_body("FARM-9")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/kyc-histories/FARM-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kyc_body(Some("poi-1"), None)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/poi-versions/poi-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(poi_body()))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, Some("test-token"));
    let dossier = load_farmer_dossier(&api, "f-123").await.unwrap();

    assert_eq!(dossier.farmer.farmer_id, "FARM-9");
    assert!(dossier.kyc.is_some());
    assert_eq!(dossier.poi.as_ref().unwrap().id, "poi-1");
    // Null POA version id: the fetch is skipped, not failed
    assert!(dossier.poa.is_none());
    assert_eq!(request_count(&mock_server).await, 3);
}

#[tokio::test]
async fn test_dossier_chain_skips_both_documents_on_empty_version_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farmers/f-123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farmer_body("FARM-9")))
        .mount(&mock_server)
        .await;

    // Empty string counts as absent, same as null
    Mock::given(method("GET"))
        .and(path("/kyc-histories/FARM-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kyc_body(Some(""), None)))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, Some("test-token"));
    let dossier = load_farmer_dossier(&api, "f-123").await.unwrap();

    assert!(dossier.kyc.is_some());
    assert!(dossier.poi.is_none());
    assert!(dossier.poa.is_none());
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn test_dossier_chain_skips_kyc_subtree_without_platform_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farmers/f-123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farmer_body("")))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, Some("test-token"));
    let dossier = load_farmer_dossier(&api, "f-123").await.unwrap();

    assert!(dossier.kyc.is_none());
    assert!(dossier.poi.is_none());
    assert!(dossier.poa.is_none());
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_dossier_chain_aborts_on_first_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farmers/f-123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farmer_body("FARM-9")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/kyc-histories/FARM-9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    // Mounted but must never be hit once the KYC step fails
    Mock::given(method("GET"))
        .and(path("/poi-versions/poi-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(poi_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, Some("test-token"));
    let result = load_farmer_dossier(&api, "f-123").await;

    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Api error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farmers/f-123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farmer_body("FARM-9")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, None);
    let result = load_farmer_dossier(&api, "f-123").await;

    assert!(matches!(result, Err(ApiError::MissingToken)));
    assert_eq!(request_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_empty_identifier_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    let api = test_client(&mock_server, Some("test-token"));
    let result = load_farmer_dossier(&api, "").await;

    assert!(matches!(result, Err(ApiError::MissingIdentifier)));
    assert_eq!(request_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_dossier_resolution_is_idempotent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farmers/f-123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farmer_body("FARM-9")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/kyc-histories/FARM-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kyc_body(Some("poi-1"), None)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/poi-versions/poi-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(poi_body()))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, Some("test-token"));
    let first = load_farmer_dossier(&api, "f-123").await.unwrap();
    let second = load_farmer_dossier(&api, "f-123").await.unwrap();

    assert_eq!(first, second);
}

fn fpo_body(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "fpo_id": format!("FPO-{}", id),
        "constitution": "Producer Company",
        "entity_name": name,
        "no_of_farmers": 120,
        "address": "Main Road",
        "state": "Telangana",
        "district": "Warangal",
        "area_of_operation": 42.5,
        "establishment_year": "2019",
        "major_crop_produced": ["Cotton", "Paddy"],
        "previous_year_turnover": 1500000.0,
        "contact_person_name": "Lakshmi",
        "contact_person_phone": "9000000000",
        "pan_no": "ABCDE1234F",
        "is_pan_copy_collected": true,
        "pan_image": "https://img.example/pan.jpg",
        "is_incorporation_doc_collected": false,
        "is_registration_no_collected": true,
        "registration_no": "REG-77",
        "is_director_shareholder_list_collected": false,
        "active": true,
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_find_fpo_projects_matching_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fpos/"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([fpo_body("fpo-1", "Green Fields"), fpo_body("fpo-2", "Sunrise")])),
        )
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, None);
    let fpo = find_fpo(&api, "fpo-2", 10).await.unwrap();

    assert_eq!(fpo.entity_name, "Sunrise");
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_find_fpo_not_in_page_names_the_missing_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fpos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fpo_body("fpo-1", "Green Fields")])))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, None);
    let error = find_fpo(&api, "fpo-404", 10).await.unwrap_err();

    match &error {
        ApiError::FpoNotFound(id) => assert_eq!(id, "fpo-404"),
        other => panic!("expected FpoNotFound, got {:?}", other),
    }
    assert!(error.to_string().contains("fpo-404"));
}

#[tokio::test]
async fn test_applications_envelope_is_unwrapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/applications/FARM-9"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "app-1", "status": "Approved", "createdAt": "2024-01-05T00:00:00Z"},
                {"_id": "app-2", "status": "Pending", "createdAt": "2024-02-05T00:00:00Z"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, None);
    let applications = api.list_applications("FARM-9", 0, 10).await.unwrap();

    assert_eq!(applications.len(), 2);
    assert_eq!(applications[0].id, "app-1");
    assert_eq!(applications[1].status, "Pending");
}

#[tokio::test]
async fn test_fpo_listing_surfaces_api_error_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fpos/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&mock_server)
        .await;

    let api = test_client(&mock_server, None);
    let error = api.list_fpos(0, 10).await.unwrap_err();

    let message = error.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("maintenance window"));
}
