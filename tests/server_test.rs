//! Route-level tests for the REST surface.
//!
//! Each test drives the router directly with `tower::ServiceExt::oneshot`
//! against an in-memory store and a wiremock upstream.
#![cfg(feature = "server")]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rotom::server::config::LimitsConfig;
use rotom::server::{AppState, router};
use rotom::{CacheConfig, EnrichmentCache, PokeApiClient, TeamEnricher, TeamStore};

fn app(upstream: &str) -> Router {
    let store = Arc::new(TeamStore::in_memory().unwrap());
    let cache = Arc::new(EnrichmentCache::new(
        &CacheConfig::default(),
        Arc::new(PokeApiClient::with_base_url(upstream)),
    ));
    let enricher = Arc::new(TeamEnricher::new(cache));
    router(AppState { store, enricher }, &LimitsConfig::default())
}

fn pokemon_payload(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "types": [{"slot": 1, "type": {"name": "water", "url": ""}}],
        "sprites": {"front_default": format!("https://sprites.example/{id}.png")},
        "stats": [{"base_stat": 43, "effort": 0, "stat": {"name": "speed", "url": ""}}]
    })
}

async fn mount_pokemon(server: &MockServer, id: u32, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(pokemon_payload(id, name)))
        .mount(server)
        .await;
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(request_method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(request_method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let server = MockServer::start().await;
    let response = app(&server.uri()).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_team_returns_created() {
    let server = MockServer::start().await;
    let response = app(&server.uri())
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "water-gym", "members": ["squirtle", 131]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "water-gym");
    assert_eq!(body["members"], json!(["squirtle", 131]));
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_duplicate_name_conflicts() {
    let server = MockServer::start().await;
    let app = app(&server.uri());

    let draft = json!({"name": "taken", "members": ["pikachu"]});
    let first = app
        .clone()
        .oneshot(json_request("POST", "/teams", draft.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/teams", draft))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_invalid_team_is_bad_request() {
    let server = MockServer::start().await;
    let members: Vec<u32> = (1..=7).collect();
    let response = app(&server.uri())
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "overfull", "members": members}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_team_is_not_found() {
    let server = MockServer::start().await;
    let response = app(&server.uri()).oneshot(get("/teams/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_team_returns_enriched_members_in_order() {
    let server = MockServer::start().await;
    mount_pokemon(&server, 4, "charmander").await;
    mount_pokemon(&server, 7, "squirtle").await;
    let app = app(&server.uri());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "duo", "members": ["charmander", "squirtle"]}),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = app.oneshot(get(&format!("/teams/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "duo");
    assert_eq!(body["members"][0]["name"], "charmander");
    assert_eq!(body["members"][0]["types"], json!(["water"]));
    assert_eq!(body["members"][1]["name"], "squirtle");
    assert_eq!(body["members"][1]["stats"][0], json!({"name": "speed", "value": 43}));
}

#[tokio::test]
async fn upstream_missing_pokemon_maps_to_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = app(&server.uri());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "glitch", "members": ["missingno"]}),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = app.oneshot(get(&format!("/teams/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("missingno"));
}

#[tokio::test]
async fn upstream_outage_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app(&server.uri());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "electric", "members": ["pikachu"]}),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = app.oneshot(get(&format!("/teams/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn update_replaces_the_team() {
    let server = MockServer::start().await;
    let app = app(&server.uri());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "before", "members": ["pikachu"]}),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/teams/{id}"),
            json!({"name": "after", "members": ["eevee", "snorlax"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "after");

    // PATCH shares the full-replace handler.
    let patched = app
        .oneshot(json_request(
            "PATCH",
            &format!("/teams/{id}"),
            json!({"name": "patched", "members": ["eevee"]}),
        ))
        .await
        .unwrap();
    assert_eq!(patched.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_missing_team_is_not_found() {
    let server = MockServer::start().await;
    let response = app(&server.uri())
        .oneshot(json_request(
            "PUT",
            "/teams/404",
            json!({"name": "ghost", "members": ["gastly"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let server = MockServer::start().await;
    let app = app(&server.uri());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/teams",
            json!({"name": "doomed", "members": ["magikarp"]}),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/teams/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&format!("/teams/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_pagination_envelope() {
    let server = MockServer::start().await;
    let app = app(&server.uri());

    for name in ["one", "two", "three"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/teams",
                json!({"name": name, "members": ["pikachu"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/teams?page=1&limit=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "limit": 2, "total": 3, "total_pages": 2})
    );
}
