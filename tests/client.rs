mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::json;

use common::{city_walk, spawn_engine, spawn_router, unreachable_client, RecordingHooks};
use routebook::api::RouteAPI;
use routebook::entities::{Route, RoutePatch, RouteType, Tag};
use routebook::error::Error;

#[tokio::test]
async fn create_then_list_test() {
    let (client, _) = spawn_engine();

    let route = city_walk();
    let created = client.create_route(route.clone()).await.unwrap();

    let id = created.id.clone().expect("server assigns an id");
    assert_eq!(created.title, "City Walk");
    assert_eq!(created.route_type, RouteType::Historical);
    assert!(!created.is_draft);
    assert_eq!(created.points, route.points);

    let routes = client.get_routes().await.unwrap();
    let listed = routes
        .iter()
        .find(|r| r.id.as_deref() == Some(id.as_str()))
        .expect("created route is listed");

    assert_eq!(listed.points, route.points);
    assert_eq!(listed.tags.iter().copied().collect::<Vec<_>>(), vec![Tag::Free]);
    assert_eq!(listed, &created);
}

#[tokio::test]
async fn drafts_are_not_blocked_test() {
    let (client, engine) = spawn_engine();

    let empty = Route::new("", RouteType::Nature);
    let mut single = Route::new("", RouteType::Food);
    single.points = vec![common::point("Market", 41.0, 28.9, 0)];
    single.is_draft = true;

    client.create_route(empty).await.unwrap();
    let created = client.create_route(single).await.unwrap();

    assert!(created.is_draft);
    assert_eq!(created.points.len(), 1);
    assert_eq!(engine.len().await, 2);
}

#[tokio::test]
async fn client_supplied_id_is_not_sent_test() {
    let (client, _) = spawn_engine();

    let mut route = city_walk();
    route.id = Some("local-only".into());
    let created = client.create_route(route).await.unwrap();

    assert_ne!(created.id.as_deref(), Some("local-only"));
}

#[tokio::test]
async fn favorite_update_is_idempotent_test() {
    let (client, _) = spawn_engine();
    let created = client.create_route(city_walk()).await.unwrap();
    let id = created.id.clone().unwrap();

    let first = client
        .update_route(&id, RoutePatch::favorite(true))
        .await
        .unwrap();
    let second = client
        .update_route(&id, RoutePatch::favorite(true))
        .await
        .unwrap();

    assert!(first.is_favorite);
    assert_eq!(first, second);

    let routes = client.get_routes().await.unwrap();
    assert_eq!(routes, vec![second]);
}

#[tokio::test]
async fn partial_update_leaves_other_fields_test() {
    let (client, _) = spawn_engine();
    let mut route = city_walk();
    route.rating = Some(4.8);
    let created = client.create_route(route).await.unwrap();

    let patch = RoutePatch {
        title: Some("Old City Walk".into()),
        ..Default::default()
    };
    let updated = client
        .update_route(created.id.as_deref().unwrap(), patch)
        .await
        .unwrap();

    assert_eq!(updated.title, "Old City Walk");
    assert_eq!(updated.rating, Some(4.8));
    assert_eq!(updated.points, created.points);
}

#[tokio::test]
async fn delete_twice_surfaces_not_found_test() {
    let (client, _) = spawn_engine();
    let created = client.create_route(city_walk()).await.unwrap();
    let id = created.id.unwrap();

    client.delete_route(&id).await.unwrap();

    let err = client.delete_route(&id).await.unwrap_err();
    match &err {
        Error::Http { status, body } => {
            assert_eq!(*status, 404);
            assert_eq!(body.as_ref().unwrap()["code"], json!(101));
        }
        other => panic!("expected http error, got {:?}", other),
    }
    assert!(err.is_not_found());

    // the client is still usable afterwards
    assert!(client.get_routes().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_unknown_route_test() {
    let (client, _) = spawn_engine();

    let err = client
        .update_route("missing", RoutePatch::favorite(true))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn timeout_is_distinct_test() {
    let router = Router::new().route(
        "/api/routes",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(Vec::<Route>::new())
        }),
    );
    let client = spawn_router(router, Duration::from_millis(200));

    let err = client.get_routes().await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_server_is_network_error_test() {
    let client = unreachable_client();

    let err = client.get_routes().await.unwrap_err();

    assert!(matches!(err, Error::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn json_headers_on_every_request_test() {
    fn json_headers(headers: &HeaderMap) -> bool {
        let is_json = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.starts_with("application/json"))
                .unwrap_or(false)
        };
        is_json(header::CONTENT_TYPE) && is_json(header::ACCEPT)
    }

    let router = Router::new()
        .route(
            "/api/routes",
            get(|headers: HeaderMap| async move {
                if json_headers(&headers) {
                    (StatusCode::OK, Json(json!([])))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": "headers" })))
                }
            }),
        )
        .route(
            "/api/routes/:id",
            delete(|headers: HeaderMap| async move {
                if json_headers(&headers) {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
    let client = spawn_router(router, Duration::from_secs(5));

    assert!(client.get_routes().await.unwrap().is_empty());
    client.delete_route("abc").await.unwrap();
}

#[tokio::test]
async fn non_json_error_body_test() {
    let router = Router::new().route(
        "/api/routes",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let client = spawn_router(router, Duration::from_secs(5));

    let err = client.get_routes().await.unwrap_err();

    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, Some(json!("upstream unavailable")));
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_is_decode_error_test() {
    let router = Router::new().route(
        "/api/routes",
        get(|| async { Json(json!({ "routes": "not a list" })) }),
    );
    let client = spawn_router(router, Duration::from_secs(5));

    let err = client.get_routes().await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn hooks_observe_each_round_trip_test() {
    let (client, _) = spawn_engine();
    let hooks = Arc::new(RecordingHooks::default());
    let client = client.with_hooks(hooks.clone());

    let created = client.create_route(city_walk()).await.unwrap();
    let id = created.id.unwrap();
    client.delete_route(&id).await.unwrap();
    client.delete_route(&id).await.unwrap_err();

    let route_path = format!("/api/routes/{}", id);
    assert_eq!(
        hooks.events(),
        vec![
            "request POST /api/routes".to_string(),
            "response 201 POST /api/routes".to_string(),
            format!("request DELETE {}", route_path),
            format!("response 204 DELETE {}", route_path),
            format!("request DELETE {}", route_path),
            format!("error DELETE {}: 4", route_path),
        ]
    );
}

#[tokio::test]
async fn concurrent_calls_test() {
    let (client, engine) = spawn_engine();

    let (a, b) = tokio::join!(
        client.create_route(city_walk()),
        client.create_route(city_walk())
    );

    assert_ne!(a.unwrap().id, b.unwrap().id);
    assert_eq!(engine.len().await, 2);
}
