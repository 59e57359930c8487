//! # Star Registry Node
//!
//! HTTP adapter over an in-memory [`Ledger`](star_registry::Ledger).
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/height` | `{"height": n}` |
//! | GET | `/block/height/:height` | block JSON, 404 when absent |
//! | GET | `/block/hash/:hash` | block JSON, 404 when absent |
//! | POST | `/requestValidation` | challenge message to sign |
//! | POST | `/submitstar` | the new block, 401 when verification fails |
//! | GET | `/blocks/:address` | star payloads owned by the address |
//! | GET | `/validateChain` | `{"ok": bool, "errors": [..]}` |
//! | GET | `/health` | `{"status": "ok"}` |

pub mod config;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};

pub use config::{init_tracing, NodeArgs};
pub use routes::AppState;

/// Build the router with every endpoint wired to `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/height", get(routes::height))
        .route("/block/height/:height", get(routes::block_by_height))
        .route("/block/hash/:hash", get(routes::block_by_hash))
        .route("/requestValidation", post(routes::request_validation))
        .route("/submitstar", post(routes::submit_star))
        .route("/blocks/:address", get(routes::blocks_by_owner))
        .route("/validateChain", get(routes::validate_chain))
        .route("/health", get(routes::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use star_registry::store::MemoryStore;
    use star_registry::{Ledger, LedgerConfig};
    use star_registry_testkit::TestWallet;

    use crate::routes::BlockView;

    async fn test_app() -> Router {
        let ledger = Ledger::new(MemoryStore::new(), LedgerConfig::default())
            .await
            .unwrap();
        app(AppState::new(ledger))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, req).await
    }

    async fn challenge(app: &Router, wallet: &TestWallet) -> String {
        let (status, body) = post_json(
            app,
            "/requestValidation",
            json!({ "address": wallet.address.as_str() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    async fn submit(app: &Router, wallet: &TestWallet, star: Value) -> (StatusCode, Vec<u8>) {
        let message = challenge(app, wallet).await;
        post_json(
            app,
            "/submitstar",
            json!({
                "address": wallet.address.as_str(),
                "message": message,
                "signature": wallet.sign(&message),
                "star": star,
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_health_and_height() {
        let app = test_app().await;

        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"status": "ok"}));

        let (status, body) = get(&app, "/height").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"height": 0}));
    }

    #[tokio::test]
    async fn test_genesis_block_json() {
        let app = test_app().await;

        let (status, body) = get(&app, "/block/height/0").await;
        assert_eq!(status, StatusCode::OK);
        let genesis: BlockView = serde_json::from_slice(&body).unwrap();
        assert_eq!(genesis.height, 0);
        assert_eq!(genesis.previous_hash, None);

        let (status, body) = get(&app, &format!("/block/hash/{}", genesis.hash)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<BlockView>(&body).unwrap(), genesis);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_lookups() {
        let app = test_app().await;

        let (status, body) = get(&app, "/block/height/7").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Block Not Found!");

        let (status, _) = get(&app, &format!("/block/hash/{}", "00".repeat(32))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&app, "/block/hash/not-hex").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(&app, "/block/height/minus-one").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_star_flow() {
        let app = test_app().await;
        let wallet = TestWallet::from_seed(1);

        let (status, body) = submit(&app, &wallet, json!({"dec": "1", "ra": "2"})).await;
        assert_eq!(status, StatusCode::OK);
        let block: BlockView = serde_json::from_slice(&body).unwrap();
        assert_eq!(block.height, 1);

        let (_, body) = get(&app, "/block/height/0").await;
        let genesis: BlockView = serde_json::from_slice(&body).unwrap();
        assert_eq!(block.previous_hash, Some(genesis.hash));

        let (_, body) = get(&app, &format!("/blocks/{}", wallet.address)).await;
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!([{"dec": "1", "ra": "2"}])
        );

        let (_, body) = get(&app, "/validateChain").await;
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({"ok": true, "errors": []})
        );
    }

    #[tokio::test]
    async fn test_submit_with_wrong_signer_is_unauthorized() {
        let app = test_app().await;
        let owner = TestWallet::from_seed(1);
        let impostor = TestWallet::from_seed(2);

        let message = challenge(&app, &owner).await;
        let (status, _) = post_json(
            &app,
            "/submitstar",
            json!({
                "address": owner.address.as_str(),
                "message": message,
                "signature": impostor.sign(&message),
                "star": {"story": "x"},
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = get(&app, "/height").await;
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"height": 0}));
    }

    #[tokio::test]
    async fn test_stale_challenge_is_unauthorized() {
        let app = test_app().await;
        let wallet = TestWallet::from_seed(1);
        let message = format!("{}:{}:starRegistry", wallet.address, 1_000);

        let (status, body) = post_json(
            &app,
            "/submitstar",
            json!({
                "address": wallet.address.as_str(),
                "message": message,
                "signature": wallet.sign(&message),
                "star": {},
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(String::from_utf8(body).unwrap().contains("window"));
    }

    #[tokio::test]
    async fn test_malformed_requests_are_bad_requests() {
        let app = test_app().await;

        let (status, _) = post_json(&app, "/submitstar", json!({"address": "a"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(&app, "/requestValidation", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(&app, "/requestValidation", json!({"address": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            &app,
            "/submitstar",
            json!({"address": "a", "message": "no-timestamp", "signature": "00", "star": {}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
