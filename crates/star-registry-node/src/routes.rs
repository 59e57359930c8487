//! HTTP routes for challenges, star submissions, lookups and chain audits.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use star_registry::store::MemoryStore;
use star_registry::{AuthError, Block, BlockHash, Ledger, LedgerError, WalletAddress};

/// Shared application state passed to axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger<MemoryStore>>,
}

impl AppState {
    pub fn new(ledger: Ledger<MemoryStore>) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

/// Handler errors, each mapped to one status code.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Auth(AuthError::MalformedChallenge(_)) => Self::BadRequest(e.to_string()),
            LedgerError::Auth(_) => Self::Unauthorized(e.to_string()),
            other => {
                error!(error = %other, "ledger operation failed");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Block Not Found!".to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
        .into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Wire form of a block: hashes and body bytes as hex.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockView {
    pub height: u64,
    pub timestamp: i64,
    pub previous_hash: Option<String>,
    pub hash: String,
    pub body: String,
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        Self {
            height: block.height,
            timestamp: block.timestamp,
            previous_hash: block.previous_hash.as_ref().map(BlockHash::to_hex),
            hash: block.hash.to_hex(),
            body: hex::encode(&block.body),
        }
    }
}

fn found(block: Option<Block>) -> ApiResult<BlockView> {
    block
        .map(|b| Json(BlockView::from(&b)))
        .ok_or(ApiError::NotFound)
}

/// GET /height
#[derive(Serialize, Deserialize)]
pub struct HeightResp {
    pub height: u64,
}
pub async fn height(State(state): State<AppState>) -> ApiResult<HeightResp> {
    let height = state.ledger.get_height().await?;
    Ok(Json(HeightResp { height }))
}

/// GET /block/height/:height
pub async fn block_by_height(
    State(state): State<AppState>,
    Path(height): Path<u64>,
) -> ApiResult<BlockView> {
    found(state.ledger.get_by_height(height).await?)
}

/// GET /block/hash/:hash
pub async fn block_by_hash(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> ApiResult<BlockView> {
    let hash = BlockHash::from_hex(&hash)
        .map_err(|_| ApiError::BadRequest(format!("invalid block hash: {hash}")))?;
    found(state.ledger.get_by_hash(&hash).await?)
}

/// POST /requestValidation: returns the challenge message to sign.
#[derive(Deserialize)]
pub struct ValidationRequest {
    pub address: String,
}
pub async fn request_validation(
    State(state): State<AppState>,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> ApiResult<String> {
    let Json(req) = payload?;
    if req.address.trim().is_empty() {
        return Err(ApiError::BadRequest("address must not be empty".into()));
    }
    let address = WalletAddress::new(req.address);
    Ok(Json(state.ledger.request_challenge(&address)))
}

/// POST /submitstar
#[derive(Deserialize)]
pub struct StarSubmission {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub star: Value,
}
pub async fn submit_star(
    State(state): State<AppState>,
    payload: Result<Json<StarSubmission>, JsonRejection>,
) -> ApiResult<BlockView> {
    let Json(sub) = payload?;
    let address = WalletAddress::new(sub.address);
    let block = state
        .ledger
        .submit_entry(&address, &sub.message, &sub.signature, sub.star)
        .await?;
    Ok(Json(BlockView::from(&block)))
}

/// GET /blocks/:address: star payloads owned by the address.
pub async fn blocks_by_owner(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<Vec<Value>> {
    let address = WalletAddress::new(address);
    Ok(Json(state.ledger.get_entries_by_owner(&address).await?))
}

/// GET /validateChain: returns { ok, errors[] }
#[derive(Serialize, Deserialize)]
pub struct ValidateResp {
    pub ok: bool,
    pub errors: Vec<String>,
}
pub async fn validate_chain(State(state): State<AppState>) -> ApiResult<ValidateResp> {
    let errors: Vec<String> = state
        .ledger
        .validate()
        .await?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(Json(ValidateResp {
        ok: errors.is_empty(),
        errors,
    }))
}

/// GET /health
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
