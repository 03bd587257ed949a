// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use axum::async_trait;
use axum::body::Body;
use axum::extract::{FromRequestParts, Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::Mutex;
use tokio_util::io::ReaderStream;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use ultranode_kernel::error::KernelError;
use ultranode_kernel::types::account::InitParams;
use ultranode_kernel::types::id::Identity;

use crate::api::*;
use crate::engine::Engine;
use crate::errors::EngineError;

pub type SharedEngine = Arc<Mutex<Engine>>;

/// Header carrying the caller's proven identity as 64 hex chars.
pub const SIGNER_HEADER: &str = "x-ultranode-signer";

/// The identity that signed this request.
pub struct Signer(pub Identity);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Signer {
    type Rejection = EngineError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SIGNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(EngineError::MissingSigner)?;
        parse_identity(SIGNER_HEADER, raw)
            .map(Signer)
            .map_err(|_| EngineError::MissingSigner)
    }
}

async fn auth_guard(
    State(token): State<Arc<String>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    match provided {
        Some(p) if p == token.as_str() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

pub fn build_router(state: SharedEngine, auth_token: Option<String>) -> Router {
    let mut app = Router::new()
        .route("/v1/initialize", post(initialize))
        .route("/v1/roots", post(publish_root))
        .route("/v1/roots/:root", get(get_root))
        .route("/v1/proofs", post(submit_proof))
        .route("/v1/nodes/uptime", post(record_uptime))
        .route("/v1/nodes/claim", post(claim_rewards))
        .route("/v1/nodes/:owner", get(get_node))
        .route("/v1/proof/state", get(get_proof))
        .route("/v1/snapshot/save", post(snapshot_save))
        .route("/v1/snapshot/download", get(snapshot_download))
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    if let Some(token) = auth_token {
        tracing::info!("Auth Enabled: Bearer token required");
        app = app.layer(from_fn_with_state(Arc::new(token), auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    app.layer(CorsLayer::permissive()).layer(TraceLayer::new_for_http())
}

async fn initialize(
    State(state): State<SharedEngine>,
    Signer(signer): Signer,
    Json(req): Json<InitializeRequest>,
) -> Result<Json<ConfigResponse>, EngineError> {
    let defaults = InitParams::default();
    let params = InitParams {
        hash: match req.hash.as_deref() {
            Some(h) => h.parse().map_err(|_| EngineError::InvalidInput(format!("unknown hash {:?}", h)))?,
            None => defaults.hash,
        },
        publish_policy: match req.publish_policy.as_deref() {
            Some(p) => p.parse().map_err(|_| EngineError::InvalidInput(format!("unknown policy {:?}", p)))?,
            None => defaults.publish_policy,
        },
        max_proof_depth: req.max_proof_depth.unwrap_or(defaults.max_proof_depth),
    };
    let admin = parse_identity("admin", &req.admin)?;

    let mut engine = state.lock().await;
    let cfg = engine.initialize(signer, admin, params)?;
    Ok(Json(ConfigResponse::from(&cfg)))
}

async fn publish_root(
    State(state): State<SharedEngine>,
    Signer(signer): Signer,
    Json(req): Json<PublishRootRequest>,
) -> Result<Json<AcceptedRootResponse>, EngineError> {
    let root = parse_hash32("root", &req.root)?;
    let authority = match &req.authority {
        Some(a) => parse_identity("authority", a)?,
        None => signer,
    };

    let mut engine = state.lock().await;
    let entry = engine.publish_root(signer, root, req.slot, authority)?;
    Ok(Json(AcceptedRootResponse::from(&entry)))
}

async fn get_root(
    State(state): State<SharedEngine>,
    Path(root): Path<String>,
) -> Result<Json<AcceptedRootResponse>, EngineError> {
    let root = parse_hash32("root", &root)?;
    let engine = state.lock().await;
    let entry = engine.get_root(&root).ok_or(KernelError::UnknownRoot)?;
    Ok(Json(AcceptedRootResponse::from(entry)))
}

async fn submit_proof(
    State(state): State<SharedEngine>,
    Signer(signer): Signer,
    Json(req): Json<SubmitProofRequest>,
) -> Result<Json<NodeRecordResponse>, EngineError> {
    let tx_hash = parse_hash32("tx_hash", &req.tx_hash)?;
    let root = parse_hash32("root", &req.root)?;
    let siblings = req
        .proof
        .iter()
        .map(|s| parse_hash32("proof", s))
        .collect::<Result<Vec<_>, _>>()?;
    let submitter = match &req.submitter {
        Some(s) => parse_identity("submitter", s)?,
        None => signer,
    };

    let mut engine = state.lock().await;
    let record = engine.submit_proof(signer, tx_hash, root, req.index, siblings, submitter)?;
    Ok(Json(NodeRecordResponse::from(&record)))
}

async fn get_node(
    State(state): State<SharedEngine>,
    Path(owner): Path<String>,
) -> Result<Json<NodeRecordResponse>, EngineError> {
    let owner = parse_identity("owner", &owner)?;
    let engine = state.lock().await;
    let record = engine.get_node(&owner).ok_or(KernelError::NodeNotFound)?;
    Ok(Json(NodeRecordResponse::from(record)))
}

fn action_owner(req: &NodeActionRequest, signer: Identity) -> Result<Identity, EngineError> {
    match &req.owner {
        Some(o) => parse_identity("owner", o),
        None => Ok(signer),
    }
}

async fn record_uptime(
    State(state): State<SharedEngine>,
    Signer(signer): Signer,
    Json(req): Json<NodeActionRequest>,
) -> Result<Json<NodeRecordResponse>, EngineError> {
    let owner = action_owner(&req, signer)?;
    let mut engine = state.lock().await;
    let record = engine.record_uptime(signer, owner)?;
    Ok(Json(NodeRecordResponse::from(&record)))
}

async fn claim_rewards(
    State(state): State<SharedEngine>,
    Signer(signer): Signer,
    Json(req): Json<NodeActionRequest>,
) -> Result<Json<ClaimResponse>, EngineError> {
    let owner = action_owner(&req, signer)?;
    let mut engine = state.lock().await;
    let amount = engine.claim_rewards(signer, owner)?;
    let total = engine.get_node(&owner).map(|n| n.rewards_claimed).unwrap_or(amount);
    Ok(Json(ClaimResponse {
        owner: hex::encode(owner.as_bytes()),
        amount,
        rewards_claimed: total,
    }))
}

async fn get_proof(State(state): State<SharedEngine>) -> Result<Json<ProofResponse>, EngineError> {
    let engine = state.lock().await;
    let proof = engine.get_proof()?;
    Ok(Json(ProofResponse::from(&proof)))
}

async fn snapshot_save(
    State(state): State<SharedEngine>,
    Json(req): Json<SnapshotSaveRequest>,
) -> Result<Json<SnapshotSaveResponse>, EngineError> {
    let mut engine = state.lock().await;
    let path = req.path.map(std::path::PathBuf::from);
    let used_path = engine.save_snapshot(path.as_deref())?;
    let size_bytes = tokio::fs::metadata(&used_path).await?.len();

    Ok(Json(SnapshotSaveResponse {
        success: true,
        path: used_path.to_string_lossy().to_string(),
        size_bytes,
    }))
}

/// Streams the saved snapshot file when there is one, otherwise encodes the
/// live state.
async fn snapshot_download(State(state): State<SharedEngine>) -> Result<Body, EngineError> {
    let (saved, fresh) = {
        let engine = state.lock().await;
        match engine.snapshot_path.clone().filter(|p| p.exists()) {
            Some(path) => (Some(path), None),
            None => (None, Some(engine.snapshot()?)),
        }
    };

    match (saved, fresh) {
        (Some(path), _) => {
            let file = tokio::fs::File::open(&path).await?;
            Ok(Body::from_stream(ReaderStream::new(file)))
        }
        (None, Some(bytes)) => Ok(Body::from(bytes)),
        (None, None) => Err(EngineError::Internal),
    }
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
