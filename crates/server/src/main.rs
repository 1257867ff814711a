// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use procura_api::{
    ApiError, AuthenticatedActor, BidView, CategoryView, CreateTenderRequest,
    DeleteTenderRequest, DeleteTenderResponse, ListRequest, RejectBidRequest, Role,
    SubmitBidRequest, SubmitBidResponse, TenderView, UpdateTenderRequest,
    UploadAttachmentsRequest, UploadAttachmentsResponse, WithdrawBidRequest, accept_bid,
    archive_tender, authenticate_stub, create_tender, delete_tender, get_tender, list_bids,
    list_categories, list_tenders, reject_bid, remove_bid_attachment, submit_bid,
    unarchive_tender, update_bid, update_tender, upload_bid_attachments, withdraw_bid,
};
use procura_audit::Cause;
use procura_core::SystemClock;
use procura_store::{Collection, Envelope, MemoryStore, SequentialUploader};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Procura Server - HTTP server for the Procura tender portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The in-memory store is wrapped in a Mutex to allow safe concurrent
/// access. The lock is held only for the duration of one operation;
/// concurrency control between operations is the store's compare-and-set
/// obligation, not this lock.
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<MemoryStore>>,
    uploader: Arc<Mutex<SequentialUploader>>,
}

/// Caller identity and attribution fields carried on every write request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorInfo {
    /// The actor ID performing this action.
    actor_id: i64,
    /// The role of the actor: "admin", "buyer", or "vendor".
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorInfo {
    fn authenticate(&self) -> Result<AuthenticatedActor, HttpError> {
        let role = parse_role(&self.actor_role)?;
        authenticate_stub(self.actor_id, role).map_err(|e| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: e.to_string(),
        })
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// API request for creating a tender.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTenderApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    tender: CreateTenderRequest,
}

/// API request for updating a tender.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateTenderApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    patch: UpdateTenderRequest,
}

/// API request for archive, unarchive, and accept operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActionApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
}

/// API request for deleting a tender.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DeleteTenderApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    /// Must be true; deletion destroys the tender's bids.
    #[serde(default)]
    confirm_bid_destruction: bool,
}

/// API request for submitting a bid.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitBidApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    /// The vendor the bid belongs to.
    vendor_id: i64,
    #[serde(flatten)]
    bid: SubmitBidRequest,
}

/// API request for updating a bid.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateBidApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    bid: SubmitBidRequest,
}

/// API request for uploading bid attachments.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UploadBidAttachmentsApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    upload: UploadAttachmentsRequest,
}

/// API request for rejecting a bid.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RejectBidApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    /// Optional rejection reason, recorded on the audit trail.
    #[serde(default)]
    reason: Option<String>,
}

/// API request for withdrawing a bid.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WithdrawBidApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    /// Optional withdrawal reason, recorded on the bid.
    #[serde(default)]
    reason: Option<String>,
}

/// Query parameters for list endpoints.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// 1-based page number.
    page: Option<u64>,
    /// Page size.
    limit: Option<u64>,
}

impl ListQuery {
    fn into_request(self) -> ListRequest {
        let defaults = ListRequest::default();
        ListRequest {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DeadlinePassed { .. } | ApiError::UploadRejected { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "buyer" => Ok(Role::Buyer),
        "vendor" => Ok(Role::Vendor),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!(
                "Invalid role: '{role_str}'. Must be 'admin', 'buyer', or 'vendor'"
            ),
        }),
    }
}

/// Handler for POST `/tenders`.
async fn handle_create_tender(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTenderApiRequest>,
) -> Result<Json<Envelope<TenderView>>, HttpError> {
    info!(actor_id = req.actor.actor_id, "Handling create_tender request");

    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = create_tender(&mut *store, &SystemClock, req.tender, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for GET `/tenders`.
async fn handle_list_tenders(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Envelope<Collection<TenderView>>> {
    let store = app_state.store.lock().await;
    let page = list_tenders(&*store, query.into_request());
    Json(Envelope::success(page))
}

/// Handler for GET `/tenders/{id}`.
async fn handle_get_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
) -> Result<Json<Envelope<TenderView>>, HttpError> {
    let store = app_state.store.lock().await;
    let view = get_tender(&*store, tender_id)?;
    Ok(Json(Envelope::success(view)))
}

/// Handler for PUT `/tenders/{id}`.
async fn handle_update_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Json(req): Json<UpdateTenderApiRequest>,
) -> Result<Json<Envelope<TenderView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = update_tender(&mut *store, &SystemClock, tender_id, req.patch, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for POST `/tenders/{id}/archive`.
async fn handle_archive_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Json(req): Json<ActionApiRequest>,
) -> Result<Json<Envelope<TenderView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = archive_tender(&mut *store, &SystemClock, tender_id, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for POST `/tenders/{id}/unarchive`.
async fn handle_unarchive_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Json(req): Json<ActionApiRequest>,
) -> Result<Json<Envelope<TenderView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = unarchive_tender(&mut *store, &SystemClock, tender_id, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for DELETE `/tenders/{id}`.
async fn handle_delete_tender(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Json(req): Json<DeleteTenderApiRequest>,
) -> Result<Json<Envelope<DeleteTenderResponse>>, HttpError> {
    info!(actor_id = req.actor.actor_id, tender_id, "Handling delete_tender request");

    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();
    let request = DeleteTenderRequest {
        confirm_bid_destruction: req.confirm_bid_destruction,
    };

    let mut store = app_state.store.lock().await;
    let result = delete_tender(&mut *store, &SystemClock, tender_id, &request, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for GET `/tenders/{id}/bids`.
async fn handle_list_bids(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> Json<Envelope<Collection<BidView>>> {
    let store = app_state.store.lock().await;
    let page = list_bids(&*store, tender_id, query.into_request());
    Json(Envelope::success(page))
}

/// Handler for POST `/tenders/{id}/bids`.
async fn handle_submit_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(tender_id): Path<i64>,
    Json(req): Json<SubmitBidApiRequest>,
) -> Result<Json<Envelope<SubmitBidResponse>>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        tender_id,
        vendor_id = req.vendor_id,
        "Handling submit_bid request"
    );

    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = submit_bid(
        &mut *store,
        &SystemClock,
        tender_id,
        req.vendor_id,
        req.bid,
        &actor,
        cause,
    )?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for PUT `/bids/{id}`.
async fn handle_update_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Json(req): Json<UpdateBidApiRequest>,
) -> Result<Json<Envelope<BidView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = update_bid(&mut *store, &SystemClock, bid_id, req.bid, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for POST `/bids/{id}/accept`.
async fn handle_accept_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Json(req): Json<ActionApiRequest>,
) -> Result<Json<Envelope<BidView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = accept_bid(&mut *store, &SystemClock, bid_id, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for POST `/bids/{id}/reject`.
async fn handle_reject_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Json(req): Json<RejectBidApiRequest>,
) -> Result<Json<Envelope<BidView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();
    let request = RejectBidRequest { reason: req.reason };

    let mut store = app_state.store.lock().await;
    let result = reject_bid(&mut *store, &SystemClock, bid_id, request, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for POST `/bids/{id}/withdraw`.
async fn handle_withdraw_bid(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Json(req): Json<WithdrawBidApiRequest>,
) -> Result<Json<Envelope<BidView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();
    let request = WithdrawBidRequest { reason: req.reason };

    let mut store = app_state.store.lock().await;
    let result = withdraw_bid(&mut *store, &SystemClock, bid_id, request, &actor, cause)?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for POST `/bids/{id}/attachments`.
async fn handle_upload_bid_attachments(
    AxumState(app_state): AxumState<AppState>,
    Path(bid_id): Path<i64>,
    Json(req): Json<UploadBidAttachmentsApiRequest>,
) -> Result<Json<Envelope<UploadAttachmentsResponse>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let mut uploader = app_state.uploader.lock().await;
    let result = upload_bid_attachments(
        &mut *store,
        &SystemClock,
        &mut *uploader,
        bid_id,
        &req.upload.files,
        &actor,
        cause,
    )?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for DELETE `/bids/{id}/attachments/{attachment_id}`.
async fn handle_remove_bid_attachment(
    AxumState(app_state): AxumState<AppState>,
    Path((bid_id, attachment_id)): Path<(i64, String)>,
    Json(req): Json<ActionApiRequest>,
) -> Result<Json<Envelope<BidView>>, HttpError> {
    let actor = req.actor.authenticate()?;
    let cause = req.actor.cause();

    let mut store = app_state.store.lock().await;
    let result = remove_bid_attachment(
        &mut *store,
        &SystemClock,
        bid_id,
        &attachment_id,
        &actor,
        cause,
    )?;

    Ok(Json(Envelope::success(result.response)))
}

/// Handler for GET `/categories`.
async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Envelope<Vec<CategoryView>>> {
    let store = app_state.store.lock().await;
    Json(Envelope::success(list_categories(&*store)))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tenders", post(handle_create_tender))
        .route("/tenders", get(handle_list_tenders))
        .route("/tenders/{tender_id}", get(handle_get_tender))
        .route("/tenders/{tender_id}", put(handle_update_tender))
        .route("/tenders/{tender_id}", delete(handle_delete_tender))
        .route("/tenders/{tender_id}/archive", post(handle_archive_tender))
        .route(
            "/tenders/{tender_id}/unarchive",
            post(handle_unarchive_tender),
        )
        .route("/tenders/{tender_id}/bids", get(handle_list_bids))
        .route("/tenders/{tender_id}/bids", post(handle_submit_bid))
        .route("/bids/{bid_id}", put(handle_update_bid))
        .route("/bids/{bid_id}/accept", post(handle_accept_bid))
        .route("/bids/{bid_id}/reject", post(handle_reject_bid))
        .route("/bids/{bid_id}/withdraw", post(handle_withdraw_bid))
        .route(
            "/bids/{bid_id}/attachments",
            post(handle_upload_bid_attachments),
        )
        .route(
            "/bids/{bid_id}/attachments/{attachment_id}",
            delete(handle_remove_bid_attachment),
        )
        .route("/categories", get(handle_list_categories))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Procura Server");

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(MemoryStore::new())),
        uploader: Arc::new(Mutex::new(SequentialUploader::new())),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
