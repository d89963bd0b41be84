//! HTTP transport - maps sticker routes onto data accessor operations.
//!
//! ## Routes
//!
//! - `GET /health` - health check returning `{ "ok": true }`.
//! - `GET /stickers?sort=&asc=&size=&page=` - one page of stickers.
//! - `POST /stickers` - create a sticker; 409 if the title is taken.
//! - `GET /stickers/:id` - fetch one sticker.
//! - `PATCH /stickers/:id` - apply a JSON Patch document.
//! - `DELETE /stickers/:id` - delete one sticker.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use super::error::ApiError;
use crate::data_access::{DataAccessor, EntitiesExt, OrderBy, PageRequest};
use crate::paginated::Paginated;
use crate::patch::PatchDocument;
use crate::sticker::{CreateSticker, Sticker, StickerField};

/// Page size of a listing when the client does not pick one.
pub const DEFAULT_LIST_PAGE_SIZE: usize = 20;

/// Shared state handed to every handler.
pub struct AppState<A> {
    dac: Arc<A>,
    shutdown: CancellationToken,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            dac: self.dac.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<A> AppState<A> {
    pub fn new(dac: Arc<A>, shutdown: CancellationToken) -> Self {
        Self { dac, shutdown }
    }

    /// Token for one request; cancelled when the server shuts down.
    fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

/// Query string of `GET /stickers`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub asc: Option<bool>,
    pub size: Option<i64>,
    pub page: Option<i64>,
}

impl ListQuery {
    /// Resolve the query string into a page request, rejecting blank or
    /// unknown sort fields, non-positive sizes and negative pages.
    pub fn into_request(self) -> Result<PageRequest<Sticker>, ApiError> {
        let order_by = match self.sort.as_deref() {
            Some(name) => name.parse::<StickerField>()?.order_by(),
            None => OrderBy::id(),
        };

        let size = match self.size {
            None => DEFAULT_LIST_PAGE_SIZE,
            Some(size) if size > 0 => usize::try_from(size)
                .map_err(|_| ApiError::BadRequest(format!("page size {} is too large", size)))?,
            Some(size) => {
                return Err(ApiError::BadRequest(format!(
                    "page size must be greater than zero (got {})",
                    size
                )))
            }
        };

        let page = match self.page {
            None => 0,
            Some(page) => usize::try_from(page).map_err(|_| {
                ApiError::BadRequest(format!("page must not be negative (got {})", page))
            })?,
        };

        Ok(PageRequest::new(order_by)
            .ascending(self.asc.unwrap_or(true))
            .page_size(size)
            .page(page))
    }
}

/// Build an axum `Router` serving stickers from the given accessor.
pub fn router<A: DataAccessor + 'static>(dac: Arc<A>, shutdown: CancellationToken) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/stickers",
            get(list_stickers::<A>).post(create_sticker::<A>),
        )
        .route(
            "/stickers/:id",
            get(get_sticker::<A>)
                .patch(patch_sticker::<A>)
                .delete(delete_sticker::<A>),
        )
        .with_state(AppState::new(dac, shutdown))
}

/// Serve stickers over HTTP at the given address (e.g. `"0.0.0.0:5000"`)
/// until `shutdown` is cancelled.
pub async fn serve<A: DataAccessor + 'static>(
    dac: Arc<A>,
    addr: &str,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    let app = router(dac, shutdown.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("no sticker with id {} was found", id))
}

/// `GET /health` - returns `{ "ok": true }`.
async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /stickers/:id`
async fn get_sticker<A: DataAccessor + 'static>(
    State(state): State<AppState<A>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Sticker>, ApiError> {
    let Path(id) = id?;
    let cancel = state.request_token();
    state
        .dac
        .entities::<Sticker>()
        .get(id, &cancel)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// `POST /stickers` - validate, then insert unless the title is taken.
async fn create_sticker<A: DataAccessor + 'static>(
    State(state): State<AppState<A>>,
    input: Result<Json<CreateSticker>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = input?;
    let mut sticker = Sticker::from(input);
    sticker.validate()?;

    let cancel = state.request_token();
    let title = sticker.title.clone();
    let added = state
        .dac
        .entities::<Sticker>()
        .add_unless(sticker.clone(), move |s: &Sticker| s.title == title, &cancel)
        .await?;

    let Some(id) = added else {
        tracing::warn!(title = %sticker.title, "sticker title already taken");
        return Err(ApiError::Conflict(format!(
            "a sticker titled {} already exists",
            sticker.title
        )));
    };

    sticker.id = id;
    tracing::info!(id, title = %sticker.title, "sticker created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/stickers/{}", id))],
        Json(sticker),
    ))
}

/// `DELETE /stickers/:id`
async fn delete_sticker<A: DataAccessor + 'static>(
    State(state): State<AppState<A>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let cancel = state.request_token();
    if state.dac.entities::<Sticker>().remove(id, &cancel).await? {
        tracing::info!(id, "sticker deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// `PATCH /stickers/:id` - body is a JSON Patch document.
///
/// The document is checked before the lookup, so a missing body is a 400
/// even for unknown ids.
async fn patch_sticker<A: DataAccessor + 'static>(
    State(state): State<AppState<A>>,
    id: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> Result<Json<Sticker>, ApiError> {
    let Path(id) = id?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest("a patch document is required".into()));
    }
    let document: PatchDocument = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid patch document: {}", e)))?;

    let cancel = state.request_token();
    let stickers = state.dac.entities::<Sticker>();
    let mut sticker = stickers.get(id, &cancel).await?.ok_or_else(|| not_found(id))?;
    sticker.modified_on = Some(Utc::now());

    let mut patched = document.apply_to(&sticker)?;
    patched.validate()?;
    patched.id = id;

    if !stickers.update(id, patched.clone(), &cancel).await? {
        // Deleted between the lookup and the update.
        return Err(not_found(id));
    }
    tracing::info!(id, ops = document.operations().len(), "sticker patched");
    Ok(Json(patched))
}

/// `GET /stickers` - one page of stickers.
async fn list_stickers<A: DataAccessor + 'static>(
    State(state): State<AppState<A>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Paginated<Sticker>>, ApiError> {
    let Query(query) = query?;
    let request = query.into_request()?;
    let cancel = state.request_token();
    let page = state.dac.entities::<Sticker>().page(request, &cancel).await?;
    Ok(Json(page))
}
