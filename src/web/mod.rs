//! web - HTTP layer for the sticker service.
//!
//! Requires the `http` feature. Uses axum for routing; handlers reach the
//! store only through [`DataAccessor`](crate::DataAccessor) operations.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stickers::{web, InMemoryDataAccessor};
//! use tokio_util::sync::CancellationToken;
//!
//! let dac = Arc::new(InMemoryDataAccessor::new());
//! let shutdown = CancellationToken::new();
//!
//! // Get the router to compose with other axum routes
//! let app = web::router(dac.clone(), shutdown.clone());
//!
//! // Or serve directly
//! web::serve(dac, "127.0.0.1:5000", shutdown).await?;
//! ```

mod error;
mod http;

pub use error::ApiError;
pub use http::{router, serve, AppState, ListQuery, DEFAULT_LIST_PAGE_SIZE};
