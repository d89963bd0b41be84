//! Data access - generic CRUD, existence checks and pagination over entities.
//!
//! A [`DataAccessor`] stores entities of any kind implementing [`Entity`],
//! each kind in its own collection with its own identifier sequence.
//! Operations are async, take a [`CancellationToken`], and report absence
//! through `bool`/`Option` rather than errors.
//!
//! ## Example
//!
//! ```ignore
//! use stickers::{EntitiesExt, InMemoryDataAccessor, OrderBy, PageRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let dac = InMemoryDataAccessor::new();
//! let cancel = CancellationToken::new();
//!
//! let id = dac.entities::<Sticker>().add(sticker, &cancel).await?;
//! let page = dac
//!     .entities::<Sticker>()
//!     .page(
//!         PageRequest::new(OrderBy::key(|s: &Sticker| s.title.clone()))
//!             .descending()
//!             .page_size(3),
//!         &cancel,
//!     )
//!     .await?;
//! ```
//!
//! [`Entity`]: crate::Entity
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod accessor;
mod entity_repository;
mod error;
mod in_memory;
mod query;

pub use accessor::DataAccessor;
pub use entity_repository::{EntitiesExt, EntityRepository};
pub use error::DataAccessError;
pub use in_memory::InMemoryDataAccessor;
pub use query::{Filter, OrderBy, PageRequest, DEFAULT_PAGE_SIZE};
