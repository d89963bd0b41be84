//! stickers - a sticker notes REST service over a generic in-memory store.
//!
//! The heart of the crate is [`DataAccessor`]: add/remove/get/update,
//! existence checks and filtered, ordered pagination over any [`Entity`]
//! kind. [`InMemoryDataAccessor`] implements it; the `web` module (feature
//! `http`) exposes [`Sticker`]s through it.

pub mod data_access;
mod entity;
mod paginated;
pub mod patch;
mod sticker;

#[cfg(feature = "http")]
pub mod config;
pub mod logging;
#[cfg(feature = "http")]
pub mod web;

pub use data_access::{
    DataAccessError, DataAccessor, EntitiesExt, EntityRepository, Filter, InMemoryDataAccessor,
    OrderBy, PageRequest, DEFAULT_PAGE_SIZE,
};
pub use entity::Entity;
pub use paginated::{total_pages, Paginated};
pub use patch::{PatchDocument, PatchError, PatchOperation};
pub use sticker::{CreateSticker, Sticker, StickerField, ValidationError, MAX_TITLE_LEN};

// Re-export the cancellation token every accessor operation takes
pub use tokio_util::sync::CancellationToken;
