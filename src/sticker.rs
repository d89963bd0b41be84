//! Sticker - the note record served over HTTP.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data_access::{DataAccessError, OrderBy};
use crate::entity::Entity;

/// Longest title a sticker may carry, in characters.
pub const MAX_TITLE_LEN: usize = 50;

/// A sticker note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    #[serde(default)]
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
}

impl Sticker {
    /// A new, unsaved sticker created now.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            created_on: Utc::now(),
            modified_on: None,
        }
    }

    /// Check the field constraints: a non-blank title of at most
    /// [`MAX_TITLE_LEN`] characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        let len = self.title.chars().count();
        if len > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong {
                max: MAX_TITLE_LEN,
                actual: len,
            });
        }
        Ok(())
    }
}

impl Entity for Sticker {
    const KIND: &'static str = "sticker";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSticker {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl From<CreateSticker> for Sticker {
    fn from(input: CreateSticker) -> Self {
        Sticker::new(input.title, input.content)
    }
}

/// A sticker failed its field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TitleRequired,
    TitleTooLong { max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TitleRequired => write!(f, "title is required"),
            ValidationError::TitleTooLong { max, actual } => write!(
                f,
                "title must be at most {} characters (got {})",
                max, actual
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Sticker fields that a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerField {
    Id,
    Title,
    Content,
    CreatedOn,
    ModifiedOn,
}

impl StickerField {
    pub const ALL: [StickerField; 5] = [
        StickerField::Id,
        StickerField::Title,
        StickerField::Content,
        StickerField::CreatedOn,
        StickerField::ModifiedOn,
    ];

    /// Field name as it appears in JSON.
    pub fn name(self) -> &'static str {
        match self {
            StickerField::Id => "id",
            StickerField::Title => "title",
            StickerField::Content => "content",
            StickerField::CreatedOn => "createdOn",
            StickerField::ModifiedOn => "modifiedOn",
        }
    }

    /// Ordering by this field. Stickers never modified sort first.
    pub fn order_by(self) -> OrderBy<Sticker> {
        match self {
            StickerField::Id => OrderBy::id(),
            StickerField::Title => OrderBy::comparator(|a: &Sticker, b: &Sticker| a.title.cmp(&b.title)),
            StickerField::Content => {
                OrderBy::comparator(|a: &Sticker, b: &Sticker| a.content.cmp(&b.content))
            }
            StickerField::CreatedOn => OrderBy::key(|s: &Sticker| s.created_on),
            StickerField::ModifiedOn => OrderBy::key(|s: &Sticker| s.modified_on),
        }
    }
}

impl fmt::Display for StickerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StickerField {
    type Err = DataAccessError;

    /// Case-insensitive; accepts `createdOn` as well as `created_on`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(DataAccessError::InvalidArgument(
                "sort field must not be blank".into(),
            ));
        }
        let normalized = name.replace('_', "");
        StickerField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                DataAccessError::InvalidArgument(format!("property {} is not defined", name))
            })
    }
}
