//! Book reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kurdbook_core::{BookId, Rating, ReviewId};

/// A submitted review. Readers may review the same book more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Millisecond timestamp of submission, made unique within the store.
    pub id: ReviewId,
    pub book_id: BookId,
    /// Reviewer's display name.
    pub author: String,
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review form data.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub book_id: BookId,
    pub author: String,
    pub rating: Rating,
    pub title: Option<String>,
    pub comment: String,
}
