//! Book review store.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use kurdbook_core::{BookId, Rating, ReviewId};

use super::collection::{Collection, CollectionItem, DuplicatePolicy, Hydration};
use crate::error::StoreError;
use crate::models::{NewReview, Review, storage_keys};
use crate::storage::Storage;

impl CollectionItem for Review {
    type Key = ReviewId;

    fn key(&self) -> ReviewId {
        self.id
    }
}

/// Aggregate rating for one book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSummary {
    pub count: usize,
    /// Mean star rating, `None` when there are no reviews.
    pub average: Option<f64>,
}

/// Append-only list of reviews, persisted under [`storage_keys::REVIEWS`].
///
/// Starts from a small seed set when nothing is stored or the stored value
/// is unreadable.
#[derive(Debug)]
pub struct ReviewStore {
    reviews: Collection<Review>,
}

impl ReviewStore {
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        Self {
            reviews: Collection::hydrate_with_seed(
                storage,
                storage_keys::REVIEWS,
                DuplicatePolicy::Append,
                seed_reviews,
            ),
        }
    }

    /// Append a review stamped with the current time.
    ///
    /// The id is the submission time in milliseconds, bumped past the
    /// largest existing id so two reviews in the same millisecond stay
    /// distinct.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the reviews cannot be written back. The
    /// review is kept in memory either way.
    pub fn submit(&mut self, review: NewReview) -> Result<Review, StoreError> {
        let now = Utc::now();
        let review = Review {
            id: self.next_id(now),
            book_id: review.book_id,
            author: review.author,
            rating: review.rating,
            title: review.title.filter(|t| !t.trim().is_empty()),
            comment: review.comment,
            created_at: now,
        };
        tracing::info!(review_id = %review.id, book_id = %review.book_id, "Review submitted");
        self.reviews.add(review.clone())?;
        Ok(review)
    }

    /// Delete a review, e.g. from the admin panel. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the reviews cannot be written back.
    pub fn remove(&mut self, id: ReviewId) -> Result<bool, StoreError> {
        self.reviews.remove(id)
    }

    /// Reviews of `book_id`, newest first.
    #[must_use]
    pub fn for_book(&self, book_id: BookId) -> Vec<&Review> {
        let mut reviews = self.reviews.query(|review| review.book_id == book_id);
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        reviews
    }

    #[must_use]
    pub fn summary(&self, book_id: BookId) -> ReviewSummary {
        let ratings: Vec<u8> = self
            .reviews
            .query(|review| review.book_id == book_id)
            .iter()
            .map(|review| review.rating.stars())
            .collect();

        let total: u32 = ratings.iter().map(|&stars| u32::from(stars)).sum();
        let average = u32::try_from(ratings.len())
            .ok()
            .filter(|&count| count > 0)
            .map(|count| f64::from(total) / f64::from(count));

        ReviewSummary {
            count: ratings.len(),
            average,
        }
    }

    #[must_use]
    pub fn all(&self) -> &[Review] {
        self.reviews.items()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.reviews.hydration()
    }

    fn next_id(&self, now: DateTime<Utc>) -> ReviewId {
        let stamp = now.timestamp_millis();
        let after_last = self
            .reviews
            .items()
            .iter()
            .map(|review| review.id.as_i64().saturating_add(1))
            .max()
            .unwrap_or(stamp);
        ReviewId::new(stamp.max(after_last))
    }
}

/// Reviews shown before any visitor has written one.
fn seed_reviews() -> Vec<Review> {
    let seed = [
        (1, 1, "Hêvî", 5, Some("A treasure"), "Nali's ghazals read beautifully in this edition."),
        (2, 1, "Daniel K.", 4, None, "Good introduction for English readers, helpful notes."),
        (3, 3, "Rozh", 5, Some("Must read"), "The best modern history of the region I have found."),
    ];

    seed.into_iter()
        .filter_map(|(id, book, author, stars, title, comment)| {
            Some(Review {
                id: ReviewId::new(id),
                book_id: BookId::new(book),
                author: author.to_string(),
                rating: Rating::new(stars).ok()?,
                title: title.map(str::to_string),
                comment: comment.to_string(),
                created_at: DateTime::from_timestamp(1_704_067_200 + id * 86_400, 0)?,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    fn new_review(book: i64, stars: u8) -> NewReview {
        NewReview {
            book_id: BookId::new(book),
            author: "Reader".to_string(),
            rating: Rating::new(stars).unwrap(),
            title: Some("  ".to_string()),
            comment: "Enjoyed it".to_string(),
        }
    }

    #[test]
    fn test_hydrate_without_storage_uses_seed() {
        let store = ReviewStore::hydrate(Arc::new(MemoryStorage::new()));
        assert_eq!(store.hydration(), Hydration::Seeded);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_seed() {
        let storage = MemoryStorage::new();
        storage.set_item(storage_keys::REVIEWS, "oops").unwrap();

        let store = ReviewStore::hydrate(Arc::new(storage));
        assert_eq!(store.hydration(), Hydration::Recovered);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_same_author_may_review_twice() {
        let storage = MemoryStorage::new();
        let mut store = ReviewStore::hydrate(Arc::new(storage.clone()));

        let first = store.submit(new_review(9, 4)).unwrap();
        let second = store.submit(new_review(9, 2)).unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
        assert_eq!(first.title, None);
        assert_eq!(store.for_book(BookId::new(9)).len(), 2);

        let reloaded = ReviewStore::hydrate(Arc::new(storage));
        assert_eq!(reloaded.hydration(), Hydration::Loaded);
        assert_eq!(reloaded.len(), 5);
    }

    #[test]
    fn test_submit_after_largest_possible_id() {
        let storage = MemoryStorage::new();
        let mut stored = seed_reviews();
        stored.truncate(1);
        stored[0].id = ReviewId::new(i64::MAX);
        storage
            .set_item(storage_keys::REVIEWS, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let mut store = ReviewStore::hydrate(Arc::new(storage));
        assert_eq!(store.hydration(), Hydration::Loaded);
        let review = store.submit(new_review(1, 5)).unwrap();
        assert_eq!(review.id, ReviewId::new(i64::MAX));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_for_book_is_newest_first() {
        let store = ReviewStore::hydrate(Arc::new(MemoryStorage::new()));
        let authors: Vec<&str> = store
            .for_book(BookId::new(1))
            .iter()
            .map(|review| review.author.as_str())
            .collect();
        assert_eq!(authors, vec!["Daniel K.", "Hêvî"]);
    }

    #[test]
    fn test_summary() {
        let mut store = ReviewStore::hydrate(Arc::new(MemoryStorage::new()));
        store.submit(new_review(1, 3)).unwrap();

        let summary = store.summary(BookId::new(1));
        assert_eq!(summary.count, 3);
        assert!((summary.average.unwrap() - 4.0).abs() < f64::EPSILON);

        let empty = store.summary(BookId::new(99));
        assert_eq!(empty.count, 0);
        assert_eq!(empty.average, None);
    }

    #[test]
    fn test_remove() {
        let mut store = ReviewStore::hydrate(Arc::new(MemoryStorage::new()));
        assert!(store.remove(ReviewId::new(2)).unwrap());
        assert!(!store.remove(ReviewId::new(2)).unwrap());
        assert_eq!(store.summary(BookId::new(1)).count, 1);
    }
}
