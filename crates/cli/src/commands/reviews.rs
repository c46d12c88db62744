//! Book review commands.
//!
//! # Usage
//!
//! ```bash
//! kb-cli reviews list 1
//! kb-cli reviews add 1 --rating 5 --comment "Beautiful edition"
//! kb-cli reviews remove 3   # needs `kb-cli admin login`
//! ```

use kurdbook_core::{BookId, Locale, Rating, ReviewId};
use kurdbook_storefront::Storefront;
use kurdbook_storefront::models::{CatalogRef, NewReview};

use super::CommandError;

pub fn list(store: &Storefront, locale: Locale, book: BookId) -> Result<(), CommandError> {
    let entry = store
        .catalog()
        .book(book)
        .ok_or(CommandError::UnknownItem(CatalogRef::Book(book)))?;
    let summary = store.reviews().summary(book);

    tracing::info!(
        "{} - {} ({})",
        entry.title.resolve(locale),
        store.t("reviews.title"),
        summary.count
    );
    for review in store.reviews().for_book(book) {
        tracing::info!(
            "  #{} {} {} by {} on {}",
            review.id,
            "*".repeat(usize::from(review.rating.stars())),
            review.title.as_deref().unwrap_or(""),
            review.author,
            review.created_at.format("%Y-%m-%d"),
        );
        tracing::info!("    {}", review.comment);
    }
    Ok(())
}

/// Submit a review. The author defaults to the signed-in user's name.
pub fn add(
    store: &mut Storefront,
    book: BookId,
    author: Option<String>,
    rating: u8,
    title: Option<String>,
    comment: String,
) -> Result<(), CommandError> {
    if store.catalog().book(book).is_none() {
        return Err(CommandError::UnknownItem(CatalogRef::Book(book)));
    }
    let rating = Rating::new(rating)?;
    let author = author
        .or_else(|| store.auth().current_user().map(|user| user.name.clone()))
        .unwrap_or_else(|| "Anonymous".to_string());

    let review = store.reviews_mut().submit(NewReview {
        book_id: book,
        author,
        rating,
        title,
        comment,
    })?;
    tracing::info!("Review #{} added for book {}", review.id, review.book_id);
    Ok(())
}

/// Delete a review. Requires an unlocked admin session.
pub fn remove(store: &mut Storefront, id: ReviewId) -> Result<(), CommandError> {
    if !store.admin().is_logged_in() {
        return Err(CommandError::AdminRequired);
    }
    if !store.reviews_mut().remove(id)? {
        return Err(CommandError::UnknownReview(id));
    }
    tracing::info!("Review #{id} removed");
    Ok(())
}
