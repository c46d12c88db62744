//! Catalog browsing filters.
//!
//! Filtering never reorders: the result is always a subsequence of the
//! input in its original order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use kurdbook_core::LocalizedText;

use crate::models::{ArtProduct, Book};

/// A boolean property an entry can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFlag {
    New,
    Bestseller,
    Featured,
    InStock,
}

impl CatalogFlag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Bestseller => "bestseller",
            Self::Featured => "featured",
            Self::InStock => "in-stock",
        }
    }
}

impl fmt::Display for CatalogFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown flag name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown catalog flag {0:?}, expected new, bestseller, featured or in-stock")]
pub struct CatalogFlagError(pub String);

impl FromStr for CatalogFlag {
    type Err = CatalogFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "bestseller" => Ok(Self::Bestseller),
            "featured" => Ok(Self::Featured),
            "in-stock" | "in_stock" | "instock" => Ok(Self::InStock),
            _ => Err(CatalogFlagError(s.to_string())),
        }
    }
}

/// Fields a catalog entry exposes to [`CatalogFilter`].
pub trait Filterable {
    fn title(&self) -> &LocalizedText;
    /// Author for books, artisan for art products.
    fn creator(&self) -> &LocalizedText;
    fn category(&self) -> &str;
    fn has_flag(&self, flag: CatalogFlag) -> bool;
}

impl Filterable for Book {
    fn title(&self) -> &LocalizedText {
        &self.title
    }

    fn creator(&self) -> &LocalizedText {
        &self.author
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn has_flag(&self, flag: CatalogFlag) -> bool {
        match flag {
            CatalogFlag::New => self.is_new,
            CatalogFlag::Bestseller => self.is_bestseller,
            CatalogFlag::Featured => self.featured,
            CatalogFlag::InStock => self.in_stock,
        }
    }
}

impl Filterable for ArtProduct {
    fn title(&self) -> &LocalizedText {
        &self.title
    }

    fn creator(&self) -> &LocalizedText {
        &self.creator
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn has_flag(&self, flag: CatalogFlag) -> bool {
        match flag {
            CatalogFlag::New => self.is_new,
            CatalogFlag::Bestseller => false,
            CatalogFlag::Featured => self.featured,
            CatalogFlag::InStock => self.in_stock,
        }
    }
}

/// Category, text search and flag constraints, all of which must hold.
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Exact category slug.
    pub category: Option<String>,
    /// Case-insensitive substring of any translation of the title or
    /// creator. Blank means no constraint.
    pub search: Option<String>,
    pub flags: Vec<CatalogFlag>,
}

impl CatalogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: CatalogFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Entries of `entries` that pass, in their original order.
    #[must_use]
    pub fn apply<'a, T: Filterable>(&self, entries: &'a [T]) -> Vec<&'a T> {
        let needle = self.needle();
        entries
            .iter()
            .filter(|entry| self.matches_with(*entry, needle.as_deref()))
            .collect()
    }

    #[must_use]
    pub fn matches<T: Filterable>(&self, entry: &T) -> bool {
        self.matches_with(entry, self.needle().as_deref())
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_with<T: Filterable>(&self, entry: &T, needle: Option<&str>) -> bool {
        if let Some(category) = &self.category
            && entry.category() != category
        {
            return false;
        }
        if !self.flags.iter().all(|&flag| entry.has_flag(flag)) {
            return false;
        }
        needle.is_none_or(|needle| {
            contains_text(entry.title(), needle) || contains_text(entry.creator(), needle)
        })
    }
}

fn contains_text(text: &LocalizedText, needle: &str) -> bool {
    text.iter()
        .any(|(_, value)| value.to_lowercase().contains(needle))
}
