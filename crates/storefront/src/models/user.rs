//! User domain types.
//!
//! A [`User`] never carries a password. The mock account table in
//! [`AuthStore`](crate::stores::AuthStore) keeps secrets alongside users and
//! strips them before anything is persisted.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use kurdbook_core::{Email, Locale, UserId};

/// A storefront user as persisted in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Shipping address, filled in from the profile page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub preferences: Preferences,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    /// Governorate or state, e.g. "Sulaymaniyah".
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Per-user storefront preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub language: Locale,
    #[serde(default)]
    pub newsletter: bool,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub language: Option<Locale>,
    pub newsletter: Option<bool>,
}

impl ProfileUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.language.is_none()
            && self.newsletter.is_none()
    }

    /// Apply the present fields to `user` and bump `updated_at`.
    pub fn apply_to(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = self.address {
            user.address = Some(address);
        }
        if let Some(language) = self.language {
            user.preferences.language = language;
        }
        if let Some(newsletter) = self.newsletter {
            user.preferences.newsletter = newsletter;
        }
        user.updated_at = now;
    }
}

/// Register form data.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password: SecretString,
    pub phone: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> User {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        User {
            id: UserId::new(1),
            email: Email::parse("demo@kurdbook.com").unwrap(),
            name: "Demo".to_string(),
            phone: None,
            address: None,
            preferences: Preferences::default(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut user = user();
        let later = DateTime::from_timestamp(1_700_000_100, 0).unwrap();
        let update = ProfileUpdate {
            name: Some("Shirin".to_string()),
            language: Some(Locale::Kmr),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());

        update.apply_to(&mut user, later);

        assert_eq!(user.name, "Shirin");
        assert_eq!(user.preferences.language, Locale::Kmr);
        assert!(!user.preferences.newsletter);
        assert_eq!(user.phone, None);
        assert_eq!(user.updated_at, later);
        assert_ne!(user.created_at, later);
    }

    #[test]
    fn test_serialized_user_has_no_secret_fields() {
        let json = serde_json::to_value(user()).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("address"));
        assert_eq!(object["preferences"]["language"], "ku");
    }
}
