//! Account commands against the mock auth store.
//!
//! # Usage
//!
//! ```bash
//! kb-cli account login -e admin@kurdbook.com -p admin123
//! kb-cli account register -e shirin@example.com -n Shirin -p secret
//! kb-cli account update --language kmr --newsletter true
//! kb-cli account logout
//! ```

use secrecy::SecretString;

use kurdbook_core::Locale;
use kurdbook_storefront::Storefront;
use kurdbook_storefront::models::{NewAccount, ProfileUpdate, User};

use super::CommandError;

pub fn show(store: &Storefront) {
    match store.auth().current_user() {
        Some(user) => log_user(user),
        None => tracing::info!("Not signed in"),
    }
}

pub async fn login(store: &mut Storefront, email: &str, password: &str) -> Result<(), CommandError> {
    let user = store.auth_mut().login(email, password).await?;
    tracing::info!("Signed in as {} ({})", user.name, user.email);
    Ok(())
}

/// Register and sign in. Registered accounts only last for this process.
pub async fn register(
    store: &mut Storefront,
    email: String,
    name: String,
    password: String,
    phone: Option<String>,
) -> Result<(), CommandError> {
    let user = store
        .auth_mut()
        .register(NewAccount {
            email,
            name,
            password: SecretString::from(password),
            phone,
        })
        .await?;
    tracing::info!("Registered and signed in as {} ({})", user.name, user.email);
    tracing::warn!("New accounts are not saved; the session is, but signing in again will fail");
    Ok(())
}

pub async fn update(
    store: &mut Storefront,
    name: Option<String>,
    phone: Option<String>,
    language: Option<Locale>,
    newsletter: Option<bool>,
) -> Result<(), CommandError> {
    let update = ProfileUpdate {
        name,
        phone,
        address: None,
        language,
        newsletter,
    };
    if update.is_empty() {
        tracing::info!("Nothing to update");
        return Ok(());
    }
    let user = store.auth_mut().update_profile(update).await?;
    tracing::info!("Profile updated");
    log_user(&user);
    Ok(())
}

pub fn logout(store: &mut Storefront) -> Result<(), CommandError> {
    store.auth_mut().logout()?;
    tracing::info!("Signed out");
    Ok(())
}

fn log_user(user: &User) {
    tracing::info!("{} <{}>", user.name, user.email);
    tracing::info!("  Id: {}", user.id);
    if let Some(phone) = &user.phone {
        tracing::info!("  Phone: {phone}");
    }
    tracing::info!(
        "  Language: {}, newsletter: {}",
        user.preferences.language.native_name(),
        user.preferences.newsletter
    );
    tracing::info!("  Member since {}", user.created_at.format("%Y-%m-%d"));
}
