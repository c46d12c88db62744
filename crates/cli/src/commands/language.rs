//! UI language commands.

use kurdbook_core::Locale;
use kurdbook_storefront::Storefront;

use super::CommandError;

pub fn show(store: &Storefront) {
    let locale = store.locale();
    tracing::info!(
        "{} ({}, {})",
        locale.native_name(),
        locale.code(),
        store.language().direction().as_str()
    );
}

pub fn set(store: &mut Storefront, locale: Locale) -> Result<(), CommandError> {
    store.language_mut().set(locale)?;
    tracing::info!("Language set to {}", locale.native_name());
    Ok(())
}

pub fn list() {
    for locale in Locale::ALL {
        tracing::info!("  {:<4} {}", locale.code(), locale.native_name());
    }
}
