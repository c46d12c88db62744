//! Admin panel session commands.

use kurdbook_storefront::Storefront;

use super::CommandError;

pub fn status(store: &Storefront) {
    if store.admin().is_logged_in() {
        tracing::info!("Admin panel unlocked");
    } else {
        tracing::info!("Admin panel locked");
    }
}

pub fn login(store: &mut Storefront, username: &str, password: &str) -> Result<(), CommandError> {
    if !store.admin_mut().login(username, password)? {
        return Err(CommandError::AdminLoginRejected);
    }
    tracing::info!("Admin panel unlocked");
    Ok(())
}

pub fn logout(store: &mut Storefront) -> Result<(), CommandError> {
    store.admin_mut().logout()?;
    tracing::info!("Admin panel locked");
    Ok(())
}
