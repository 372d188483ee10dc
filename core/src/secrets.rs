//! OS keyring lookup for module credentials.
//!
//! Entries are keyed by service = instance domain, user = module name, so
//! one token can be stored per Gitea instance.

use keyring::Entry;

/// Fetch the stored API key for `module` on `domain`.
///
/// Any keyring failure, including a missing entry, yields `None`; a missing
/// secret only means requests go out unauthenticated.
pub fn load_api_key(module: &str, domain: &str) -> Option<String> {
    let entry = match Entry::new(domain, module) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!("keyring entry unavailable for {domain}: {e}");
            return None;
        }
    };

    match entry.get_password() {
        Ok(secret) if !secret.trim().is_empty() => Some(secret.trim().to_string()),
        Ok(_) | Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            tracing::warn!("keyring lookup failed for {domain}: {e}");
            None
        }
    }
}
