//! Shared-password access gate.
//!
//! The dashboard is protected by one shared password compared in plain
//! text against the configured secret, matching the production setup.
//! There is no lockout or rate limiting; a wrong password is a reported
//! denial, not a crash.

use anyhow::{Context, Result, bail};
use tracing::warn;

/// Environment variable holding the shared access password.
pub const PASSWORD_ENV: &str = "DASH_PASSWORD";

pub fn verify_password(supplied: &str, expected: &str) -> bool {
    supplied == expected
}

/// Checks `supplied` against the configured secret.
///
/// Fails when the secret is not configured or the password does not match.
pub fn require_password(supplied: &str) -> Result<()> {
    let expected = std::env::var(PASSWORD_ENV)
        .with_context(|| format!("{PASSWORD_ENV} is not set"))?;

    if !verify_password(supplied, &expected) {
        warn!("Access denied: incorrect password");
        bail!("access denied: incorrect password");
    }

    Ok(())
}
