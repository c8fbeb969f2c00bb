//! User-Agent string for tracking page requests.
//!
//! The courier site serves a stripped or blocked page to obvious bots, so
//! requests present a current desktop browser identity.

/// Desktop Chrome on Linux.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Default User-Agent for tracking requests.
#[must_use]
pub(crate) fn default_tracking_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}
