//! Shared helpers for integration tests.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

/// Set to `1`/`true`/`yes` to fail instead of skipping when sockets are unavailable.
const REQUIRE_SOCKET_TESTS_VAR: &str = "AWB_TRACKER_REQUIRE_SOCKET_TESTS";

fn socket_tests_required() -> bool {
    std::env::var(REQUIRE_SOCKET_TESTS_VAR)
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Returns false (test skipped) in sandboxes that forbid binding a localhost socket.
#[track_caller]
pub fn mock_server_available() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return true;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}",
        location.file(),
        location.line()
    );
    assert!(
        !socket_tests_required(),
        "{message}; unset {REQUIRE_SOCKET_TESTS_VAR} to allow skipping"
    );
    eprintln!("{message}; skipping. Set {REQUIRE_SOCKET_TESTS_VAR}=1 to fail instead.");
    false
}

/// Starts a wiremock server unless sockets are unavailable.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if mock_server_available() {
        Some(MockServer::start().await)
    } else {
        None
    }
}
