//! Span helpers tying log lines to one CLI invocation.

use tracing::Span;

use crate::init::build_sha;

/// Span carrying the invocation's request identifier and the build SHA.
///
/// The same identifier is sent as `x-request-id`, so client and server logs
/// can be joined.
#[must_use]
pub fn invocation_span(command: &str, request_id: &str) -> Span {
    tracing::info_span!(
        "invocation",
        command = %command,
        request_id = %request_id,
        build_sha = %build_sha()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_span_can_be_entered() {
        let span = invocation_span("status", "req-1");
        let _entered = span.enter();
        tracing::info!("inside invocation");
    }
}
