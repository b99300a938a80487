use env_logger::{Builder, Env};
use std::io::Write;

use crate::api::request_id;

/// Install the global logger.
///
/// Defaults to `info` with sqlx quieted to `warn`; `RUST_LOG` overrides. Every
/// line carries the correlation id of the request being handled, or `-`.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("info,sqlx=warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}: {}",
                buf.timestamp(),
                record.level(),
                request_tag(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

fn request_tag() -> String {
    request_id::current()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestId;

    #[tokio::test]
    async fn test_request_tag_follows_scope() {
        assert_eq!(request_tag(), "-");

        let id = RequestId::generate();
        let inside = request_id::scope(id.clone(), async { request_tag() }).await;

        assert_eq!(inside, id.as_str());
        assert_eq!(request_tag(), "-");
    }
}
