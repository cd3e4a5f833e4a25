use anyhow::Result;

/// Install the stderr `tracing` subscriber used by both binaries. `RUST_LOG`
/// overrides the default level.
pub fn init(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {}", err))
}
