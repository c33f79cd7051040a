// telemetry.rs

/// Session handle to the telemetry server. Mirrors the vendor SDK surface:
/// connect once, publish named floats, pump the protocol event loop.
#[allow(async_fn_in_trait)]
pub trait TelemetryLink {
    /// Single connect attempt against `server` (`host[:port]`) using the
    /// device auth token. No internal retry.
    async fn connect(&mut self, server: &str, token: &str) -> anyhow::Result<()>;

    fn is_connected(&self) -> bool;

    /// Publish one named metric. Fire and forget, no delivery confirmation.
    async fn publish(&mut self, name: &str, value: f32) -> anyhow::Result<()>;

    /// Process pending inbound/outbound protocol traffic once.
    async fn pump(&mut self) -> anyhow::Result<()>;
}

// EOF
