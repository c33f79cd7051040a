// net.rs

/// Station-mode network link, as seen by the tasks. The real radio lives
/// behind this seam; the core only ever asks for "connect" and "are we up".
pub trait NetworkLink {
    /// Single association attempt. Returning `Ok` does not guarantee the
    /// link is up, callers check [`is_connected`](Self::is_connected).
    fn connect(&mut self, ssid: &str, pass: &str) -> anyhow::Result<()>;

    fn is_connected(&self) -> bool;
}

// EOF
