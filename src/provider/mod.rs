pub mod mailinabox;

/// Prefix the admin API puts on every successful record change.
const SUCCESS_PREFIX: &str = "updated";

#[derive(Debug)]
pub struct DnsUpdateResult {
    pub body: String,
}

impl DnsUpdateResult {
    /// Case-sensitive prefix match; the rest of the body is ignored.
    pub fn is_updated(&self) -> bool {
        self.body.starts_with(SUCCESS_PREFIX)
    }
}
