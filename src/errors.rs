use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Browser not launched")]
    BrowserNotLaunched,

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out after {timeout_ms}ms waiting for {locator}")]
    WaitTimeout { locator: String, timeout_ms: u64 },

    #[error("JavaScript execution failed: {0}")]
    JavaScriptFailed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Anyhow error: {0}")]
    AnyhowError(String),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;

// Convert anyhow::Error to CheckoutError
impl From<anyhow::Error> for CheckoutError {
    fn from(err: anyhow::Error) -> Self {
        CheckoutError::AnyhowError(err.to_string())
    }
}

impl CheckoutError {
    /// True for the bounded-wait expiration, the only kind a step may recover from.
    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, CheckoutError::WaitTimeout { .. })
    }
}
