use crate::core::{Config, Locator, WaitCondition};
use crate::errors::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BrowserTrait: Send + Sync {
    /// Launch a new browser instance and open its working tab
    async fn launch(&mut self, config: &Config) -> Result<()>;

    /// Navigate to a URL and wait for the load to finish
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Check once, without waiting, whether `locator` satisfies `condition`
    async fn probe(&self, locator: &Locator, condition: WaitCondition) -> Result<bool>;

    /// Click the first element matching `locator`
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Empty the first input matching `locator`, then type `text` into it
    async fn clear_and_type(&mut self, locator: &Locator, text: &str) -> Result<()>;

    /// Close the browser
    async fn close(&mut self) -> Result<()>;
}
