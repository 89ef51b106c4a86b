use crate::core::{BrowserTrait, Config, Locator, WaitCondition};
use crate::errors::{CheckoutError, Result};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One browser, owned by one sequential walk.
///
/// Every interaction goes through a bounded wait first. `close` is
/// idempotent so a caller can always finish the session on its way out
/// without tracking whether an earlier path already did.
pub struct BrowserSession<B: BrowserTrait> {
    browser: B,
    config: Config,
    session_id: Uuid,
    closed: bool,
}

impl<B: BrowserTrait> BrowserSession<B> {
    pub async fn new(mut browser: B, config: Config) -> Result<Self> {
        browser.launch(&config).await?;
        let session_id = Uuid::new_v4();
        info!(%session_id, headless = config.browser.headless, "browser session opened");

        Ok(Self {
            browser,
            config,
            session_id,
            closed: false,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Navigate to `path` on the configured site.
    pub async fn open_path(&mut self, path: &str) -> Result<()> {
        let url = self.config.checkout.site_url(path)?;
        debug!(%url, "navigating");
        self.browser.navigate(url.as_str()).await
    }

    /// Poll `locator` until it satisfies `condition`, or fail with
    /// `WaitTimeout` once `timeout` has elapsed.
    pub async fn wait_for(
        &self,
        locator: &Locator,
        condition: WaitCondition,
        timeout: Duration,
    ) -> Result<()> {
        let poll_interval = self.config.checkout.poll_interval();
        let deadline = Instant::now() + timeout;

        loop {
            if self.browser.probe(locator, condition).await? {
                debug!(locator = locator.name, ?condition, "element ready");
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(CheckoutError::WaitTimeout {
                    locator: locator.name.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }

    pub async fn click_when_clickable(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.wait_for(locator, WaitCondition::Clickable, timeout)
            .await?;
        self.browser.click(locator).await
    }

    pub async fn fill_when_present(
        &mut self,
        locator: &Locator,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_for(locator, WaitCondition::Present, timeout)
            .await?;
        self.browser.clear_and_type(locator, text).await
    }

    /// Single lookup with no waiting. Lookup faults count as "not found".
    pub async fn is_present_now(&self, locator: &Locator) -> bool {
        match self.browser.probe(locator, WaitCondition::Present).await {
            Ok(found) => found,
            Err(e) => {
                warn!(locator = locator.name, error = %e, "lookup failed, treating as absent");
                false
            }
        }
    }

    pub async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        info!(session_id = %self.session_id, "closing browser session");
        self.browser.close().await
    }
}
