use crate::core::{BrowserTrait, Config, Locator, WaitCondition};
use crate::errors::{CheckoutError, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Chrome browser implementation.
///
/// Dropping it drops the `headless_chrome::Browser`, which kills the
/// Chrome process even if `close` was never reached.
pub struct ChromeBrowser {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl ChromeBrowser {
    pub fn new() -> Self {
        Self {
            browser: None,
            tab: None,
        }
    }

    fn tab(&self) -> Result<&Arc<Tab>> {
        self.tab.as_ref().ok_or(CheckoutError::BrowserNotLaunched)
    }

    fn evaluate(&self, script: &str) -> Result<Value> {
        let result = self
            .tab()?
            .evaluate(script, false)
            .map_err(|e| CheckoutError::JavaScriptFailed(e.to_string()))?;

        Ok(result.value.unwrap_or(Value::Null))
    }

    async fn wait_for_page_load(&self, timeout: Duration) -> Result<()> {
        let start_time = Instant::now();

        while start_time.elapsed() < timeout {
            let state = self.evaluate("document.readyState")?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        Err(CheckoutError::NavigationFailed(
            "Page load timeout".to_string(),
        ))
    }
}

impl Default for ChromeBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserTrait for ChromeBrowser {
    async fn launch(&mut self, config: &Config) -> Result<()> {
        let window_size_arg = format!(
            "--window-size={},{}",
            config.browser.viewport.width, config.browser.viewport.height
        );

        let user_agent_arg = config
            .browser
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        for arg in &config.browser.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.browser.headless)
            .args(args)
            .build()
            .map_err(|e| CheckoutError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| CheckoutError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CheckoutError::LaunchFailed(e.to_string()))?;

        debug!(headless = config.browser.headless, "chrome launched");
        self.browser = Some(browser);
        self.tab = Some(tab);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let tab = self.tab()?;
        tab.navigate_to(url)
            .map_err(|e| CheckoutError::NavigationFailed(e.to_string()))?;

        tab.wait_until_navigated()
            .map_err(|e| CheckoutError::NavigationFailed(e.to_string()))?;

        self.wait_for_page_load(PAGE_LOAD_TIMEOUT).await
    }

    async fn probe(&self, locator: &Locator, condition: WaitCondition) -> Result<bool> {
        let js_code = format!(
            r#"
            (function() {{
                const element = document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
                if (!element) return {{ present: false, clickable: false }};

                if (element.tagName === 'OPTION') {{
                    const select = element.closest('select');
                    const disabled = element.disabled || (select !== null && select.disabled);
                    return {{ present: true, clickable: !disabled }};
                }}

                const rect = element.getBoundingClientRect();
                const style = window.getComputedStyle(element);
                const visible = rect.width > 0 &&
                                rect.height > 0 &&
                                style.visibility !== 'hidden' &&
                                style.display !== 'none';

                return {{ present: true, clickable: visible && !element.disabled }};
            }})()
        "#,
            js_string(&locator.xpath)
        );

        let state = self.evaluate(&js_code)?;
        let key = match condition {
            WaitCondition::Present => "present",
            WaitCondition::Clickable => "clickable",
        };

        Ok(state.get(key).and_then(|v| v.as_bool()).unwrap_or(false))
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        let js_code = format!(
            r#"
            (function() {{
                const element = document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
                if (!element) return false;

                if (element.tagName === 'OPTION') {{
                    const select = element.closest('select');
                    element.selected = true;
                    if (select) {{
                        select.value = element.value;
                        select.dispatchEvent(new Event('input', {{ bubbles: true }}));
                        select.dispatchEvent(new Event('change', {{ bubbles: true }}));
                    }}
                    return true;
                }}

                element.scrollIntoView({{ block: 'center' }});
                element.click();
                return true;
            }})()
        "#,
            js_string(&locator.xpath)
        );

        if self.evaluate(&js_code)?.as_bool() == Some(true) {
            return Ok(());
        }

        Err(CheckoutError::ElementNotFound(locator.to_string()))
    }

    async fn clear_and_type(&mut self, locator: &Locator, text: &str) -> Result<()> {
        let js_code = format!(
            r#"
            (function() {{
                const element = document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
                if (!element) return false;
                element.value = '';
                element.dispatchEvent(new Event('input', {{ bubbles: true }}));
                element.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
        "#,
            js_string(&locator.xpath)
        );

        if self.evaluate(&js_code)?.as_bool() != Some(true) {
            return Err(CheckoutError::ElementNotFound(locator.to_string()));
        }

        let element = self
            .tab()?
            .find_element_by_xpath(&locator.xpath)
            .map_err(|e| CheckoutError::ElementNotFound(e.to_string()))?;

        element
            .click()
            .map_err(|e| CheckoutError::JavaScriptFailed(e.to_string()))?;

        element
            .type_into(text)
            .map_err(|e| CheckoutError::JavaScriptFailed(e.to_string()))?;

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(tab) = self.tab.take() {
            if let Err(e) = tab.close(true) {
                warn!(error = %e, "tab close failed, dropping browser anyway");
            }
        }
        self.browser = None;
        Ok(())
    }
}

/// Embed `raw` in a script as a JavaScript string literal.
fn js_string(raw: &str) -> String {
    Value::String(raw.to_string()).to_string()
}
