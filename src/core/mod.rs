pub mod browser;
pub mod config;
pub mod locator;

pub use browser::BrowserTrait;
pub use config::{BrowserConfig, CheckoutConfig, Config, Viewport};
pub use locator::{xpath_literal, Locator, WaitCondition};
