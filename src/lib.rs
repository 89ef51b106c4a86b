pub mod browser;
pub mod checkout;
pub mod core;
pub mod errors;
pub mod testing;
pub mod types;

#[cfg(feature = "chrome")]
pub use browser::ChromeBrowser;
pub use browser::BrowserSession;
pub use checkout::CheckoutWalker;
pub use crate::core::{BrowserTrait, Config, Locator, WaitCondition};
pub use errors::{CheckoutError, Result};
pub use types::*;
