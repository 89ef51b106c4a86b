use crate::browser::BrowserSession;
use crate::checkout::site;
use crate::core::{BrowserTrait, Config};
use crate::errors::Result;
use crate::types::{CheckoutOutcome, CheckoutReport, Credentials};
use chrono::Utc;
use tracing::{debug, info, warn};

pub const LOGIN_COMPLETED: &str = "Login completed.";
pub const PRODUCT_ADDED: &str = "Product added to cart.";
pub const WARRANTY_DISMISSED: &str = "Warranty offer dismissed.";
pub const CART_OPENED: &str = "Opened the full cart view.";
pub const SHIPPING_CONFIRMED: &str = "Shipping address confirmed.";
pub const PAY_CLICKED: &str = "Clicked pay; waiting for the response...";
pub const PAYMENT_DECLINED: &str = "Payment was declined (expected with test card data).";
pub const PAYMENT_UNVERIFIED: &str =
    "No decline message found; check manually whether the checkout changed.";

/// Progress lines shown to the operator, kept in order for the report.
#[derive(Debug, Default)]
struct Progress {
    messages: Vec<String>,
}

impl Progress {
    fn say(&mut self, message: &str) {
        println!("{}", message);
        self.messages.push(message.to_string());
    }
}

/// Walks the fixed elektra.mx checkout with one set of credentials.
///
/// The walk is forward-only. Two waits may expire without failing the
/// run: the login link (falls back to the login page) and the warranty
/// offer (skipped). Any other failure aborts the walk, and the browser
/// is closed on every path once the session exists.
pub struct CheckoutWalker {
    config: Config,
}

impl CheckoutWalker {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run<B: BrowserTrait>(
        &self,
        browser: B,
        creds: &Credentials,
    ) -> Result<CheckoutReport> {
        let started_at = Utc::now();
        let mut session = BrowserSession::new(browser, self.config.clone()).await?;
        let run_id = session.session_id();
        info!(%run_id, email = %creds.email, "starting checkout walk");

        let mut progress = Progress::default();
        let walked = self.walk(&mut session, creds, &mut progress).await;
        self.finish_session(&mut session).await;

        let outcome = walked?;
        info!(%run_id, ?outcome, "checkout walk finished");

        Ok(CheckoutReport {
            run_id,
            outcome,
            messages: progress.messages,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn walk<B: BrowserTrait>(
        &self,
        session: &mut BrowserSession<B>,
        creds: &Credentials,
        progress: &mut Progress,
    ) -> Result<CheckoutOutcome> {
        self.log_in(session, creds).await?;
        progress.say(LOGIN_COMPLETED);

        self.add_product(session).await?;
        progress.say(PRODUCT_ADDED);

        if self.dismiss_warranty_offer(session).await? {
            progress.say(WARRANTY_DISMISSED);
        }

        self.open_cart(session).await?;
        progress.say(CART_OPENED);

        self.confirm_shipping(session).await?;
        progress.say(SHIPPING_CONFIRMED);

        self.fill_card(session, creds).await?;

        let wait = self.config.checkout.default_timeout();
        session.click_when_clickable(&site::pay_button(), wait).await?;
        progress.say(PAY_CLICKED);

        session.pause(self.config.checkout.settle_delay()).await;
        if session.is_present_now(&site::decline_banner()).await {
            progress.say(PAYMENT_DECLINED);
            Ok(CheckoutOutcome::Declined)
        } else {
            progress.say(PAYMENT_UNVERIFIED);
            Ok(CheckoutOutcome::Unverified)
        }
    }

    async fn log_in<B: BrowserTrait>(
        &self,
        session: &mut BrowserSession<B>,
        creds: &Credentials,
    ) -> Result<()> {
        let wait = self.config.checkout.default_timeout();
        session.open_path(site::ROOT_PATH).await?;

        match session.click_when_clickable(&site::login_link(), wait).await {
            Ok(()) => {}
            Err(e) if e.is_wait_timeout() => {
                debug!("login link never became clickable, opening the login page directly");
                session.open_path(site::LOGIN_PATH).await?;
            }
            Err(e) => return Err(e),
        }

        session
            .fill_when_present(&site::email_input(), &creds.email, wait)
            .await?;
        session
            .fill_when_present(&site::password_input(), &creds.password, wait)
            .await?;
        session.click_when_clickable(&site::login_submit(), wait).await
    }

    async fn add_product<B: BrowserTrait>(&self, session: &mut BrowserSession<B>) -> Result<()> {
        session.open_path(site::PRODUCT_PATH).await?;
        session
            .click_when_clickable(&site::add_to_cart(), self.config.checkout.default_timeout())
            .await
    }

    /// Returns whether the offer was shown and dismissed.
    async fn dismiss_warranty_offer<B: BrowserTrait>(
        &self,
        session: &mut BrowserSession<B>,
    ) -> Result<bool> {
        let wait = self.config.checkout.short_timeout();
        match session.click_when_clickable(&site::warranty_decline(), wait).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_wait_timeout() => {
                debug!("no warranty offer shown");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn open_cart<B: BrowserTrait>(&self, session: &mut BrowserSession<B>) -> Result<()> {
        let wait = self.config.checkout.default_timeout();
        session.click_when_clickable(&site::cart_icon(), wait).await?;
        session
            .click_when_clickable(&site::continue_purchase(), wait)
            .await
    }

    async fn confirm_shipping<B: BrowserTrait>(
        &self,
        session: &mut BrowserSession<B>,
    ) -> Result<()> {
        let wait = self.config.checkout.default_timeout();
        session.click_when_clickable(&site::cart_continue(), wait).await?;
        session
            .click_when_clickable(&site::shipping_continue(), wait)
            .await
    }

    async fn fill_card<B: BrowserTrait>(
        &self,
        session: &mut BrowserSession<B>,
        creds: &Credentials,
    ) -> Result<()> {
        let wait = self.config.checkout.default_timeout();
        session
            .click_when_clickable(&site::card_payment_method(), wait)
            .await?;

        session
            .fill_when_present(&site::card_number_input(), &creds.card_number, wait)
            .await?;
        session
            .fill_when_present(&site::card_name_input(), &creds.card_name, wait)
            .await?;

        session
            .click_when_clickable(&site::expiry_month_select(), wait)
            .await?;
        session
            .click_when_clickable(&site::expiry_month_option(&creds.card_exp_month), wait)
            .await?;

        session
            .click_when_clickable(&site::expiry_year_select(), wait)
            .await?;
        session
            .click_when_clickable(&site::expiry_year_option(&creds.card_exp_year), wait)
            .await?;

        session
            .fill_when_present(&site::cvv_input(), &creds.card_cvv, wait)
            .await
    }

    async fn finish_session<B: BrowserTrait>(&self, session: &mut BrowserSession<B>) {
        session.pause(self.config.checkout.linger_delay()).await;
        if let Err(e) = session.close().await {
            warn!(error = %e, "browser did not close cleanly");
        }
    }
}
