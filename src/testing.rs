//! In-memory storefront that stands in for Chrome in tests.
//!
//! Elements are keyed by locator name rather than matched by XPath, so a
//! scenario is described as "which steps' elements exist, and in what
//! state". Everything the walker does is appended to a shared
//! [`ActionLog`] that stays readable after the site has been moved into a
//! session.

use crate::checkout::site;
use crate::core::{BrowserTrait, Config, Locator, WaitCondition};
use crate::errors::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteAction {
    Launch { headless: bool },
    Navigate(String),
    Click(&'static str),
    Type(&'static str, String),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteElement {
    pub present: bool,
    pub enabled: bool,
}

impl SiteElement {
    pub fn ready() -> Self {
        Self {
            present: true,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            present: true,
            enabled: false,
        }
    }

    /// Not in the page until something reveals it.
    pub fn hidden() -> Self {
        Self {
            present: false,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: Arc<Mutex<Vec<SiteAction>>>,
}

impl ActionLog {
    fn push(&self, action: SiteAction) {
        if let Ok(mut actions) = self.actions.lock() {
            actions.push(action);
        }
    }

    pub fn actions(&self) -> Vec<SiteAction> {
        self.actions
            .lock()
            .map(|actions| actions.clone())
            .unwrap_or_default()
    }

    pub fn close_count(&self) -> usize {
        self.count(|a| matches!(a, SiteAction::Close))
    }

    pub fn clicked(&self, name: &str) -> bool {
        self.click_position(name).is_some()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                SiteAction::Navigate(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Index of the first action equal to `action`.
    pub fn position(&self, action: &SiteAction) -> Option<usize> {
        self.actions().iter().position(|a| a == action)
    }

    /// Index of the first click on the element called `name`.
    pub fn click_position(&self, name: &str) -> Option<usize> {
        self.actions()
            .iter()
            .position(|a| matches!(a, SiteAction::Click(n) if *n == name))
    }

    fn count(&self, pred: impl Fn(&SiteAction) -> bool) -> usize {
        self.actions().iter().filter(|a| pred(a)).count()
    }
}

pub struct StandInSite {
    elements: HashMap<&'static str, SiteElement>,
    options: HashMap<&'static str, Vec<String>>,
    reveals: HashMap<&'static str, Vec<&'static str>>,
    detached_on_click: HashSet<&'static str>,
    log: ActionLog,
    launched: bool,
}

impl StandInSite {
    /// An empty page: every wait expires.
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            options: HashMap::new(),
            reveals: HashMap::new(),
            detached_on_click: HashSet::new(),
            log: ActionLog::default(),
            launched: false,
        }
    }

    /// Every control the walk needs is present, there is no warranty
    /// offer, and the decline banner appears once pay is clicked.
    pub fn checkout_ready() -> Self {
        let ready = [
            site::login_link(),
            site::email_input(),
            site::password_input(),
            site::login_submit(),
            site::add_to_cart(),
            site::cart_icon(),
            site::continue_purchase(),
            site::cart_continue(),
            site::shipping_continue(),
            site::card_payment_method(),
            site::card_number_input(),
            site::card_name_input(),
            site::expiry_month_select(),
            site::expiry_year_select(),
            site::cvv_input(),
            site::pay_button(),
        ];

        let mut stand_in = Self::new();
        for locator in ready {
            stand_in = stand_in.with_element(locator.name, SiteElement::ready());
        }

        let months = (1..=12).map(|m| format!("{:02}", m)).collect();
        let years = (24..=35).map(|y| format!("{:02}", y)).collect();

        stand_in
            .with_options(site::expiry_month_option("").name, months)
            .with_options(site::expiry_year_option("").name, years)
            .with_element(site::decline_banner().name, SiteElement::hidden())
            .revealed_by(site::pay_button().name, site::decline_banner().name)
    }

    pub fn with_element(mut self, name: &'static str, element: SiteElement) -> Self {
        self.elements.insert(name, element);
        self
    }

    pub fn without(mut self, name: &'static str) -> Self {
        self.elements.remove(name);
        self
    }

    /// Option texts offered for an option locator name.
    pub fn with_options(mut self, name: &'static str, texts: Vec<String>) -> Self {
        self.options.insert(name, texts);
        self
    }

    /// Clicking `trigger` makes `revealed` present.
    pub fn revealed_by(mut self, trigger: &'static str, revealed: &'static str) -> Self {
        self.reveals.entry(trigger).or_default().push(revealed);
        self
    }

    /// `name` probes as clickable but is gone by the time it is clicked.
    pub fn detached_on_click(mut self, name: &'static str) -> Self {
        self.detached_on_click.insert(name);
        self
    }

    pub fn action_log(&self) -> ActionLog {
        self.log.clone()
    }

    fn element_state(&self, locator: &Locator) -> Option<SiteElement> {
        if let Some(text) = &locator.exact_text {
            let listed = self
                .options
                .get(locator.name)
                .map(|texts| texts.iter().any(|t| normalize_space(t) == *text))
                .unwrap_or(false);
            return listed.then(SiteElement::ready);
        }

        self.elements
            .get(locator.name)
            .copied()
            .filter(|element| element.present)
    }

    fn require(&self, locator: &Locator) -> Result<()> {
        if !self.launched {
            return Err(CheckoutError::BrowserNotLaunched);
        }
        match self.element_state(locator) {
            Some(_) => Ok(()),
            None => Err(CheckoutError::ElementNotFound(locator.to_string())),
        }
    }
}

impl Default for StandInSite {
    fn default() -> Self {
        Self::new()
    }
}

/// XPath `normalize-space()`: trim and collapse inner whitespace runs.
fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl BrowserTrait for StandInSite {
    async fn launch(&mut self, config: &Config) -> Result<()> {
        self.launched = true;
        self.log.push(SiteAction::Launch {
            headless: config.browser.headless,
        });
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        if !self.launched {
            return Err(CheckoutError::BrowserNotLaunched);
        }
        self.log.push(SiteAction::Navigate(url.to_string()));
        Ok(())
    }

    async fn probe(&self, locator: &Locator, condition: WaitCondition) -> Result<bool> {
        if !self.launched {
            return Err(CheckoutError::BrowserNotLaunched);
        }
        Ok(match (self.element_state(locator), condition) {
            (None, _) => false,
            (Some(_), WaitCondition::Present) => true,
            (Some(element), WaitCondition::Clickable) => element.enabled,
        })
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        self.require(locator)?;
        if self.detached_on_click.contains(locator.name) {
            return Err(CheckoutError::ElementNotFound(locator.to_string()));
        }
        self.log.push(SiteAction::Click(locator.name));

        if let Some(revealed) = self.reveals.get(locator.name).cloned() {
            for name in revealed {
                if let Some(element) = self.elements.get_mut(name) {
                    element.present = true;
                }
            }
        }
        Ok(())
    }

    async fn clear_and_type(&mut self, locator: &Locator, text: &str) -> Result<()> {
        self.require(locator)?;
        self.log
            .push(SiteAction::Type(locator.name, text.to_string()));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.launched = false;
        self.log.push(SiteAction::Close);
        Ok(())
    }
}
