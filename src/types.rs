use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Login and payment data for one checkout run.
///
/// Fields are taken as-is: expiry month and year are expected as two-digit
/// strings ("12", "27") because they are matched against option text verbatim.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub card_number: String,
    pub card_name: String,
    pub card_exp_month: String,
    pub card_exp_year: String,
    pub card_cvv: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("card_number", &mask_card_number(&self.card_number))
            .field("card_name", &self.card_name)
            .field("card_exp_month", &self.card_exp_month)
            .field("card_exp_year", &self.card_exp_year)
            .field("card_cvv", &"<redacted>")
            .finish()
    }
}

fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| !c.is_whitespace()).collect();
    let visible = digits.len().min(4);
    let tail: String = digits[digits.len() - visible..].iter().collect();
    format!("{}{}", "*".repeat(digits.len() - visible), tail)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// The decline banner was shown after paying.
    Declined,
    /// No decline banner was found; the result needs a manual look.
    Unverified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutReport {
    pub run_id: Uuid,
    pub outcome: CheckoutOutcome,
    pub messages: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CheckoutReport {
    pub fn count_message(&self, message: &str) -> usize {
        self.messages.iter().filter(|m| m.as_str() == message).count()
    }
}
