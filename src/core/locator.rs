use std::fmt;

/// An XPath expression tagged with the step it belongs to.
///
/// `name` is stable across runs and is what logs and timeout errors report;
/// `exact_text` is set on option locators so the whitespace-normalized
/// option text can be checked without re-parsing the expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub name: &'static str,
    pub xpath: String,
    pub exact_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    /// Attached to the document.
    Present,
    /// Present, rendered with a non-empty box, and not disabled.
    Clickable,
}

impl Locator {
    pub fn xpath(name: &'static str, xpath: impl Into<String>) -> Self {
        Self {
            name,
            xpath: xpath.into(),
            exact_text: None,
        }
    }

    /// `<option>` under `select_xpath` whose normalized text equals `text`.
    pub fn option_in(name: &'static str, select_xpath: &str, text: &str) -> Self {
        Self {
            name,
            xpath: format!(
                "{}//option[normalize-space(text())={}]",
                select_xpath,
                xpath_literal(text)
            ),
            exact_text: Some(text.to_string()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.xpath)
    }
}

/// Quote `value` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// split and rebuilt with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
