//! Paths and element locators for the elektra.mx storefront.
//!
//! Labels are matched on the Spanish UI text the store renders today; a
//! storefront redesign breaks these before anything else.

use crate::core::Locator;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/Login";
pub const PRODUCT_PATH: &str = "/maquina-de-coser-singer-heavy-duty-9000481/p";

const MONTH_SELECT: &str = "//select[contains(@name,'month') or contains(@id,'month')]";
const YEAR_SELECT: &str = "//select[contains(@name,'year') or contains(@id,'year')]";

pub fn login_link() -> Locator {
    Locator::xpath(
        "login_link",
        "//span[contains(text(),'Inicia sesión')] | //a[contains(text(),'Inicia sesión')]",
    )
}

pub fn email_input() -> Locator {
    Locator::xpath(
        "email_input",
        "//input[@type='email' or contains(@placeholder,'Correo')]",
    )
}

pub fn password_input() -> Locator {
    Locator::xpath(
        "password_input",
        "//input[@type='password' or contains(@placeholder,'Contraseña')]",
    )
}

pub fn login_submit() -> Locator {
    Locator::xpath("login_submit", "//button[contains(.,'Iniciar sesión')]")
}

pub fn add_to_cart() -> Locator {
    Locator::xpath("add_to_cart", "//button[contains(.,'Agregar al carrito')]")
}

/// Extended-warranty offer shown after adding to cart, not on every visit.
pub fn warranty_decline() -> Locator {
    Locator::xpath(
        "warranty_decline",
        "//button[contains(.,'No, gracias')] | //span[contains(.,'No, gracias')]",
    )
}

pub fn cart_icon() -> Locator {
    Locator::xpath(
        "cart_icon",
        "//button[contains(@aria-label,'carrito') or contains(@class,'minicart')]//span[contains(@class,'icon-cart')] | //div[contains(@class,'minicart')]",
    )
}

pub fn continue_purchase() -> Locator {
    Locator::xpath(
        "continue_purchase",
        "//button[contains(.,'Continuar con la compra') or contains(.,'Continuar con tu compra')]",
    )
}

pub fn cart_continue() -> Locator {
    Locator::xpath(
        "cart_continue",
        "//button[contains(.,'Continuar con tu compra') and not(@disabled)]",
    )
}

pub fn shipping_continue() -> Locator {
    Locator::xpath(
        "shipping_continue",
        "//button[contains(.,'Continuar con el pago')]",
    )
}

pub fn card_payment_method() -> Locator {
    Locator::xpath(
        "card_payment_method",
        "//span[contains(.,'Tarjeta de débito o crédito')]",
    )
}

pub fn card_number_input() -> Locator {
    Locator::xpath(
        "card_number_input",
        "//input[@inputmode='numeric' or @placeholder='Número de tarjeta' or contains(@aria-label,'Número de la tarjeta')]",
    )
}

pub fn card_name_input() -> Locator {
    Locator::xpath(
        "card_name_input",
        "//input[contains(@placeholder,'Nombre') or contains(@aria-label,'Nombre')]",
    )
}

pub fn expiry_month_select() -> Locator {
    Locator::xpath("expiry_month_select", MONTH_SELECT)
}

pub fn expiry_month_option(month: &str) -> Locator {
    Locator::option_in("expiry_month_option", MONTH_SELECT, month)
}

pub fn expiry_year_select() -> Locator {
    Locator::xpath("expiry_year_select", YEAR_SELECT)
}

pub fn expiry_year_option(year: &str) -> Locator {
    Locator::option_in("expiry_year_option", YEAR_SELECT, year)
}

pub fn cvv_input() -> Locator {
    Locator::xpath(
        "cvv_input",
        "//input[@type='password' or contains(@placeholder,'Seguridad') or contains(@aria-label,'Seguridad')]",
    )
}

pub fn pay_button() -> Locator {
    Locator::xpath("pay_button", "//button[contains(.,'Pagar') and not(@disabled)]")
}

pub fn decline_banner() -> Locator {
    Locator::xpath(
        "decline_banner",
        "//div[contains(@class,'modal')]//p[contains(.,'Pago declinado')]",
    )
}
