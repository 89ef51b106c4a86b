use checkout_walker::checkout::{site, walker};
use checkout_walker::testing::{SiteAction, SiteElement, StandInSite};
use checkout_walker::{CheckoutError, CheckoutOutcome, CheckoutWalker, Config, Credentials};
use std::time::Duration;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

fn test_credentials() -> Credentials {
    Credentials {
        email: "buyer@example.com".to_string(),
        password: "s3cret".to_string(),
        card_number: "4242424242424242".to_string(),
        card_name: "Test Buyer".to_string(),
        card_exp_month: "12".to_string(),
        card_exp_year: "27".to_string(),
        card_cvv: "123".to_string(),
    }
}

fn headless_walker() -> CheckoutWalker {
    CheckoutWalker::new(Config::default().headless(true))
}

#[tokio::test(start_paused = true)]
async fn test_declined_payment_is_reported_once() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();

    let report = assert_ok!(headless_walker().run(stand_in, &test_credentials()).await);

    assert_eq!(report.outcome, CheckoutOutcome::Declined);
    assert_eq!(report.count_message(walker::PAYMENT_DECLINED), 1);
    assert_eq!(report.count_message(walker::PAYMENT_UNVERIFIED), 0);
    assert_eq!(log.close_count(), 1);
    assert_eq!(log.actions().last(), Some(&SiteAction::Close));
}

#[tokio::test(start_paused = true)]
async fn test_missing_banner_is_reported_unverified() {
    let stand_in = StandInSite::checkout_ready().without(site::decline_banner().name);
    let log = stand_in.action_log();

    let report = assert_ok!(headless_walker().run(stand_in, &test_credentials()).await);

    assert_eq!(report.outcome, CheckoutOutcome::Unverified);
    assert_eq!(report.count_message(walker::PAYMENT_UNVERIFIED), 1);
    assert_eq!(report.count_message(walker::PAYMENT_DECLINED), 0);
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_progress_messages_follow_the_walk() {
    let report = headless_walker()
        .run(StandInSite::checkout_ready(), &test_credentials())
        .await
        .unwrap();

    assert_eq!(
        report.messages,
        vec![
            walker::LOGIN_COMPLETED,
            walker::PRODUCT_ADDED,
            walker::CART_OPENED,
            walker::SHIPPING_CONFIRMED,
            walker::PAY_CLICKED,
            walker::PAYMENT_DECLINED,
        ]
    );
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test(start_paused = true)]
async fn test_login_form_gets_email_then_password_before_submit() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();
    let creds = test_credentials();

    assert_ok!(headless_walker().run(stand_in, &creds).await);

    let email = log
        .position(&SiteAction::Type(
            site::email_input().name,
            creds.email.clone(),
        ))
        .expect("email typed");
    let password = log
        .position(&SiteAction::Type(
            site::password_input().name,
            creds.password.clone(),
        ))
        .expect("password typed");
    let submit = log
        .click_position(site::login_submit().name)
        .expect("login submitted");

    assert!(email < password);
    assert!(password < submit);

    let typed_into_login: Vec<_> = log
        .actions()
        .into_iter()
        .take(submit)
        .filter(|a| matches!(a, SiteAction::Type(..)))
        .collect();
    assert_eq!(typed_into_login.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_card_fields_are_filled_with_supplied_values() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();
    let creds = test_credentials();

    assert_ok!(headless_walker().run(stand_in, &creds).await);

    let actions = log.actions();
    assert!(actions.contains(&SiteAction::Type(
        site::card_number_input().name,
        creds.card_number.clone()
    )));
    assert!(actions.contains(&SiteAction::Type(
        site::card_name_input().name,
        creds.card_name.clone()
    )));
    assert!(actions.contains(&SiteAction::Type(
        site::cvv_input().name,
        creds.card_cvv.clone()
    )));

    let month = log.click_position(site::expiry_month_option("").name).unwrap();
    let year = log.click_position(site::expiry_year_option("").name).unwrap();
    let pay = log.click_position(site::pay_button().name).unwrap();
    assert!(month < year);
    assert!(year < pay);
}

#[tokio::test(start_paused = true)]
async fn test_absent_upsell_costs_only_the_short_wait() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();
    let started = Instant::now();

    let report = assert_ok!(headless_walker().run(stand_in, &test_credentials()).await);

    // short upsell wait + settle delay + linger delay
    assert_eq!(started.elapsed(), Duration::from_secs(10 + 10 + 5));
    assert!(!log.clicked(site::warranty_decline().name));
    assert!(log.clicked(site::cart_icon().name));
    assert_eq!(report.count_message(walker::WARRANTY_DISMISSED), 0);
}

#[tokio::test(start_paused = true)]
async fn test_present_upsell_is_dismissed_before_cart() {
    let stand_in = StandInSite::checkout_ready()
        .with_element(site::warranty_decline().name, SiteElement::hidden())
        .revealed_by(site::add_to_cart().name, site::warranty_decline().name);
    let log = stand_in.action_log();

    let report = assert_ok!(headless_walker().run(stand_in, &test_credentials()).await);

    let dismissed = log.click_position(site::warranty_decline().name).unwrap();
    let cart = log.click_position(site::cart_icon().name).unwrap();
    assert!(dismissed < cart);
    assert_eq!(report.count_message(walker::WARRANTY_DISMISSED), 1);
}

#[tokio::test(start_paused = true)]
async fn test_missing_login_link_falls_back_to_login_page() {
    let stand_in = StandInSite::checkout_ready().without(site::login_link().name);
    let log = stand_in.action_log();

    assert_ok!(headless_walker().run(stand_in, &test_credentials()).await);

    let navigations = log.navigations();
    assert_eq!(
        navigations,
        vec![
            "https://www.elektra.mx/".to_string(),
            "https://www.elektra.mx/Login".to_string(),
            format!("https://www.elektra.mx{}", site::PRODUCT_PATH),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_expiry_month_must_match_option_text_exactly() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();
    let creds = Credentials {
        card_exp_month: "7".to_string(),
        ..test_credentials()
    };

    let err = assert_err!(headless_walker().run(stand_in, &creds).await);

    assert!(err.is_wait_timeout());
    assert!(err.to_string().contains("expiry_month_option"));
    assert!(!log.clicked(site::pay_button().name));
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expiry_year_outside_offered_range_aborts() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();
    let creds = Credentials {
        card_exp_year: "99".to_string(),
        ..test_credentials()
    };

    let err = assert_err!(headless_walker().run(stand_in, &creds).await);

    assert!(err.to_string().contains("expiry_year_option"));
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_session_closes_once_wherever_a_step_times_out() {
    let required = [
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

    for locator in required {
        let stand_in = StandInSite::checkout_ready().without(locator.name);
        let log = stand_in.action_log();

        let err = assert_err!(headless_walker().run(stand_in, &test_credentials()).await);

        assert!(err.is_wait_timeout(), "{} should time out", locator.name);
        assert!(err.to_string().contains(locator.name));
        assert_eq!(log.close_count(), 1, "close count after {}", locator.name);
        assert_eq!(log.actions().last(), Some(&SiteAction::Close));
    }
}

#[tokio::test(start_paused = true)]
async fn test_disabled_controls_are_never_clicked() {
    let stand_in = StandInSite::checkout_ready()
        .with_element(site::cart_continue().name, SiteElement::disabled());
    let log = stand_in.action_log();

    let err = assert_err!(headless_walker().run(stand_in, &test_credentials()).await);

    assert!(err.is_wait_timeout());
    assert!(!log.clicked(site::cart_continue().name));
    assert!(!log.clicked(site::shipping_continue().name));
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_headless_flag_reaches_the_browser() {
    let stand_in = StandInSite::checkout_ready();
    let log = stand_in.action_log();

    assert_ok!(headless_walker().run(stand_in, &test_credentials()).await);

    assert_eq!(
        log.actions().first(),
        Some(&SiteAction::Launch { headless: true })
    );
}

#[tokio::test(start_paused = true)]
async fn test_login_link_fault_aborts_without_fallback() {
    let stand_in = StandInSite::checkout_ready().detached_on_click(site::login_link().name);
    let log = stand_in.action_log();

    let err = assert_err!(headless_walker().run(stand_in, &test_credentials()).await);

    assert!(matches!(err, CheckoutError::ElementNotFound(_)));
    assert!(!log
        .navigations()
        .iter()
        .any(|url| url.ends_with(site::LOGIN_PATH)));
    assert!(!log.actions().iter().any(|a| matches!(a, SiteAction::Type(..))));
    assert_eq!(log.close_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_warranty_offer_fault_aborts_before_cart() {
    let stand_in = StandInSite::checkout_ready()
        .with_element(site::warranty_decline().name, SiteElement::ready())
        .detached_on_click(site::warranty_decline().name);
    let log = stand_in.action_log();

    let err = assert_err!(headless_walker().run(stand_in, &test_credentials()).await);

    assert!(matches!(err, CheckoutError::ElementNotFound(_)));
    assert!(err.to_string().contains("warranty_decline"));
    assert!(!log.clicked(site::cart_icon().name));
    assert_eq!(log.close_count(), 1);
}
