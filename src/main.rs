use checkout_walker::{CheckoutWalker, ChromeBrowser, Config, Credentials};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("checkout_walker=info")),
        )
        .init();

    // Replace with a real account before running; the card is a test number
    // and is expected to be declined.
    let creds = Credentials {
        email: "vvvvvv@outlook.com".to_string(),
        password: "kkkkkkk".to_string(),
        card_number: "4242424242424242".to_string(),
        card_name: "Pruebas Gee".to_string(),
        card_exp_month: "12".to_string(),
        card_exp_year: "27".to_string(),
        card_cvv: "123".to_string(),
    };

    let config = Config::default().headless(false);
    info!(?creds, "Starting checkout walk");

    let walker = CheckoutWalker::new(config);
    match walker.run(ChromeBrowser::new(), &creds).await {
        Ok(report) => {
            info!(run_id = %report.run_id, outcome = ?report.outcome, "Checkout walk completed");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Checkout walk aborted");
            Err(e.into())
        }
    }
}
