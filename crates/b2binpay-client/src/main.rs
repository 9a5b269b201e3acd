use b2binpay::request::parse_form;
use b2binpay::{
    B2BinPayError, GatewayConfig, HttpMethod, ReqwestTransport, RequestExecutor, TokenSession,
    WALLETS_PATH,
};
use tracing_subscriber::EnvFilter;

async fn run() -> Result<serde_json::Value, B2BinPayError> {
    let config = GatewayConfig::from_env()?;

    let method: HttpMethod = std::env::var("B2BINPAY_METHOD")
        .unwrap_or_else(|_| "GET".to_string())
        .parse()?;
    let endpoint =
        std::env::var("B2BINPAY_ENDPOINT").unwrap_or_else(|_| WALLETS_PATH.to_string());
    let params = std::env::var("B2BINPAY_PARAMS")
        .ok()
        .filter(|p| !p.is_empty())
        .map(|p| parse_form(&p));

    let url = config.endpoint(&endpoint);

    tracing::info!(gateway = %config.base_url, %method, %url, "calling B2BinPay");

    let executor = RequestExecutor::new(ReqwestTransport::with_timeout(config.timeout)?);
    let session = TokenSession::new(executor, config.credential(), config.login_url())?;

    session.send(method, &url, params).await
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(data) => {
            println!("{}", serde_json::to_string_pretty(&data).unwrap_or_default());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
