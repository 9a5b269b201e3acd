//! Request executor for the B2BinPay payment gateway.
//!
//! Attaches the `Authorization` header, performs one HTTP call through an
//! injected [`HttpTransport`], decodes the JSON body and maps gateway error
//! bodies to [`B2BinPayError`] variants.
//!
//! # Outcomes of a call
//!
//! - **Success**: the decoded payload (`data` for API calls, `access_token` for login)
//! - [`B2BinPayError::Connection`]: the transport failed
//! - [`B2BinPayError::EmptyResponse`]: empty or non-JSON body
//! - [`B2BinPayError::UpdateTokenRequired`]: the bearer token expired
//! - [`B2BinPayError::ServerApi`]: any other gateway error
//!
//! # Quick example
//!
//! ```no_run
//! use b2binpay::{GatewayConfig, HttpMethod, ReqwestTransport, RequestExecutor, WALLETS_PATH};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), b2binpay::B2BinPayError> {
//! let config = GatewayConfig::from_env()?;
//! let executor = RequestExecutor::new(ReqwestTransport::with_timeout(config.timeout)?);
//!
//! let token = executor
//!     .fetch_token(config.credential().value(), &config.login_url())
//!     .await?;
//! let wallets = executor
//!     .send_with_token(&token, HttpMethod::Get, &config.endpoint(WALLETS_PATH), None)
//!     .await?;
//! println!("{wallets}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod credential;
pub mod error;
pub mod executor;
pub mod request;
pub mod response;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::GatewayConfig;
pub use constants::*;
pub use credential::Credential;
pub use error::B2BinPayError;
pub use executor::RequestExecutor;
pub use request::{HttpMethod, Params, RequestSpec};
pub use response::{ApiFailure, ApiResponse};
pub use session::TokenSession;
pub use transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
