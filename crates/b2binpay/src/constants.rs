/// Production gateway base URL.
pub const GATEWAY_PRODUCTION: &str = "https://gw.b2binpay.com";

/// Test (sandbox) gateway base URL.
pub const GATEWAY_TEST: &str = "https://gw-test.b2binpay.com";

/// Token acquisition path, called with basic auth.
pub const LOGIN_PATH: &str = "/api/login";

/// Wallet listing path, used by the CLI as its default endpoint.
pub const WALLETS_PATH: &str = "/api/v1/pay/wallets";

/// `(code, error)` pair the gateway returns when a bearer token has expired.
pub const TOKEN_EXPIRED: (&str, &str) = ("-240", "RESULT_TOKEN_ERROR_EXPIRED");

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Content type of request bodies carrying form parameters.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
