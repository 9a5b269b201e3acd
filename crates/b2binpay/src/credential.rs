use base64::Engine;

/// Credential placed in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Short-lived access token: `Authorization: Bearer <token>`.
    Bearer(String),
    /// Pre-encoded basic value: `Authorization: Basic <value>`.
    Basic(String),
}

impl Credential {
    /// Basic credential for token acquisition, encoded as base64 of `key:secret`.
    pub fn basic_from_key(key: &str, secret: &str) -> Self {
        let raw = format!("{key}:{secret}");
        Self::Basic(base64::engine::general_purpose::STANDARD.encode(raw))
    }

    /// Token or basic value without the scheme prefix.
    pub fn value(&self) -> &str {
        match self {
            Self::Bearer(token) => token,
            Self::Basic(value) => value,
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::Basic(value) => format!("Basic {value}"),
        }
    }
}

// Tokens never reach logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
            Self::Basic(_) => f.write_str("Basic(***)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let cred = Credential::Bearer("tok123".to_string());
        assert_eq!(cred.authorization_header(), "Bearer tok123");
    }

    #[test]
    fn test_basic_header() {
        let cred = Credential::Basic("dXNlcjpwYXNz".to_string());
        assert_eq!(cred.authorization_header(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_from_key_encodes_key_and_secret() {
        let cred = Credential::basic_from_key("user", "pass");
        assert_eq!(cred, Credential::Basic("dXNlcjpwYXNz".to_string()));
        assert_eq!(cred.value(), "dXNlcjpwYXNz");
    }

    #[test]
    fn test_debug_hides_secret() {
        let cred = Credential::Bearer("super-secret".to_string());
        let printed = format!("{cred:?}");
        assert!(!printed.contains("super-secret"));
    }
}
