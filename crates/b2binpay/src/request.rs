use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::constants::FORM_CONTENT_TYPE;
use crate::credential::Credential;
use crate::error::B2BinPayError;
use crate::transport::TransportRequest;

/// HTTP methods accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Mutations carry their parameters as a form body; other methods use the query string.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = B2BinPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(B2BinPayError::InvalidMethod(s.to_string())),
        }
    }
}

/// Form parameters in insertion order.
pub type Params = Vec<(String, String)>;

/// Everything needed to issue one gateway call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub credential: Credential,
    pub params: Option<Params>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>, credential: Credential) -> Self {
        Self {
            method,
            url: url.into(),
            credential,
            params: None,
        }
    }

    pub fn with_params(mut self, params: Option<Params>) -> Self {
        self.params = params;
        self
    }

    /// Lower into a wire request: auth header, then parameters as form body or query.
    pub fn into_transport(self) -> TransportRequest {
        let mut headers = vec![(
            "Authorization".to_string(),
            self.credential.authorization_header(),
        )];
        let mut url = self.url;
        let mut body = None;

        if let Some(params) = self.params.filter(|p| !p.is_empty()) {
            let encoded = encode_form(&params);
            if self.method.is_mutation() {
                headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
                body = Some(encoded);
            } else {
                let sep = if url.contains('?') { '&' } else { '?' };
                url = format!("{url}{sep}{encoded}");
            }
        }

        TransportRequest {
            method: self.method,
            url,
            headers,
            body,
        }
    }
}

/// Encode parameters as `application/x-www-form-urlencoded`.
pub fn encode_form(params: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Parse `a=1&b=2` into ordered parameters.
pub fn parse_form(input: &str) -> Params {
    form_urlencoded::parse(input.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
