//! The request executor: one authenticated call, decoded and classified.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::credential::Credential;
use crate::error::B2BinPayError;
use crate::request::{HttpMethod, Params, RequestSpec};
use crate::response::ApiResponse;
use crate::transport::HttpTransport;

/// Issues gateway calls through an injected [`HttpTransport`].
///
/// Stateless between calls. HTTP error statuses never short-circuit: the body
/// is always decoded, and an `error` field in it decides the outcome.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    transport: T,
}

impl<T: HttpTransport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Call an API endpoint with a bearer token and return the `data` field.
    ///
    /// Returns JSON `null` when the payload has no `data`.
    pub async fn send_with_token(
        &self,
        token: &str,
        method: HttpMethod,
        url: &str,
        params: Option<Params>,
    ) -> Result<Value, B2BinPayError> {
        let spec = RequestSpec::new(method, url, Credential::Bearer(token.to_string()))
            .with_params(params);
        let payload = self.execute(spec).await?;
        Ok(take_field(payload, "data").unwrap_or(Value::Null))
    }

    /// Like [`send_with_token`](Self::send_with_token), deserializing `data` into `R`.
    pub async fn send_with_token_as<R: DeserializeOwned>(
        &self,
        token: &str,
        method: HttpMethod,
        url: &str,
        params: Option<Params>,
    ) -> Result<R, B2BinPayError> {
        let data = self.send_with_token(token, method, url, params).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Exchange a basic-auth value for an access token.
    pub async fn fetch_token(&self, basic_auth: &str, url: &str) -> Result<String, B2BinPayError> {
        let spec = RequestSpec::new(
            HttpMethod::Get,
            url,
            Credential::Basic(basic_auth.to_string()),
        );
        let payload = self.execute(spec).await?;
        match take_field(payload, "access_token") {
            Some(Value::String(token)) => Ok(token),
            _ => Err(B2BinPayError::MissingField {
                url: url.to_string(),
                field: "access_token",
            }),
        }
    }

    /// Send one request and classify the decoded body.
    pub async fn execute(&self, spec: RequestSpec) -> Result<Value, B2BinPayError> {
        let url = spec.url.clone();
        let method = spec.method;
        let request = spec.into_transport();

        tracing::debug!(
            %method,
            url = %request.url,
            has_body = request.body.is_some(),
            "sending gateway request"
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(B2BinPayError::Connection)?;
        let status = response.status;

        tracing::debug!(%method, %url, status, bytes = response.body.len(), "gateway responded");

        match ApiResponse::decode(&response.body) {
            None => {
                tracing::warn!(%url, status, "empty or undecodable gateway response");
                Err(B2BinPayError::EmptyResponse { url })
            }
            Some(ApiResponse::Failure(failure)) if failure.is_token_expired() => {
                tracing::debug!(%url, status, "gateway reports expired token");
                Err(B2BinPayError::UpdateTokenRequired)
            }
            Some(ApiResponse::Failure(failure)) => {
                tracing::warn!(
                    %url,
                    status,
                    code = %failure.code,
                    error = %failure.error,
                    "gateway api error"
                );
                Err(B2BinPayError::ServerApi {
                    message: failure.error,
                    code: failure.code,
                    status,
                })
            }
            Some(ApiResponse::Success(payload)) => Ok(payload),
        }
    }
}

fn take_field(payload: Value, field: &str) -> Option<Value> {
    match payload {
        Value::Object(mut map) => map.remove(field),
        _ => None,
    }
}
