//! Token-caching caller built on [`RequestExecutor`].
//!
//! The executor never retries. [`TokenSession`] does what a well-behaved caller
//! should: keep the last access token, and on
//! [`B2BinPayError::UpdateTokenRequired`] fetch a new one and retry once.

use serde_json::Value;
use tokio::sync::RwLock;

use crate::credential::Credential;
use crate::error::B2BinPayError;
use crate::executor::RequestExecutor;
use crate::request::{HttpMethod, Params};
use crate::transport::HttpTransport;

pub struct TokenSession<T> {
    executor: RequestExecutor<T>,
    basic_auth: String,
    token_url: String,
    token: RwLock<Option<String>>,
}

impl<T: HttpTransport> TokenSession<T> {
    /// `credential` must be [`Credential::Basic`]; bearer credentials cannot mint tokens.
    pub fn new(
        executor: RequestExecutor<T>,
        credential: Credential,
        token_url: impl Into<String>,
    ) -> Result<Self, B2BinPayError> {
        let Credential::Basic(basic_auth) = credential else {
            return Err(B2BinPayError::Config(
                "token session needs a basic credential".to_string(),
            ));
        };
        Ok(Self {
            executor,
            basic_auth,
            token_url: token_url.into(),
            token: RwLock::new(None),
        })
    }

    /// Cached access token, fetching one if none is held.
    pub async fn token(&self) -> Result<String, B2BinPayError> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }
        self.refresh().await
    }

    /// Drop the cached token; the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        self.token.write().await.take();
    }

    async fn refresh(&self) -> Result<String, B2BinPayError> {
        self.refresh_replacing(None).await
    }

    /// Fetch a new token unless the cache already holds one other than `stale`.
    async fn refresh_replacing(&self, stale: Option<&str>) -> Result<String, B2BinPayError> {
        let mut guard = self.token.write().await;
        if let Some(current) = guard.as_ref() {
            if stale != Some(current.as_str()) {
                return Ok(current.clone());
            }
        }
        let token = self
            .executor
            .fetch_token(&self.basic_auth, &self.token_url)
            .await?;
        tracing::debug!(token_url = %self.token_url, "acquired access token");
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Authenticated call returning `data`, refreshing the token once if it expired.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<Params>,
    ) -> Result<Value, B2BinPayError> {
        let token = self.token().await?;
        match self
            .executor
            .send_with_token(&token, method, url, params.clone())
            .await
        {
            Err(B2BinPayError::UpdateTokenRequired) => {
                tracing::info!(%url, "access token expired, refreshing and retrying once");
                let token = self.refresh_replacing(Some(token.as_str())).await?;
                self.executor
                    .send_with_token(&token, method, url, params)
                    .await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    const EXPIRED: &str = r#"{"error":"RESULT_TOKEN_ERROR_EXPIRED","code":"-240"}"#;

    fn session(transport: Arc<ScriptedTransport>) -> TokenSession<Arc<ScriptedTransport>> {
        TokenSession::new(
            RequestExecutor::new(transport),
            Credential::Basic("YmFzaWM=".to_string()),
            "https://x/api/login",
        )
        .unwrap()
    }

    #[test]
    fn test_bearer_credential_rejected() {
        let result = TokenSession::new(
            RequestExecutor::new(ScriptedTransport::new()),
            Credential::Bearer("t".to_string()),
            "https://x/api/login",
        );
        assert!(matches!(result, Err(B2BinPayError::Config(_))));
    }

    #[tokio::test]
    async fn test_token_is_cached() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, r#"{"access_token":"t1"}"#)
                .respond(200, r#"{"data":1}"#)
                .respond(200, r#"{"data":2}"#),
        );
        let session = session(transport.clone());

        let first = session.send(HttpMethod::Get, "https://x/a", None).await.unwrap();
        let second = session.send(HttpMethod::Get, "https://x/b", None).await.unwrap();
        assert_eq!(first, json!(1));
        assert_eq!(second, json!(2));

        let sent = transport.requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].url, "https://x/api/login");
        assert_eq!(sent[1].header("authorization"), Some("Bearer t1"));
        assert_eq!(sent[2].header("authorization"), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn test_expired_token_refreshes_and_retries_once() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, r#"{"access_token":"old"}"#)
                .respond(401, EXPIRED)
                .respond(200, r#"{"access_token":"new"}"#)
                .respond(200, r#"{"data":{"id":9}}"#),
        );
        let session = session(transport.clone());

        let data = session
            .send(
                HttpMethod::Post,
                "https://x/bills",
                Some(vec![("amount".to_string(), "1".to_string())]),
            )
            .await
            .unwrap();
        assert_eq!(data, json!({"id": 9}));

        let sent = transport.requests();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[1].header("authorization"), Some("Bearer old"));
        assert_eq!(sent[3].header("authorization"), Some("Bearer new"));
        assert_eq!(sent[3].body.as_deref(), Some("amount=1"));
        assert_eq!(session.token().await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_second_expiry_propagates() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, r#"{"access_token":"a"}"#)
                .respond(200, EXPIRED)
                .respond(200, r#"{"access_token":"b"}"#)
                .respond(200, EXPIRED),
        );
        let session = session(transport.clone());

        let err = session
            .send(HttpMethod::Get, "https://x/y", None)
            .await
            .unwrap_err();
        assert!(err.is_token_expired());
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_other_errors_do_not_retry() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, r#"{"access_token":"a"}"#)
                .respond(422, r#"{"error":"RESULT_VALIDATION_ERROR","code":"-10"}"#),
        );
        let session = session(transport.clone());

        let err = session
            .send(HttpMethod::Get, "https://x/y", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_keeps_token_replaced_by_another_caller() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(200, r#"{"access_token":"new"}"#));
        let session = session(transport.clone());

        assert_eq!(session.token().await.unwrap(), "new");

        // A caller still holding "old" must not trigger a second login.
        let token = session.refresh_replacing(Some("old")).await.unwrap();
        assert_eq!(token, "new");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, r#"{"access_token":"a"}"#)
                .respond(200, r#"{"access_token":"b"}"#),
        );
        let session = session(transport);

        assert_eq!(session.token().await.unwrap(), "a");
        session.invalidate().await;
        assert_eq!(session.token().await.unwrap(), "b");
    }
}
