//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};

type Scripted = Result<TransportResponse, String>;

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.respond_raw(status, body.as_bytes())
    }

    pub(crate) fn respond_raw(self, status: u16, body: &[u8]) -> Self {
        self.responses.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            body: body.to_vec(),
        }));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left");
        next.map_err(|message| {
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message).into()
        })
    }
}
