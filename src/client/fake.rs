//! In-memory transport for tests: serves one canned body and records every
//! request it receives.

use std::sync::Mutex;

use serde_json::Value;

use crate::client::{ApiError, Transport};

#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    body: Mutex<Option<String>>,
    fail_puts: bool,
    gets: Mutex<Vec<String>>,
    puts: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn serving(document: Value) -> Self {
        let transport = Self::default();
        transport.set_body(document);
        transport
    }

    /// A transport whose PUTs are all rejected with status 500.
    pub fn rejecting_puts() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn set_body(&self, document: Value) {
        *self.body.lock().unwrap() = Some(document.to_string());
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<(String, Value)> {
        self.puts.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<String, ApiError> {
        self.gets.lock().unwrap().push(url.to_string());
        self.body.lock().unwrap().clone().ok_or_else(|| ApiError::Status {
            url: url.to_string(),
            status: 503,
        })
    }

    async fn put_json(&self, url: &str, body: &Value) -> Result<(), ApiError> {
        self.puts.lock().unwrap().push((url.to_string(), body.clone()));
        if self.fail_puts {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        Ok(())
    }
}
