//! Test doubles shared by the unit tests.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::notice::{Locale, Notice};
use crate::platform::Platform;
use crate::transport::ConfigureTransport;
use crate::types::{ConfigureRequest, ConfigureResponse};

/// Answers every request with the same canned body, or the same error.
pub(crate) struct ScriptedTransport {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<ConfigureRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn json(body: &str) -> Self { Self { reply: Ok(body.to_string()), requests: Mutex::default() } }
    pub(crate) fn failing(message: &str) -> Self { Self { reply: Err(message.to_string()), requests: Mutex::default() } }
    pub(crate) fn requests(&self) -> Vec<ConfigureRequest> { self.requests.lock().unwrap().clone() }
}

#[async_trait]
impl ConfigureTransport for ScriptedTransport {
    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(body) => Ok(serde_json::from_str(body)?),
            Err(message) => Err(anyhow!("{}", message)),
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingPlatform {
    notices: Mutex<Vec<Notice>>,
    copied: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
}

impl RecordingPlatform {
    pub(crate) fn notices(&self) -> Vec<Notice> { self.notices.lock().unwrap().clone() }
    pub(crate) fn copied(&self) -> Vec<String> { self.copied.lock().unwrap().clone() }
    pub(crate) fn opened(&self) -> Vec<String> { self.opened.lock().unwrap().clone() }
}

impl Platform for RecordingPlatform {
    fn notify(&self, notice: &Notice, _locale: Locale) { self.notices.lock().unwrap().push(notice.clone()); }
    fn copy_selection(&self, text: &str) { self.copied.lock().unwrap().push(text.to_string()); }
    fn open_url(&self, url: &str) { self.opened.lock().unwrap().push(url.to_string()); }
}
