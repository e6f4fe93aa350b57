//! Voiceflow general-runtime adapter.
//!
//! Speaks the `/interact/{versionID}` protocol over browser `fetch()` via
//! gloo-net. The runtime is stateless between calls: the client keeps the
//! session `state` from each response and sends it back with the next request.

use std::cell::RefCell;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use widget_core::ports::{RuntimePort, TurnResponse};
use widget_types::{config::ResolvedConfig, trace::Trace, Result, WidgetError};

use crate::timeout::with_timeout;

pub const DEFAULT_ENDPOINT: &str = "https://general-runtime.voiceflow.com";
pub const DEFAULT_TIMEOUT_MS: u32 = 15_000;

pub struct VoiceflowClient {
    version_id: String,
    endpoint: String,
    timeout_ms: u32,
    state: RefCell<Option<Value>>,
}

impl VoiceflowClient {
    /// An empty endpoint selects the public Voiceflow runtime.
    pub fn new(version_id: impl Into<String>, endpoint: &str) -> Self {
        let endpoint = endpoint.trim().trim_end_matches('/');
        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };
        Self {
            version_id: version_id.into(),
            endpoint: endpoint.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            state: RefCell::new(None),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        if config.version_id.trim().is_empty() {
            return Err(WidgetError::Config("versionID is required".to_string()));
        }
        Ok(Self::new(config.version_id.trim(), &config.runtime_endpoint))
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn interact_url(&self) -> String {
        format!("{}/interact/{}", self.endpoint, self.version_id)
    }

    pub fn state_url(&self) -> String {
        format!("{}/state", self.interact_url())
    }

    async fn fetch_initial_state(&self) -> Result<Value> {
        let response = Request::get(&self.state_url())
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;
        let text = read_body(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn interact(&self, request: Option<Value>) -> Result<TurnResponse> {
        let state = self.state.borrow().clone();
        let body = interact_body(state.as_ref(), request.as_ref());

        let response = Request::post(&self.interact_url())
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| WidgetError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        let data = parse_interact_response(&read_body(response).await?)?;
        if let Some(state) = data.state {
            *self.state.borrow_mut() = Some(state);
        }
        Ok(TurnResponse::from_traces(data.trace))
    }
}

#[async_trait(?Send)]
impl RuntimePort for VoiceflowClient {
    async fn start(&self) -> Result<TurnResponse> {
        with_timeout(self.timeout_ms, async {
            let state = self.fetch_initial_state().await?;
            *self.state.borrow_mut() = Some(state);
            self.interact(None).await
        })
        .await
    }

    async fn send_text(&self, text: &str) -> Result<TurnResponse> {
        let request = json!({ "type": "text", "payload": text });
        with_timeout(self.timeout_ms, self.interact(Some(request))).await
    }
}

// ─── Wire format ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct InteractResponse {
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub trace: Vec<Trace>,
}

pub fn interact_body(state: Option<&Value>, request: Option<&Value>) -> Value {
    json!({
        "state": state,
        "request": request,
        "config": { "tts": false, "stripSSML": true },
    })
}

pub fn parse_interact_response(text: &str) -> Result<InteractResponse> {
    Ok(serde_json::from_str(text)?)
}

/// Body text of a successful response; non-2xx becomes `WidgetError::Runtime`.
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| WidgetError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(WidgetError::Runtime(format!("HTTP {}: {}", status, text)));
    }
    Ok(text)
}
