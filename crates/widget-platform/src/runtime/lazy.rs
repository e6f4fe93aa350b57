//! Runtime client built on first use from the widget's current config.
//!
//! The host may deliver `versionID` through a `config:update` after mount.
//! The client is created once, from whatever config is current when the
//! conversation first calls the runtime, and kept for the rest of the mount.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use widget_core::ports::{RuntimePort, TurnResponse};
use widget_types::{config::ResolvedConfig, Result};

use super::voiceflow::VoiceflowClient;

pub struct LazyVoiceflow {
    config: Rc<RefCell<ResolvedConfig>>,
    client: RefCell<Option<Rc<VoiceflowClient>>>,
}

impl LazyVoiceflow {
    pub fn new(config: Rc<RefCell<ResolvedConfig>>) -> Self {
        Self {
            config,
            client: RefCell::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.borrow().is_some()
    }

    fn client(&self) -> Result<Rc<VoiceflowClient>> {
        if let Some(client) = self.client.borrow().as_ref() {
            return Ok(client.clone());
        }
        let client = Rc::new(VoiceflowClient::from_config(&self.config.borrow())?);
        log::info!("Runtime client for {}", client.interact_url());
        *self.client.borrow_mut() = Some(client.clone());
        Ok(client)
    }
}

#[async_trait(?Send)]
impl RuntimePort for LazyVoiceflow {
    async fn start(&self) -> Result<TurnResponse> {
        let client = self.client()?;
        client.start().await
    }

    async fn send_text(&self, text: &str) -> Result<TurnResponse> {
        let client = self.client()?;
        client.send_text(text).await
    }
}
