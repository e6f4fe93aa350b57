//! Main egui application. Owns the mounted widget and renders its chat window.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel};

use widget_core::bridge::Subscriptions;
use widget_core::conversation::{SendOutcome, StartOutcome};
use widget_core::event_bus::EventBus;
use widget_core::ports::{HostPort, RuntimePort};
use widget_core::widget::Widget;
use widget_platform::bridge::WindowTarget;
use widget_platform::host::ParentFrameHost;
use widget_platform::location;
use widget_platform::runtime::LazyVoiceflow;
use widget_types::config::{ResolvedConfig, WidgetConfig};
use widget_ui::panels::chat::{self, ChatAction};
use widget_ui::state::UiState;
use widget_ui::theme::{self, WidgetTheme};

/// The main application state
pub struct WidgetApp {
    ui_state: UiState,
    event_bus: EventBus,
    widget: Widget,
    /// Config the runtime client is built from on first use
    runtime_config: Rc<RefCell<ResolvedConfig>>,
    theme: Option<WidgetTheme>,
    started: bool,
    subscriptions: Subscriptions,
    _target: Option<Rc<WindowTarget>>,
}

impl WidgetApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = location::initial_config().unwrap_or_else(|e| {
            log::warn!("Could not read config from the URL: {}", e);
            WidgetConfig::default()
        });
        log::debug!("Initial config: {:?}", config);

        let event_bus = EventBus::new();
        // Core events arrive from host messages and spawned tasks, outside the frame loop
        let ctx = cc.egui_ctx.clone();
        event_bus.on_emit(move || ctx.request_repaint());
        let runtime_config = Rc::new(RefCell::new(config.resolve()));
        let runtime: Rc<dyn RuntimePort> = Rc::new(LazyVoiceflow::new(runtime_config.clone()));
        let host: Rc<dyn HostPort> = Rc::new(ParentFrameHost::new());
        let widget = Widget::mount(config.clone(), runtime, host, event_bus.clone());

        let mut subscriptions = Subscriptions::new();
        let target = match WindowTarget::window() {
            Ok(target) => Some(Rc::new(target)),
            Err(e) => {
                log::error!("Host messages unavailable: {}", e);
                None
            }
        };
        if let Some(target) = &target {
            match widget.subscribe(target) {
                Ok(sub) => subscriptions.push(sub),
                Err(e) => log::error!("Failed to listen for host messages: {}", e),
            }
        }

        Self {
            ui_state: UiState::new(config),
            event_bus,
            widget,
            runtime_config,
            theme: None,
            started: false,
            subscriptions,
            _target: target,
        }
    }

    /// Open the runtime session once the host has supplied a config.
    fn start_conversation(&mut self) {
        self.started = true;
        let conversation = self.widget.conversation().clone();

        wasm_bindgen_futures::spawn_local(async move {
            match conversation.initialize_state().await {
                Ok(StartOutcome::Started) => {}
                Ok(StartOutcome::Busy) => log::debug!("Start skipped: a runtime call is in flight"),
                Err(e) => log::error!("Failed to start conversation: {}", e),
            }
        });
    }

    /// Send user text to the runtime (async)
    fn dispatch_message(&self, text: String) {
        let conversation = self.widget.conversation().clone();

        wasm_bindgen_futures::spawn_local(async move {
            match conversation.send_text(&text).await {
                Ok(SendOutcome::Delivered { restarted: true }) => {
                    log::info!("Conversation restarted");
                }
                Ok(outcome) => log::debug!("Send finished: {:?}", outcome),
                Err(e) => log::error!("Send failed: {}", e),
            }
        });
    }

    fn sync_theme(&mut self, ctx: &egui::Context, config: &ResolvedConfig) {
        let theme = WidgetTheme::new(&config.primary_color, config.is_mobile);
        if self.theme != Some(theme) {
            theme::apply_theme(ctx, &theme);
            self.theme = Some(theme);
        }
    }
}

impl eframe::App for WidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain events from the widget core
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
        }

        if !self.ui_state.should_render() {
            return;
        }

        let config = self.ui_state.resolved_config();
        if *self.runtime_config.borrow() != config {
            *self.runtime_config.borrow_mut() = config.clone();
        }
        self.sync_theme(ctx, &config);

        if !self.started {
            self.start_conversation();
        }

        let mut action = ChatAction::None;
        CentralPanel::default()
            .frame(egui::Frame::default().fill(theme::BACKGROUND))
            .show(ctx, |ui| {
                action = chat::chat_window(ui, &mut self.ui_state, &config);
            });

        match action {
            ChatAction::None => {}
            ChatAction::Send(text) => self.dispatch_message(text),
            ChatAction::Close => {
                if let Err(e) = self.widget.close() {
                    log::warn!("Failed to notify host of close: {}", e);
                }
            }
        }
    }
}

impl Drop for WidgetApp {
    fn drop(&mut self) {
        log::debug!("Unmounting widget, removing {} listeners", self.subscriptions.len());
        self.subscriptions.clear();
    }
}
