#[cfg(test)]
mod tests {
    use crate::panels::chat::{format_timestamp, sender_label};
    use crate::state::*;
    use crate::theme::*;
    use egui::Color32;
    use serde_json::json;
    use widget_types::config::WidgetConfig;
    use widget_types::event::WidgetEvent;
    use widget_types::message::Message;

    fn configured() -> UiState {
        UiState::new(WidgetConfig::from_value(&json!({ "title": "Support" })))
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::default();
        assert!(state.messages.is_empty());
        assert!(!state.is_open);
        assert!(!state.is_sending);
        assert!(state.input_text.is_empty());
        assert!(state.error_notice.is_none());
        assert!(!state.should_render());
    }

    #[test]
    fn test_ui_state_renders_once_configured() {
        let state = configured();
        assert!(state.should_render());
        assert_eq!(state.resolved_config().title, "Support");
        assert_eq!(state.resolved_config().subtitle, "How can we help you?");
    }

    #[test]
    fn test_ui_state_message_appended() {
        let mut state = configured();
        state.process_events(vec![
            WidgetEvent::MessageAppended(Message::customer("hello")),
            WidgetEvent::MessageAppended(Message::bot("hi there", None)),
        ]);

        assert_eq!(state.messages.len(), 2);
        assert!(state.messages[0].is_customer());
        assert_eq!(state.messages[1].body, "hi there");
        assert!(!state.shows_timestamp(0));
        assert!(state.shows_timestamp(1));
    }

    #[test]
    fn test_ui_state_visibility_requests_focus() {
        let mut state = configured();
        state.process_events(vec![WidgetEvent::VisibilityChanged { is_open: true }]);
        assert!(state.is_open);
        assert!(state.focus_input);

        state.focus_input = false;
        state.process_events(vec![WidgetEvent::VisibilityChanged { is_open: false }]);
        assert!(!state.is_open);
        assert!(!state.focus_input);
    }

    #[test]
    fn test_ui_state_config_changed() {
        let mut state = UiState::default();
        let config = WidgetConfig::from_value(&json!({ "primaryColor": "ff0000" }));
        state.process_events(vec![WidgetEvent::ConfigChanged(config)]);

        assert!(state.should_render());
        assert_eq!(state.resolved_config().primary_color, "ff0000");
    }

    #[test]
    fn test_ui_state_error_notice_cleared_on_next_send() {
        let mut state = configured();
        state.process_events(vec![
            WidgetEvent::SendingChanged { is_sending: true },
            WidgetEvent::Error { message: "Timeout after 15000ms".to_string() },
            WidgetEvent::SendingChanged { is_sending: false },
        ]);
        assert_eq!(state.error_notice.as_deref(), Some("Timeout after 15000ms"));
        assert!(!state.is_sending);

        state.process_events(vec![WidgetEvent::SendingChanged { is_sending: true }]);
        assert!(state.error_notice.is_none());
        assert!(state.is_sending);
    }

    #[test]
    fn test_ui_state_session_restart_keeps_transcript() {
        let mut state = configured();
        state.process_events(vec![
            WidgetEvent::MessageAppended(Message::bot("bye", None)),
            WidgetEvent::SessionRestarted,
            WidgetEvent::MessageAppended(Message::bot("Welcome back", None)),
        ]);
        assert_eq!(state.messages.len(), 2);
    }

    #[test]
    fn test_ui_state_take_submission() {
        let mut state = configured();
        state.input_text = "  hello ".to_string();

        assert_eq!(state.take_submission().as_deref(), Some("  hello "));
        assert!(state.input_text.is_empty());
    }

    #[test]
    fn test_ui_state_take_submission_rejects_blank() {
        let mut state = configured();
        state.input_text = "   ".to_string();
        assert!(!state.can_send());
        assert!(state.take_submission().is_none());
        assert_eq!(state.input_text, "   ");
    }

    #[test]
    fn test_ui_state_take_submission_while_sending() {
        let mut state = configured();
        state.input_text = "second".to_string();
        state.is_sending = true;

        assert!(state.take_submission().is_none());
        assert_eq!(state.input_text, "second");
    }

    #[test]
    fn test_ui_state_blocks_submission_during_session_start() {
        let mut state = configured();
        state.input_text = "hi".to_string();
        state.process_events(vec![WidgetEvent::SendingChanged { is_sending: true }]);
        assert!(state.take_submission().is_none());

        state.process_events(vec![
            WidgetEvent::MessageAppended(Message::bot("greeting", None)),
            WidgetEvent::SendingChanged { is_sending: false },
        ]);
        assert_eq!(state.take_submission().as_deref(), Some("hi"));
    }

    // ─── Theme Tests ─────────────────────────────────────────

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("1890ff"), Some(Color32::from_rgb(0x18, 0x90, 0xff)));
        assert_eq!(parse_hex_color("#FF0000"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#0f0"), Some(Color32::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("").is_none());
        assert!(parse_hex_color("blue").is_none());
        assert!(parse_hex_color("12345").is_none());
        assert!(parse_hex_color("zzzzzz").is_none());
    }

    #[test]
    fn test_theme_falls_back_to_default() {
        let theme = WidgetTheme::new("not-a-colour", false);
        assert_eq!(theme.primary, DEFAULT_PRIMARY);
        assert_eq!(theme.padding(), PANEL_PADDING);
    }

    #[test]
    fn test_theme_mobile_spacing() {
        let theme = WidgetTheme::new("1890ff", true);
        assert_eq!(theme.padding(), MOBILE_PANEL_PADDING);
        assert!(theme.body_size() > WidgetTheme::new("1890ff", false).body_size());
    }

    #[test]
    fn test_apply_theme_sets_light_visuals() {
        let ctx = egui::Context::default();
        let theme = WidgetTheme::new("ff0000", false);
        apply_theme(&ctx, &theme);

        let style = ctx.style();
        assert!(!style.visuals.dark_mode);
        assert_eq!(style.visuals.panel_fill, BACKGROUND);
        assert_eq!(style.visuals.widgets.active.bg_fill, Color32::from_rgb(255, 0, 0));
    }

    // ─── Chat Panel Tests ────────────────────────────────────

    #[test]
    fn test_sender_label() {
        let config = WidgetConfig::from_value(&json!({ "companyName": "Acme" })).resolve();
        assert_eq!(sender_label(&config), "Acme");

        let config = WidgetConfig::default().resolve();
        assert_eq!(sender_label(&config), "Bot");
    }

    #[test]
    fn test_format_timestamp() {
        let formatted = format_timestamp("2024-03-01T12:34:56+00:00").unwrap();
        assert_eq!(formatted.len(), 5);
        assert_eq!(&formatted[2..3], ":");
        assert!(format_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_chat_window_renders_without_panicking() {
        let ctx = egui::Context::default();
        let mut state = configured();
        state.process_events(vec![
            WidgetEvent::VisibilityChanged { is_open: true },
            WidgetEvent::MessageAppended(Message::customer("hello")),
            WidgetEvent::MessageAppended(Message::bot("hi there", None)),
            WidgetEvent::Error { message: "Network error: offline".to_string() },
        ]);
        let config = state.resolved_config();

        let mut action = crate::panels::chat::ChatAction::None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = crate::panels::chat::chat_window(ui, &mut state, &config);
            });
        });

        assert_eq!(action, crate::panels::chat::ChatAction::None);
        assert!(!state.focus_input);
    }
}
