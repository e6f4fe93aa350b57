#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::event::*;
    use crate::trace::*;
    use crate::config::*;
    use crate::error::*;
    use serde_json::json;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_customer() {
        let msg = Message::customer("hello");
        assert_eq!(msg.kind, MessageType::Customer);
        assert_eq!(msg.body, "hello");
        assert!(msg.sent_at.is_some());
        assert!(msg.created_at.is_none());
        assert!(msg.user.is_none());
        assert!(msg.is_customer());
    }

    #[test]
    fn test_message_bot() {
        let msg = Message::bot("hi there", Some("https://cdn.test/bot.png".to_string()));
        assert_eq!(msg.kind, MessageType::Bot);
        assert!(msg.created_at.is_some());
        assert!(msg.sent_at.is_none());
        assert!(!msg.is_customer());

        let user = msg.user.unwrap();
        assert_eq!(user.id, 0);
        assert!(user.email.is_empty());
        assert_eq!(user.profile_photo_url.as_deref(), Some("https://cdn.test/bot.png"));
    }

    #[test]
    fn test_customer_without_sent_at_is_not_mine() {
        let mut msg = Message::customer("hello");
        msg.sent_at = None;
        assert!(!msg.is_customer());
    }

    #[test]
    fn test_message_timestamp_prefers_sent_at() {
        let customer = Message::customer("a");
        assert_eq!(customer.timestamp(), customer.sent_at.as_deref());

        let bot = Message::bot("b", None);
        assert_eq!(bot.timestamp(), bot.created_at.as_deref());
    }

    #[test]
    fn test_current_time_is_rfc3339() {
        let now = current_time();
        assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[test]
    fn test_message_wire_shape() {
        let msg = Message::customer("hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "customer");
        assert_eq!(value["body"], "hello");
        assert!(value.get("created_at").is_none());
        assert!(value.get("user").is_none());
    }

    // ─── Trace Tests ─────────────────────────────────────────

    #[test]
    fn test_trace_speak() {
        let trace: Trace = serde_json::from_value(json!({
            "type": "speak",
            "payload": { "message": "hi there", "type": "message" }
        }))
        .unwrap();
        assert_eq!(trace, Trace::speak("hi there"));
        assert_eq!(trace.speak_message(), Some("hi there"));
    }

    #[test]
    fn test_trace_end() {
        let trace: Trace = serde_json::from_value(json!({ "type": "end" })).unwrap();
        assert!(trace.is_end());
        assert!(trace.speak_message().is_none());
    }

    #[test]
    fn test_trace_other_kinds() {
        let trace: Trace = serde_json::from_value(json!({
            "type": "visual",
            "payload": { "image": "x.png" }
        }))
        .unwrap();
        assert_eq!(trace, Trace::Other { kind: "visual".to_string() });
    }

    #[test]
    fn test_trace_speak_without_message() {
        let trace: Trace = serde_json::from_value(json!({ "type": "speak" })).unwrap();
        assert_eq!(trace.speak_message(), Some(""));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config_is_empty() {
        assert!(WidgetConfig::default().is_empty());
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = WidgetConfig::default().resolve();
        assert_eq!(resolved.title, "Welcome!");
        assert_eq!(resolved.subtitle, "How can we help you?");
        assert_eq!(resolved.new_message_placeholder, "Start typing...");
        assert_eq!(resolved.primary_color, "1890ff");
        assert_eq!(resolved.runtime_endpoint, "");
        assert_eq!(resolved.version, "1.0.0");
        assert!(resolved.is_closeable);
        assert!(!resolved.is_mobile);
        assert!(!resolved.require_email_upfront);
    }

    #[test]
    fn test_from_value_reads_all_keys() {
        let config = WidgetConfig::from_value(&json!({
            "versionID": "v123",
            "title": "Support",
            "avatar": "https://cdn.test/a.png",
            "mobile": "1",
            "metadata": "{\"plan\":\"pro\"}",
        }));
        assert_eq!(config.version_id.as_deref(), Some("v123"));
        assert_eq!(config.title.as_deref(), Some("Support"));
        assert_eq!(config.avatar.as_deref(), Some("https://cdn.test/a.png"));
        assert!(config.resolve().is_mobile);
        assert!(config.metadata.is_some());
    }

    #[test]
    fn test_sanitize_drops_non_updatable_keys() {
        let config = WidgetConfig::sanitize(&json!({
            "title": "New title",
            "avatar": "https://cdn.test/a.png",
            "mobile": "1",
            "metadata": "{}",
            "somethingElse": 42,
        }));
        assert_eq!(config.title.as_deref(), Some("New title"));
        assert!(config.avatar.is_none());
        assert!(config.mobile.is_none());
        assert!(config.metadata.is_none());
    }

    #[test]
    fn test_sanitize_non_object_is_empty() {
        assert!(WidgetConfig::sanitize(&json!("nope")).is_empty());
        assert!(WidgetConfig::sanitize(&json!(null)).is_empty());
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut config = WidgetConfig::from_value(&json!({
            "versionID": "v1",
            "title": "Old",
            "subtitle": "Keep me",
        }));
        config.merge(WidgetConfig::sanitize(&json!({ "title": "New", "primaryColor": "ff0000" })));

        assert_eq!(config.version_id.as_deref(), Some("v1"));
        assert_eq!(config.title.as_deref(), Some("New"));
        assert_eq!(config.subtitle.as_deref(), Some("Keep me"));
        assert_eq!(config.primary_color.as_deref(), Some("ff0000"));
    }

    #[test]
    fn test_merge_empty_update_is_noop() {
        let mut config = WidgetConfig::from_value(&json!({ "title": "Same" }));
        let before = config.clone();
        config.merge(WidgetConfig::default());
        assert_eq!(config, before);
    }

    #[test]
    fn test_numeric_values_become_text() {
        let config = WidgetConfig::from_value(&json!({ "version": 2 }));
        assert_eq!(config.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_flag_truthiness() {
        assert!(Flag::Text("1".to_string()).is_set());
        assert!(Flag::Text(" 2 ".to_string()).is_set());
        assert!(!Flag::Text("0".to_string()).is_set());
        assert!(!Flag::Text(String::new()).is_set());
        assert!(!Flag::Text("yes".to_string()).is_set());
        assert!(Flag::Number(1.0).is_set());
        assert!(!Flag::Number(0.0).is_set());
        assert!(Flag::Bool(true).is_set());
        assert!(!Flag::Bool(false).is_set());
    }

    #[test]
    fn test_closeable_off() {
        let config = WidgetConfig::from_value(&json!({ "closeable": "0" }));
        assert!(!config.resolve().is_closeable);

        let config = WidgetConfig::from_value(&json!({ "closeable": false }));
        assert!(!config.resolve().is_closeable);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!("false"))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let config = WidgetConfig::from_value(&json!({ "versionID": "v1", "primaryColor": "abc" }));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["versionID"], "v1");
        assert_eq!(value["primaryColor"], "abc");
        assert!(value.get("title").is_none());
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_decode_toggle() {
        let event = InboundEvent::decode(&json!({
            "event": "papercups:toggle",
            "payload": { "isOpen": true }
        }));
        assert_eq!(event, InboundEvent::Toggle { is_open: true });
    }

    #[test]
    fn test_decode_toggle_missing_payload() {
        let event = InboundEvent::decode(&json!({ "event": "papercups:toggle" }));
        assert_eq!(event, InboundEvent::Toggle { is_open: false });

        let event = InboundEvent::decode(&json!({ "event": "papercups:toggle", "payload": null }));
        assert_eq!(event, InboundEvent::Toggle { is_open: false });
    }

    #[test]
    fn test_decode_config_update() {
        let event = InboundEvent::decode(&json!({
            "event": "config:update",
            "payload": { "title": "Hi", "mobile": "1" }
        }));
        match event {
            InboundEvent::ConfigUpdate(config) => {
                assert_eq!(config.title.as_deref(), Some("Hi"));
                assert!(config.mobile.is_none());
            }
            other => panic!("Wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_event() {
        let event = InboundEvent::decode(&json!({ "event": "something:else", "payload": {} }));
        assert_eq!(
            event,
            InboundEvent::Ignored { event: Some("something:else".to_string()) }
        );
        assert!(event.is_ignored());
    }

    #[test]
    fn test_decode_missing_event_key() {
        let event = InboundEvent::decode(&json!({ "payload": { "isOpen": true } }));
        assert_eq!(event, InboundEvent::Ignored { event: None });
    }

    #[test]
    fn test_decode_non_object_data() {
        assert!(InboundEvent::decode(&json!("papercups:toggle")).is_ignored());
        assert!(InboundEvent::decode(&json!(null)).is_ignored());
        assert!(InboundEvent::decode(&json!([1, 2])).is_ignored());
    }

    #[test]
    fn test_outbound_close() {
        let value = OutboundEvent::Close.to_value();
        assert_eq!(value, json!({ "event": "papercups:close", "payload": {} }));
        assert_eq!(OutboundEvent::Close.name(), CLOSE_EVENT);
    }

    #[test]
    fn test_widget_event_serialization() {
        let event = WidgetEvent::MessageAppended(Message::customer("hello"));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("MessageAppended"));
        assert!(json.contains("hello"));
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = WidgetError::Network("offline".to_string());
        assert_eq!(err.to_string(), "Network error: offline");

        let err = WidgetError::Timeout(15000);
        assert_eq!(err.to_string(), "Timeout after 15000ms");

        let err = WidgetError::Runtime("HTTP 500: boom".to_string());
        assert_eq!(err.to_string(), "Runtime error: HTTP 500: boom");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: WidgetError = serde_err.into();
        assert!(matches!(err, WidgetError::Serialization(_)));
    }
}
