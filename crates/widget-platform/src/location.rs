//! Reads what the host put in the iframe URL.

use serde_json::{Map, Value};
use web_sys::UrlSearchParams;

use widget_types::{
    config::{WidgetConfig, CONFIG_KEYS},
    Result, WidgetError,
};

use crate::js_error;

const DEV_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

/// Initial widget config from `?versionID=...&title=...`.
pub fn initial_config() -> Result<WidgetConfig> {
    let search = window_location()?
        .search()
        .map_err(|e| js_error("location.search", e))?;
    config_from_query(&search)
}

pub fn config_from_query(search: &str) -> Result<WidgetConfig> {
    let params = UrlSearchParams::new_with_str(search)
        .map_err(|e| js_error("URLSearchParams", e))?;

    let mut map = Map::new();
    for key in CONFIG_KEYS {
        if let Some(value) = params.get(key) {
            map.insert(key.to_string(), Value::String(value));
        }
    }
    Ok(WidgetConfig::from_value(&Value::Object(map)))
}

/// Debug logging is on when the widget is served from a local dev server.
pub fn is_dev() -> bool {
    window_location()
        .and_then(|l| l.hostname().map_err(|e| js_error("location.hostname", e)))
        .map(|host| is_dev_hostname(&host))
        .unwrap_or(false)
}

pub fn is_dev_hostname(host: &str) -> bool {
    DEV_HOSTS.contains(&host)
}

fn window_location() -> Result<web_sys::Location> {
    web_sys::window()
        .map(|w| w.location())
        .ok_or_else(|| WidgetError::JsInterop("No window object".to_string()))
}
