use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TITLE: &str = "Welcome!";
pub const DEFAULT_SUBTITLE: &str = "How can we help you?";
pub const DEFAULT_PLACEHOLDER: &str = "Start typing...";
pub const DEFAULT_PRIMARY_COLOR: &str = "1890ff";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Every key the host may supply at mount.
pub const CONFIG_KEYS: &[&str] = &[
    "versionID",
    "title",
    "subtitle",
    "avatar",
    "primaryColor",
    "runtimeEndpoint",
    "greeting",
    "newMessagePlaceholder",
    "companyName",
    "requireEmailUpfront",
    "closeable",
    "mobile",
    "metadata",
    "version",
];

/// Keys a `config:update` message is allowed to change.
const UPDATABLE_KEYS: &[&str] = &[
    "versionID",
    "title",
    "subtitle",
    "primaryColor",
    "runtimeEndpoint",
    "greeting",
    "companyName",
    "newMessagePlaceholder",
    "closeable",
    "version",
];

/// Widget display options as supplied by the host page.
/// Every field is optional; defaults are applied by [`WidgetConfig::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(rename = "versionID", skip_serializing_if = "Option::is_none", default)]
    pub version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub runtime_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_message_placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub require_email_upfront: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub closeable: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mobile: Option<Flag>,
    /// Stringified customer metadata JSON
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
}

impl WidgetConfig {
    /// Read every known key from a host-supplied mapping.
    /// Non-object input yields an empty config.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self::read(obj, |_| true),
            None => Self::default(),
        }
    }

    /// Reduce a `config:update` payload to the keys the host may change at runtime.
    pub fn sanitize(payload: &Value) -> Self {
        match payload.as_object() {
            Some(obj) => Self::read(obj, |key| UPDATABLE_KEYS.contains(&key)),
            None => Self::default(),
        }
    }

    fn read(obj: &Map<String, Value>, allowed: impl Fn(&str) -> bool) -> Self {
        let text = |key: &str| {
            if allowed(key) {
                obj.get(key).and_then(text_value)
            } else {
                None
            }
        };
        let flag = |key: &str| {
            if allowed(key) {
                obj.get(key).and_then(Flag::from_value)
            } else {
                None
            }
        };

        Self {
            version_id: text("versionID"),
            title: text("title"),
            subtitle: text("subtitle"),
            avatar: text("avatar"),
            primary_color: text("primaryColor"),
            runtime_endpoint: text("runtimeEndpoint"),
            greeting: text("greeting"),
            new_message_placeholder: text("newMessagePlaceholder"),
            company_name: text("companyName"),
            require_email_upfront: flag("requireEmailUpfront"),
            closeable: flag("closeable"),
            mobile: flag("mobile"),
            metadata: text("metadata"),
            version: text("version"),
        }
    }

    /// Shallow merge: fields set in `updates` replace ours, unset fields are kept.
    pub fn merge(&mut self, updates: WidgetConfig) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if updates.$field.is_some() { self.$field = updates.$field; })*
            };
        }
        take!(
            version_id,
            title,
            subtitle,
            avatar,
            primary_color,
            runtime_endpoint,
            greeting,
            new_message_placeholder,
            company_name,
            require_email_upfront,
            closeable,
            mobile,
            metadata,
            version,
        );
    }

    /// True when no option has ever been set. An empty config renders nothing.
    pub fn is_empty(&self) -> bool {
        *self == WidgetConfig::default()
    }

    pub fn resolve(&self) -> ResolvedConfig {
        let or = |v: &Option<String>, d: &str| v.clone().unwrap_or_else(|| d.to_string());
        ResolvedConfig {
            version_id: self.version_id.clone().unwrap_or_default(),
            title: or(&self.title, DEFAULT_TITLE),
            subtitle: or(&self.subtitle, DEFAULT_SUBTITLE),
            avatar: self.avatar.clone(),
            primary_color: or(&self.primary_color, DEFAULT_PRIMARY_COLOR),
            runtime_endpoint: self.runtime_endpoint.clone().unwrap_or_default(),
            greeting: self.greeting.clone(),
            new_message_placeholder: or(&self.new_message_placeholder, DEFAULT_PLACEHOLDER),
            company_name: self.company_name.clone(),
            require_email_upfront: self.require_email_upfront.as_ref().is_some_and(Flag::is_set),
            is_closeable: self.closeable.as_ref().map_or(true, Flag::is_set),
            is_mobile: self.mobile.as_ref().is_some_and(Flag::is_set),
            version: or(&self.version, DEFAULT_VERSION),
        }
    }
}

/// Config with defaults applied, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub version_id: String,
    pub title: String,
    pub subtitle: String,
    pub avatar: Option<String>,
    pub primary_color: String,
    /// Empty means "use the runtime client's default endpoint"
    pub runtime_endpoint: String,
    pub greeting: Option<String>,
    pub new_message_placeholder: String,
    pub company_name: Option<String>,
    pub require_email_upfront: bool,
    pub is_closeable: bool,
    pub is_mobile: bool,
    pub version: String,
}

/// A boolean-ish option. Hosts send `"1"`, `1`, or `true` interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Flag {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Flag::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Flag::Number),
            Value::String(s) => Some(Flag::Text(s.clone())),
            _ => None,
        }
    }

    /// On when the value reads as a non-zero number.
    pub fn is_set(&self) -> bool {
        let n = match self {
            Flag::Bool(b) => return *b,
            Flag::Number(n) => *n,
            Flag::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return false;
                }
                match s.parse::<f64>() {
                    Ok(n) => n,
                    Err(_) => return false,
                }
            }
        };
        n != 0.0 && !n.is_nan()
    }
}

/// Loose truthiness for host payload values: null, false, 0, NaN and "" are off.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
