use serde::Deserialize;
use serde_json::Value;

/// A unit of response from the conversational runtime.
/// Only `Speak` traces are shown to the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTrace")]
pub enum Trace {
    Speak { message: String },
    /// The runtime finished the conversation flow
    End,
    Other { kind: String },
}

impl Trace {
    pub fn speak(message: impl Into<String>) -> Self {
        Trace::Speak { message: message.into() }
    }

    pub fn speak_message(&self) -> Option<&str> {
        match self {
            Trace::Speak { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Trace::End)
    }
}

#[derive(Deserialize)]
struct RawTrace {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl From<RawTrace> for Trace {
    fn from(raw: RawTrace) -> Self {
        match raw.kind.as_str() {
            "speak" => Trace::Speak {
                message: raw.payload["message"].as_str().unwrap_or_default().to_string(),
            },
            "end" => Trace::End,
            _ => Trace::Other { kind: raw.kind },
        }
    }
}
