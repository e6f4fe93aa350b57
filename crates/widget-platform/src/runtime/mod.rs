pub mod lazy;
pub mod voiceflow;

pub use lazy::LazyVoiceflow;
pub use voiceflow::VoiceflowClient;
