pub mod config;
pub mod constants;
pub mod conversation;
pub mod error;
pub mod export;
pub mod extract;
pub mod llm;
pub mod manager;
pub mod session;
pub mod store;
pub mod styles;

// Re-export key types
pub use config::{ApiConfig, Settings};
pub use conversation::{Author, Conversation, HistoryItem, Message};
pub use error::ForgeError;
pub use export::ExportedArtifact;
pub use extract::extract_svg;
pub use llm::{LlmClient, OpenAIClient};
pub use manager::{Confirm, ConversationManager, Selection, SendOutcome};
pub use session::ChatSession;
pub use store::{ConversationStore, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use styles::{IconStyle, ICON_STYLES};
