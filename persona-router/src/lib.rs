//! # persona-router
//!
//! The conversation routing core. A button press selects a topic for the conversation
//! ([`ConversationStateStore`]); free text is answered by the [`llm_client::Generator`] under the
//! selected topic's system prompt, sanitized ([`ResponseSanitizer`]) and relayed with the menu
//! keyboard ([`build_keyboard`]). Topics come from the ConfigStore file ([`TopicSettings`]) and are
//! validated once into a [`TopicRegistry`].

pub mod keyboard;
pub mod registry;
pub mod router;
pub mod sanitize;
pub mod settings;
pub mod state;

pub use keyboard::build_keyboard;
pub use registry::{Topic, TopicKey, TopicRegistry};
pub use router::{ConversationRouter, RouteOutcome, COMMAND_PREFIX};
pub use sanitize::{ResponseSanitizer, DEFAULT_DENYLIST};
pub use settings::{CannedTexts, TopicSections, TopicSettings};
pub use state::ConversationStateStore;

/// Re-exported so callers can name a ConfigStore format without depending on `config` directly.
pub use config::FileFormat;
