//! Test doubles for router integration tests.
//!
//! Both doubles append to one shared [`EventLog`] so tests can assert on the interleaving of
//! replies and generator calls without hitting Telegram or OpenAI.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use llm_client::Generator;
use persona_core::{BotError, Reply, Result, TextFormat, Transport};
use persona_router::{
    ConversationRouter, ConversationStateStore, FileFormat, TopicRegistry, TopicSettings,
};

pub const CONFIG: &str = r#"
[labels]
translator = "Translator"
poet = "Poet"
coder = "Coder"

[callbacks]
translator = "cb_translate"
poet = "cb_poem"
coder = "cb_code"

[prompts]
translator = "Translate to French"
poet = "Answer in verse"
coder = "You are a senior engineer"

[answers]
translator = "Send me text to translate"
poet = "Give me a theme"
coder = "Paste your code"

[texts]
welcome = "Hi! Pick a topic"
use_buttons = "Please use the buttons"
error = "Sorry, something went wrong"

[wait]
w1 = "One moment..."

[keyboard]
row_size = 2
"#;

/// One observable step, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Sent(Reply),
    Generated { system_prompt: String, user_text: String },
}

pub type EventLog = Arc<Mutex<Vec<Step>>>;

/// Transport that records every reply. With `reject_html`, HTML replies fail like a Telegram
/// "can't parse entities" error.
pub struct RecordingTransport {
    log: EventLog,
    reject_html: bool,
}

impl RecordingTransport {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            reject_html: false,
        }
    }

    pub fn rejecting_html(log: EventLog) -> Self {
        Self {
            log,
            reject_html: true,
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_reply(&self, reply: &Reply) -> Result<()> {
        if self.reject_html && reply.format == TextFormat::Html {
            return Err(BotError::Transport("Bad Request: can't parse entities".into()));
        }
        self.log.lock().unwrap().push(Step::Sent(reply.clone()));
        Ok(())
    }
}

/// What the scripted generator does when called.
#[derive(Debug, Clone)]
pub enum Script {
    Answer(String),
    Fail(String),
    /// Sleeps for the duration, then answers.
    Slow(Duration, String),
}

pub struct ScriptedGenerator {
    log: EventLog,
    script: Script,
}

impl ScriptedGenerator {
    pub fn new(log: EventLog, script: Script) -> Self {
        Self { log, script }
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, system_prompt: &str, user_text: &str) -> anyhow::Result<String> {
        self.log.lock().unwrap().push(Step::Generated {
            system_prompt: system_prompt.to_string(),
            user_text: user_text.to_string(),
        });
        match &self.script {
            Script::Answer(text) => Ok(text.clone()),
            Script::Fail(reason) => Err(anyhow::anyhow!("{}", reason)),
            Script::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }
}

pub struct Harness {
    pub router: Arc<ConversationRouter>,
    pub state: Arc<ConversationStateStore>,
    pub log: EventLog,
}

impl Harness {
    pub fn new(script: Script) -> Self {
        let log = EventLog::default();
        let transport = RecordingTransport::new(log.clone());
        Self::build(script, log, transport, None)
    }

    pub fn with_transport(script: Script, log: EventLog, transport: RecordingTransport) -> Self {
        Self::build(script, log, transport, None)
    }

    pub fn with_timeout(script: Script, timeout: Duration) -> Self {
        let log = EventLog::default();
        let transport = RecordingTransport::new(log.clone());
        Self::build(script, log, transport, Some(timeout))
    }

    fn build(
        script: Script,
        log: EventLog,
        transport: RecordingTransport,
        timeout: Option<Duration>,
    ) -> Self {
        let settings = TopicSettings::parse(CONFIG, FileFormat::Toml).unwrap();
        let registry: Arc<TopicRegistry> = Arc::new(settings.build_registry().unwrap());
        let state = Arc::new(ConversationStateStore::new());
        let router = ConversationRouter::new(
            registry,
            state.clone(),
            Arc::new(ScriptedGenerator::new(log.clone(), script)),
            Arc::new(transport),
            settings.texts.clone(),
        )
        .with_row_size(settings.row_size)
        .with_generator_timeout(timeout);
        Self {
            router: Arc::new(router),
            state,
            log,
        }
    }

    pub fn steps(&self) -> Vec<Step> {
        self.log.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.steps()
            .into_iter()
            .filter_map(|step| match step {
                Step::Sent(reply) => Some(reply),
                Step::Generated { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}
