#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use svgforge_core::error::ForgeError;
use svgforge_core::llm::{self, LlmClient};
use svgforge_core::{ChatSession, ConversationManager, ConversationStore, MemoryKeyValueStore};

pub const GEAR_SVG: &str = r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="3"/><path d="M12 1v4M12 19v4"/></svg>"#;

/// One scripted response.
pub enum Step {
    Reply(String),
    Fail(Option<u16>, String),
}

#[derive(Default)]
pub struct Script {
    steps: VecDeque<Step>,
    pub calls: Vec<Vec<llm::Message>>,
    pub loading_seen: Vec<bool>,
    pub loading_flag: Option<Arc<AtomicBool>>,
}

/// Mock LLM: answers from a queue and records every context it was sent.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    pub script: Arc<Mutex<Script>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, text: impl Into<String>) -> &Self {
        self.script.lock().unwrap().steps.push_back(Step::Reply(text.into()));
        self
    }

    pub fn fail(&self, status: Option<u16>, body: impl Into<String>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .steps
            .push_back(Step::Fail(status, body.into()));
        self
    }

    pub fn calls(&self) -> Vec<Vec<llm::Message>> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn watch_loading(&self, flag: Arc<AtomicBool>) {
        self.script.lock().unwrap().loading_flag = Some(flag);
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.script.lock().unwrap().loading_seen.clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    async fn chat(&self, _system: &str, messages: &[llm::Message]) -> Result<String, ForgeError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(messages.to_vec());
        if let Some(flag) = script.loading_flag.clone() {
            script.loading_seen.push(flag.load(Ordering::Acquire));
        }
        match script.steps.pop_front() {
            Some(Step::Reply(text)) => Ok(text),
            Some(Step::Fail(status, body)) => Err(ForgeError::request(status, body)),
            None => Ok("Noted.".to_string()),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

pub type TestManager = ConversationManager<MemoryKeyValueStore>;

pub fn manager_with(client: &ScriptedClient, backend: MemoryKeyValueStore) -> TestManager {
    let session = ChatSession::new(Box::new(client.clone()));
    ConversationManager::open(ConversationStore::new(backend), session)
}

pub fn fresh_manager(client: &ScriptedClient) -> TestManager {
    manager_with(client, MemoryKeyValueStore::new())
}

/// Conversation list as currently persisted by `manager`.
pub fn persisted(manager: &TestManager) -> Option<Vec<svgforge_core::Conversation>> {
    manager.store().load()
}
