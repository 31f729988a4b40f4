use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::notices::{CLEAR_ALL_PROMPT, GENERIC_FAILURE, RATE_LIMITED, SVG_PLACEHOLDER};
use crate::conversation::{Conversation, HistoryItem, Message};
use crate::error::{ForgeError, Result};
use crate::extract::{extract_svg, replace_svg};
use crate::session::{grounding_note, ChatSession};
use crate::store::{ConversationStore, KeyValueStore};
use crate::styles::{default_style, find_style, IconStyle};

/// Where the active-conversation pointer stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing exists yet.
    Empty,
    /// The last conversation was deleted; [`ConversationManager::run_deferred`]
    /// creates its replacement.
    PendingFresh,
    Active(String),
}

/// Blocking yes/no prompt used before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a [`ConversationManager::send_user_message`] call appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply carried SVG; `artifact` was added to the gallery.
    Generated { reply: Message, artifact: HistoryItem },
    /// Plain conversational reply.
    Replied { reply: Message },
    /// The request failed; `reply` is the notice shown in the transcript.
    Failed {
        reply: Message,
        rate_limited: bool,
        status: Option<u16>,
    },
}

impl SendOutcome {
    pub fn reply(&self) -> &Message {
        match self {
            Self::Generated { reply, .. } | Self::Replied { reply } | Self::Failed { reply, .. } => {
                reply
            }
        }
    }

    pub fn artifact(&self) -> Option<&HistoryItem> {
        match self {
            Self::Generated { artifact, .. } => Some(artifact),
            _ => None,
        }
    }
}

/// Sets the shared loading flag for its lifetime.
struct LoadingGuard(Arc<AtomicBool>);

impl LoadingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the conversation list and the active selection, and keeps the store
/// and the chat session in step with both.
pub struct ConversationManager<S: KeyValueStore> {
    conversations: Vec<Conversation>,
    selection: Selection,
    loading: Arc<AtomicBool>,
    preview_override: Option<String>,
    current_style: &'static IconStyle,
    session: ChatSession,
    store: ConversationStore<S>,
}

impl<S: KeyValueStore> ConversationManager<S> {
    /// Load persisted conversations and activate the most recently modified
    /// one. Nothing usable on disk means one fresh conversation.
    pub fn open(store: ConversationStore<S>, session: ChatSession) -> Self {
        let mut manager = Self {
            conversations: Vec::new(),
            selection: Selection::Empty,
            loading: Arc::new(AtomicBool::new(false)),
            preview_override: None,
            current_style: default_style(),
            session,
            store,
        };

        match manager.store.load() {
            Some(mut conversations) if !conversations.is_empty() => {
                conversations.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
                let most_recent = &conversations[0];
                manager.selection = Selection::Active(most_recent.id.clone());
                manager.session.restore_session(&most_recent.messages);
                tracing::info!(count = conversations.len(), "restored conversations");
                manager.conversations = conversations;
            }
            _ => {
                manager.create_conversation();
            }
        }

        manager
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.selection {
            Selection::Active(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active_id()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Shared handle on the loading flag, for observers outside the manager.
    pub fn loading_flag(&self) -> Arc<AtomicBool> {
        self.loading.clone()
    }

    pub fn current_style(&self) -> &'static IconStyle {
        self.current_style
    }

    pub fn preview_override(&self) -> Option<&str> {
        self.preview_override.as_deref()
    }

    /// The artifact on display: a gallery pick if one is set, otherwise the
    /// newest artifact of the active conversation.
    pub fn current_svg(&self) -> Option<&str> {
        self.preview_override
            .as_deref()
            .or_else(|| self.active_conversation().and_then(Conversation::latest_svg))
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn store(&self) -> &ConversationStore<S> {
        &self.store
    }

    // ── Commands ────────────────────────────────────────────────────────────

    /// Insert an empty conversation at the front and make it active.
    pub fn create_conversation(&mut self) -> &Conversation {
        let conversation = Conversation::new();
        tracing::debug!(id = %conversation.id, "created conversation");

        self.selection = Selection::Active(conversation.id.clone());
        self.conversations.insert(0, conversation);
        self.preview_override = None;
        self.session.init_session();
        self.persist();

        &self.conversations[0]
    }

    /// Activate `id` and rebuild the session from its messages. Unknown or
    /// already active ids are ignored. Returns whether the selection changed.
    pub fn select_conversation(&mut self, id: &str) -> bool {
        if self.active_id() == Some(id) {
            return false;
        }
        let Some(target) = self.conversations.iter().find(|c| c.id == id) else {
            tracing::debug!(%id, "ignoring selection of unknown conversation");
            return false;
        };

        self.session.restore_session(&target.messages);
        self.selection = Selection::Active(target.id.clone());
        self.preview_override = None;
        true
    }

    /// Send `text`, conditioned on the current style, in the active
    /// conversation.
    ///
    /// The user message is committed before the request; the reply (or a
    /// failure notice) after it. The loading flag is held for the duration of
    /// the request and released on every exit path.
    pub async fn send_user_message(&mut self, text: &str) -> Result<SendOutcome> {
        let active_id = self
            .active_id()
            .ok_or(ForgeError::NoActiveConversation)?
            .to_string();
        let _loading = LoadingGuard::acquire(&self.loading).ok_or(ForgeError::Busy)?;

        self.update_conversation(&active_id, |c| {
            c.derive_title(text);
            c.push_message(Message::user(text));
        });
        self.preview_override = None;

        let prompt = self.current_style.directive(text);
        let outcome = match self.session.send_message(&prompt).await {
            Ok(response) => {
                let reply = Message::model(replace_svg(&response, SVG_PLACEHOLDER));
                match extract_svg(&response) {
                    Some(svg) => SendOutcome::Generated {
                        reply,
                        artifact: HistoryItem::new(text, svg),
                    },
                    None => SendOutcome::Replied { reply },
                }
            }
            Err(e) => {
                tracing::error!("generation error: {e}");
                let rate_limited = e.is_rate_limited();
                let notice = if rate_limited { RATE_LIMITED } else { GENERIC_FAILURE };
                SendOutcome::Failed {
                    reply: Message::model(notice),
                    rate_limited,
                    status: e.status(),
                }
            }
        };

        self.update_conversation(&active_id, |c| {
            c.push_message(outcome.reply().clone());
            if let Some(artifact) = outcome.artifact() {
                c.push_artifact(artifact.clone());
            }
        });

        Ok(outcome)
    }

    /// Remove `id`. Deleting the last conversation leaves the list empty with
    /// a fresh one pending; deleting the active one activates the new front.
    pub fn delete_conversation(&mut self, id: &str) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        if self.conversations.len() == before {
            return false;
        }

        if self.conversations.is_empty() {
            self.selection = Selection::PendingFresh;
            self.preview_override = None;
            return true;
        }

        if self.active_id() == Some(id) {
            let next = &self.conversations[0];
            self.session.restore_session(&next.messages);
            self.selection = Selection::Active(next.id.clone());
            self.preview_override = None;
        }
        self.persist();
        true
    }

    /// Perform work deferred by an earlier command. Returns whether anything
    /// ran.
    pub fn run_deferred(&mut self) -> bool {
        if self.selection == Selection::PendingFresh && self.conversations.is_empty() {
            self.create_conversation();
            return true;
        }
        false
    }

    /// Drop every conversation and start fresh, if `confirm` agrees.
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            return false;
        }
        self.conversations.clear();
        if let Err(e) = self.store.clear() {
            tracing::error!("failed to clear saved conversations: {e}");
        }
        self.create_conversation();
        tracing::info!("cleared all conversations");
        true
    }

    /// Put a gallery artifact on display and tell the model about it.
    pub async fn select_gallery_artifact(&mut self, svg_code: &str) {
        self.preview_override = Some(svg_code.to_string());
        self.session.push_system_note(&grounding_note(svg_code)).await;
    }

    /// Change the style used for subsequent requests.
    pub fn set_style(&mut self, id: &str) -> Result<&'static IconStyle> {
        if self.is_loading() {
            return Err(ForgeError::Busy);
        }
        let style = find_style(id)?;
        self.current_style = style;
        Ok(style)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn update_conversation(&mut self, id: &str, update: impl FnOnce(&mut Conversation)) {
        match self.conversations.iter_mut().find(|c| c.id == id) {
            Some(conversation) => {
                update(conversation);
                self.persist();
            }
            None => tracing::warn!(%id, "conversation vanished before update"),
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.conversations) {
            tracing::error!("failed to save conversations: {e}");
        }
    }
}
