use crate::conversation::{Author, Message};
use crate::error::ForgeError;
use crate::llm::{self, LlmClient};

/// Fixed instruction pinned ahead of every transcript sent to the model.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are an expert SVG artist and engineer known for creating pixel-perfect, visually balanced, and beautiful icons. Your goal is to generate, modify, and optimize SVG code based on user requests.

DESIGN PRINCIPLES:
1. **Symmetry & Balance**: Ensure icons are perfectly symmetrical where appropriate (e.g., gears, shields, faces). Use exact coordinates to mirror paths.
2. **Grid Alignment**: Align points to a logical grid (e.g., integers on a 24x24 or 100x100 grid) to avoid fuzzy edges or slight misalignments.
3. **Simplicity**: Use geometric primitives (rect, circle, path with distinct arcs) rather than jagged manual paths.
4. **Consistency**: Maintain consistent stroke widths and rounded corners (stroke-linejoin="round", stroke-linecap="round") for a polished look.
5. **Centering**: Always center the icon within the viewBox.

RULES:
1. ALWAYS return valid, standalone SVG code when asked for an image, icon, or visual modification.
2. The SVG MUST have a 'viewBox' attribute (e.g., "0 0 24 24") to ensure scaling.
3. Use semantic and clean SVG structure.
4. If the user asks for adjustments (e.g., "make it red", "thicker lines"), modify the previously generated SVG context while maintaining the high design quality.
5. Do NOT wrap the SVG in markdown code blocks like ```xml ... ```. Just return the raw SVG code embedded in your response text, or if you provide a text explanation, place the SVG code clearly within it.
6. Prefer using 'currentColor' for strokes or fills if it's a monochrome icon, unless specific colors are requested.
7. If the user request is conversational and doesn't require an SVG change, just reply normally.
"#;

/// Grounding note sent when the user picks an artifact from the gallery.
pub fn grounding_note(svg_code: &str) -> String {
    format!(
        "[SYSTEM UPDATE] The user has loaded the following SVG into the editor context. Future \"make it...\" commands apply to this: \n{svg_code}"
    )
}

/// The single live context with the remote model.
///
/// Exactly one conversation is mirrored at a time; switching conversations
/// replaces the whole transcript via [`ChatSession::restore_session`].
pub struct ChatSession {
    client: Box<dyn LlmClient>,
    system_instruction: String,
    transcript: Vec<llm::Message>,
    epoch: u64,
}

impl ChatSession {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self {
            client,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            transcript: Vec::new(),
            epoch: 0,
        }
    }

    /// Empty transcript; the system instruction stays pinned.
    pub fn init_session(&mut self) {
        self.transcript.clear();
        self.epoch += 1;
        tracing::debug!(epoch = self.epoch, "chat session initialized");
    }

    /// Replace the transcript with `messages`, mapping `model` turns to the
    /// wire's `assistant` role.
    pub fn restore_session(&mut self, messages: &[Message]) {
        self.transcript = messages.iter().map(to_wire).collect();
        self.epoch += 1;
        tracing::debug!(
            epoch = self.epoch,
            turns = self.transcript.len(),
            "chat session restored"
        );
    }

    /// Append `text` as a user turn, send the full context, append and
    /// return the reply. The user turn is kept when the request fails.
    pub async fn send_message(&mut self, text: &str) -> Result<String, ForgeError> {
        self.transcript.push(llm::Message::user(text));

        let reply = self
            .client
            .chat(&self.system_instruction, &self.transcript)
            .await?;
        self.transcript.push(llm::Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Best-effort context update. Errors are logged and dropped.
    pub async fn push_system_note(&mut self, text: &str) {
        if let Err(e) = self.send_message(text).await {
            tracing::warn!("failed to update model context: {e}");
        }
    }

    pub fn transcript(&self) -> &[llm::Message] {
        &self.transcript
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Incremented by every init/restore.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}

fn to_wire(message: &Message) -> llm::Message {
    match message.role {
        Author::User => llm::Message::user(message.content.clone()),
        Author::Model => llm::Message::assistant(message.content.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(String, Vec<llm::Message>)>>>;

    struct EchoClient {
        seen: Seen,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl LlmClient for EchoClient {
        async fn chat(&self, system: &str, messages: &[llm::Message]) -> Result<String, ForgeError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), messages.to_vec()));
            if self.fail {
                return Err(ForgeError::request(Some(500), "boom"));
            }
            Ok(format!("echo: {}", messages.last().map(|m| m.content.as_str()).unwrap_or("")))
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    fn session(fail: bool) -> (ChatSession, Seen) {
        let seen = Seen::default();
        let client = EchoClient {
            seen: seen.clone(),
            fail,
        };
        (ChatSession::new(Box::new(client)), seen)
    }

    #[tokio::test]
    async fn test_send_appends_both_turns() {
        let (mut session, seen) = session(false);
        let reply = session.send_message("hello").await.unwrap();

        assert_eq!(reply, "echo: hello");
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].role, Role::Assistant);

        let calls = seen.lock().unwrap();
        assert_eq!(calls[0].0, SYSTEM_INSTRUCTION);
        assert_eq!(calls[0].1, vec![llm::Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_failed_send_keeps_user_turn_and_returns_payload() {
        let (mut session, _) = session(true);
        let err = session.send_message("hello").await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("boom"));
        assert_eq!(session.transcript(), &[llm::Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_system_note_failure_is_swallowed() {
        let (mut session, seen) = session(true);
        session.push_system_note(&grounding_note("<svg></svg>")).await;
        let calls = seen.lock().unwrap();
        assert!(calls[0].1[0].content.starts_with("[SYSTEM UPDATE]"));
        assert!(calls[0].1[0].content.ends_with("\n<svg></svg>"));
    }

    #[test]
    fn test_restore_maps_roles_and_bumps_epoch() {
        let (mut session, _) = session(false);
        let before = session.epoch();
        session.restore_session(&[Message::user("draw"), Message::model("done")]);

        assert_eq!(session.epoch(), before + 1);
        assert_eq!(
            session.transcript(),
            &[llm::Message::user("draw"), llm::Message::assistant("done")]
        );
    }

    #[test]
    fn test_init_is_idempotent() {
        let (mut session, _) = session(false);
        session.restore_session(&[Message::user("draw")]);
        session.init_session();
        session.init_session();
        assert!(session.transcript().is_empty());
        assert_eq!(session.system_instruction(), SYSTEM_INSTRUCTION);
    }
}
