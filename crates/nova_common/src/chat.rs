//! Conversation model and per-session context handling.
//!
//! A `Conversation` is built fresh for every request from the system
//! instructions, an optional context note, and the user's message. The
//! caller-owned `Context` map is pass-through state: the daemon only
//! ever touches the two reserved keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved context key holding the most recent user message.
pub const KEY_LAST_MESSAGE: &str = "last_message";
/// Reserved context key holding the most recent answer text.
pub const KEY_LAST_ANSWER: &str = "last_answer";

/// Caller-owned key/value state threaded across the turns of a session.
pub type Context = serde_json::Map<String, Value>;

/// Role of a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

/// Ordered system/user/assistant turns sent to a backend.
///
/// Immutable once built; owned by the request that constructs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

const SYSTEM_INSTRUCTIONS: &str = "You are a helpful AI assistant that can understand and \
respond to queries while maintaining context.";

impl Conversation {
    /// Build the canonical conversation for a chat request: system
    /// instructions, a context note when the caller sent any context,
    /// and the user's message.
    pub fn for_request(message: &str, context: &Context) -> Self {
        let mut turns = vec![Turn::system(SYSTEM_INSTRUCTIONS)];

        if !context.is_empty() {
            let mut note = String::from("Context: ");
            for (key, value) in context {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                note.push_str(&format!("{}: {}\n", key, rendered));
            }
            turns.push(Turn::system(note));
        }

        turns.push(Turn::user(message));
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Text of the final user turn. Adapters use this for fast-path
    /// template matching and prompt heuristics.
    pub fn user_text(&self) -> &str {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.text.as_str())
            .unwrap_or("")
    }

    /// Flatten the turns to a single prompt for backends that take
    /// plain text instead of role-tagged messages. `system_prefix`
    /// differs per backend ("System" for Ollama, "Instructions" for
    /// Gemini); the prompt always ends with an open assistant turn.
    pub fn flatten(&self, system_prefix: &str) -> String {
        let mut prompt = String::new();
        for turn in &self.turns {
            match turn.role {
                Role::System => prompt.push_str(&format!("{}: {}\n", system_prefix, turn.text)),
                Role::User => prompt.push_str(&format!("Human: {}\n", turn.text)),
                Role::Assistant => prompt.push_str(&format!("Assistant: {}\n", turn.text)),
            }
        }
        prompt.push_str("Assistant: ");
        prompt
    }
}

/// Merge a finished turn into the caller's context.
///
/// Shallow-copies `context`, overwrites `last_message` and
/// `last_answer`, and leaves every other key untouched.
pub fn merge_context(context: &Context, user_text: &str, answer_text: &str) -> Context {
    let mut merged = context.clone();
    merged.insert(KEY_LAST_MESSAGE.to_string(), Value::String(user_text.to_string()));
    merged.insert(KEY_LAST_ANSWER.to_string(), Value::String(answer_text.to_string()));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversation_without_context_has_two_turns() {
        let conv = Conversation::for_request("hello", &Context::new());
        assert_eq!(conv.turns().len(), 2);
        assert_eq!(conv.turns()[0].role, Role::System);
        assert_eq!(conv.turns()[1].role, Role::User);
        assert_eq!(conv.user_text(), "hello");
    }

    #[test]
    fn test_conversation_with_context_adds_note() {
        let mut ctx = Context::new();
        ctx.insert("topic".to_string(), json!("rust"));
        let conv = Conversation::for_request("hello", &ctx);
        assert_eq!(conv.turns().len(), 3);
        assert!(conv.turns()[1].text.starts_with("Context: "));
        assert!(conv.turns()[1].text.contains("topic: rust"));
    }

    #[test]
    fn test_flatten_ends_with_open_assistant_turn() {
        let conv = Conversation::for_request("hi", &Context::new());
        let prompt = conv.flatten("System");
        assert!(prompt.starts_with("System: "));
        assert!(prompt.contains("Human: hi\n"));
        assert!(prompt.ends_with("Assistant: "));
    }

    #[test]
    fn test_merge_context_preserves_foreign_keys() {
        let mut ctx = Context::new();
        ctx.insert("foo".to_string(), json!("bar"));
        let merged = merge_context(&ctx, "question", "answer");
        assert_eq!(merged["foo"], json!("bar"));
        assert_eq!(merged[KEY_LAST_MESSAGE], json!("question"));
        assert_eq!(merged[KEY_LAST_ANSWER], json!("answer"));
        // Original is untouched.
        assert!(!ctx.contains_key(KEY_LAST_MESSAGE));
    }

    #[test]
    fn test_merge_context_overwrites_reserved_keys() {
        let first = merge_context(&Context::new(), "one", "alpha");
        let second = merge_context(&first, "two", "beta");
        assert_eq!(second[KEY_LAST_MESSAGE], json!("two"));
        assert_eq!(second[KEY_LAST_ANSWER], json!("beta"));
    }
}
