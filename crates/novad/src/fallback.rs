//! Deterministic rule-based responder.
//!
//! Used only after every configured backend has been skipped or has
//! failed. Total and side-effect-free: every input maps to an answer.

/// Human-readable provider label attached to fallback answers.
pub const RULE_BASED_LABEL: &str = "Rule-based Fallback";

const DIAGRAM_ANSWER: &str = "Here's a simple text diagram:\n\n```\n\
┌─────────────┐\n│   System    │\n│  Overview   │\n└─────────────┘\n      \
|\n      v\n┌─────────────┐\n│   Process   │\n│    Flow     │\n└─────────────┘\n```";

const CHART_ANSWER: &str = "Text-based chart example:\n\nData Flow:\n\
Input → Process → Output\n  |       |        |\n  v       v        v\nUser → System → Result";

const PIPE_DIAGRAM_ANSWER: &str = "Here's a simple diagram using | symbols:\n\n```\n    \
Input Data\n        |\n        v\n   ┌─────────┐\n   │ Process │\n   └─────────┘\n        \
|\n        v\n   Output Result\n        |\n        v\n    ┌─────────┐\n    │ Display │\n    \
└─────────┘\n```";

const UNAVAILABLE_ANSWER: &str = "I'm sorry, all AI providers are currently unavailable. \
Please try again later or check your connection.";

/// Keyword table scanned in order; the first match wins, so entries
/// are ordered most-specific-first ("what is your name" before "hi").
const RESPONSES: &[(&str, &str)] = &[
    (
        "what is your name",
        "I'm your AI Assistant, powered by multiple AI providers including Gemini Pro, \
         OpenAI, and Ollama.",
    ),
    (
        "how are you",
        "I'm doing well, thank you for asking! How can I help you?",
    ),
    (
        "thank you",
        "You're welcome! Is there anything else I can help you with?",
    ),
    ("hello", "Hello! I'm an AI assistant ready to help you."),
    (
        "help",
        "I can help you with various tasks like answering questions, writing code, \
         creative writing, math problems, and general conversation. What would you like \
         assistance with?",
    ),
    ("bye", "Goodbye! Feel free to chat with me anytime."),
    (
        "weather",
        "I don't have access to real-time weather data, but I'd be happy to help you \
         with other questions!",
    ),
    ("diagram", DIAGRAM_ANSWER),
    ("chart", CHART_ANSWER),
    ("hi", "Hi there! How can I assist you today?"),
];

/// Answer a message from the keyword table.
pub fn respond(user_text: &str) -> String {
    let lower = user_text.trim().to_lowercase();

    for (keyword, answer) in RESPONSES {
        if lower.contains(keyword) {
            return (*answer).to_string();
        }
    }

    // ASCII-art request signalled by literal pipes in the message.
    if user_text.contains('|') {
        return PIPE_DIAGRAM_ANSWER.to_string();
    }

    UNAVAILABLE_ANSWER.to_string()
}
