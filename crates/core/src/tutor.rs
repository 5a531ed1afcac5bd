//! Tutoring prompt assembly.
//!
//! Builds the system instruction (persona + learning-level snapshot +
//! optional page hint) and the ordered conversation turns sent to the
//! completion service. Pure string/message logic; the HTTP call lives in
//! `pathwise-tutor`.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Tutor persona. The snapshot and page hint are appended per request.
pub const SYSTEM_PROMPT_BASE: &str = "You are an intelligent AI tutor called Djelal that helps \
     users learn graph algorithms. Provide step-by-step explanations, avoid giving direct \
     answers, and tailor your help to the user's current skill level.";

/// Canned reply returned for flagged input. Costs nothing: no model call,
/// no token usage, no log entry.
pub const REFUSAL_REPLY: &str = "Hey, I'd love to help you, but I can't assist with that kind \
     of content. Please ask me something else.";

/// Upper bound on completion output tokens per request.
pub const MAX_COMPLETION_TOKENS: u32 = 1_000;

/// A single conversation turn in completion-API wire order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: String) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    pub fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            role: "assistant",
            content,
        }
    }
}

/// A prior (prompt, response) exchange pulled from the prompt log, replayed
/// when the user is retrying after an incorrect answer.
#[derive(Debug, Clone)]
pub struct PriorExchange {
    pub prompt: String,
    pub response: String,
}

/// Assemble the system instruction from persona, level snapshot, and an
/// optional current-page / additional-context hint.
pub fn build_system_prompt(
    learning_levels: &BTreeMap<String, f64>,
    current_page: Option<&str>,
) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT_BASE);
    prompt.push_str(
        " Here are the user's current learning levels; they range from 0 to 1, \
         where 0 is beginner and 1 is master:",
    );
    for (skill, level) in learning_levels {
        let _ = write!(prompt, " {skill}: {level:.2};");
    }
    if let Some(page) = current_page {
        let _ = write!(prompt, " The user is currently on: {page}.");
    }
    prompt
}

/// Assemble the full message list for a tutoring request.
///
/// Order: system instruction, then (when retrying after an incorrect
/// answer) the prior exchange as user/assistant turns, then the new user
/// message.
pub fn build_messages(
    system_prompt: String,
    prior_exchange: Option<PriorExchange>,
    user_input: &str,
) -> Vec<ChatTurn> {
    let mut messages = Vec::with_capacity(4);
    messages.push(ChatTurn::system(system_prompt));
    if let Some(prior) = prior_exchange {
        messages.push(ChatTurn::user(prior.prompt));
        messages.push(ChatTurn::assistant(prior.response));
    }
    messages.push(ChatTurn::user(user_input.to_string()));
    messages
}
