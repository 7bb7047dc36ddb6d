//! Messages sent to the completion endpoint.
//!
//! The parser depends on the exact layout described in
//! [`SYSTEM_INSTRUCTION`]; the two must change together.

use serde::{Deserialize, Serialize};

/// Instruction sent ahead of every user prompt. `{refusal}` is replaced by
/// the refusal phrase the parser looks for.
pub const SYSTEM_INSTRUCTION: &str = "You generate multiple-choice questions (QCM) for students.
If the request is not about creating a QCM, reply exactly: {refusal}
Otherwise write every question in this format and nothing else:

1. <question text>
```
<optional code snippet>
```
A) <option>
B) <option>
C) <option>
D) <option>
Answer: <letter>

Use between 2 and 4 options per question. Leave out the code block when the question has no code.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message in the usual chat-completions shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

pub fn system_instruction(refusal_phrase: &str) -> String {
    SYSTEM_INSTRUCTION.replace("{refusal}", refusal_phrase)
}

/// Builds the system and user messages for one generation request.
pub fn build_messages(user_prompt: &str, refusal_phrase: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_instruction(refusal_phrase)),
        ChatMessage::user(user_prompt.trim()),
    ]
}
