mod messages;

pub use messages::{build_messages, system_instruction, ChatMessage, Role, SYSTEM_INSTRUCTION};
