//! Append-only conversation log.
//!
//! A `Conversation` is the accumulation target for chunk summaries and the
//! history handed to the completion client for follow-up questions. Insertion
//! order is the model's context order, so messages are only ever appended:
//! nothing here reorders, edits or evicts them.
//!
//! Mutation goes through `&mut Conversation`, which keeps a single writer per
//! in-flight summarization or continuation call.

use crate::core_types::{Message, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the end of the log.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn all_messages(&self) -> &[Message] {
        &self.messages
    }

    /// Ordered subsequence of messages whose role matches exactly.
    pub fn messages_by_role(&self, role: Role) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.role == role).collect()
    }

    /// History in append order, ready to send as completion context.
    pub fn export_for_transmission(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
