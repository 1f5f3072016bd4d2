//! crates/baeumteo_core/src/chat.rs
//!
//! The append-only message log of one chat session, with at most one
//! assistant reply in flight at a time.

use crate::domain::{ChatMessage, ChatRole};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const GREETING: &str = "안녕하세요! AI 학습 도우미입니다. 무엇이든 물어보세요. 😊";
pub const CLEARED_NOTICE: &str = "대화 내역이 삭제되었습니다. 새로운 질문을 해주세요! 😊";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("The previous message is still being answered")]
    ReplyPending,
    #[error("Message text must not be empty")]
    EmptyMessage,
    #[error("Message {0} is not awaiting a reply")]
    NotPending(Uuid),
}

#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    /// Id of the user message whose reply is in flight.
    pending: Option<Uuid>,
}

impl ChatTranscript {
    pub fn new(greeting_model: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING, greeting_model, now)],
            pending: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Checks that a new user message may be sent right now, without changing anything.
    pub fn ready_for(&self, text: &str) -> Result<(), ChatError> {
        if self.pending.is_some() {
            return Err(ChatError::ReplyPending);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(())
    }

    /// Appends the user's message and marks a reply as pending.
    pub fn begin_turn(&mut self, text: &str, now: DateTime<Utc>) -> Result<ChatMessage, ChatError> {
        self.ready_for(text)?;
        let message = ChatMessage::user(text.trim(), now);
        self.messages.push(message.clone());
        self.pending = Some(message.id);
        Ok(message)
    }

    /// Appends the assistant's reply directly after the message it answers.
    ///
    /// Fails if `in_reply_to` is no longer pending, e.g. after a reset.
    pub fn finish_turn(
        &mut self,
        in_reply_to: Uuid,
        reply: impl Into<String>,
        model_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ChatMessage, ChatError> {
        if self.pending != Some(in_reply_to) {
            return Err(ChatError::NotPending(in_reply_to));
        }
        let message = ChatMessage::assistant(reply, model_name, now);
        self.messages.push(message.clone());
        self.pending = None;
        Ok(message)
    }

    /// Releases the in-flight slot when a reply could not be produced.
    pub fn abandon_turn(&mut self, in_reply_to: Uuid) {
        if self.pending == Some(in_reply_to) {
            self.pending = None;
        }
    }

    /// Drops the whole history, leaving only a notice.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.messages.clear();
        self.messages.push(ChatMessage::assistant(CLEARED_NOTICE, None, now));
        self.pending = None;
    }
}

/// The most recent message the user sent, which is the one a reply answers.
pub fn last_user_message(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    messages.iter().rev().find(|m| m.role == ChatRole::User)
}
