//! services/api/src/adapters/completion.rs
//!
//! This module contains the adapter for the chat assistant.
//! It implements the `CompletionService` port with templated answers that
//! echo the user's question, after a randomized delay.

use async_trait::async_trait;
use baeumteo_core::{
    chat::last_user_message,
    domain::{AiModel, ChatMessage},
    ports::{CompletionService, PortError, PortResult},
};
use rand::Rng;
use std::time::Duration;
use tracing::info;

const RESPONSE_TEMPLATES: [&str; 3] = [
    "좋은 질문이세요! {question}에 대해 설명드리겠습니다.\n\n첫째, 이것은 매우 중요한 개념입니다. 차근차근 알아보시면 어렵지 않습니다.\n\n둘째, 실생활에서 바로 활용하실 수 있는 방법들이 많이 있습니다.\n\n더 궁금하신 점이 있으시면 언제든 물어보세요!",
    "이해하기 쉽게 설명드리겠습니다.\n\n{question}는 일상생활에서 자주 접하는 주제인데요, 간단한 예시로 설명드리면:\n\n1. 먼저 기본 개념을 이해합니다\n2. 실습을 통해 직접 경험합니다\n3. 반복 학습으로 완전히 익힙니다\n\n천천히 따라하시면 금방 익히실 수 있습니다!",
    "훌륭한 질문입니다! 많은 분들이 궁금해하시는 내용이에요.\n\n{question}에 대해서는 이렇게 생각하시면 됩니다:\n\n- 핵심은 기본을 탄탄히 하는 것입니다\n- 너무 어렵게 생각하지 마세요\n- 조금씩 단계별로 배우면 됩니다\n\n도움이 되셨기를 바랍니다!",
];

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` with canned responses.
#[derive(Clone)]
pub struct CannedCompletionAdapter {
    min_delay: Duration,
    jitter: Duration,
}

impl CannedCompletionAdapter {
    /// Creates a new `CannedCompletionAdapter`.
    pub fn new(min_delay: Duration, jitter: Duration) -> Self {
        Self { min_delay, jitter }
    }

    fn render(template: &str, question: &str) -> String {
        template.replace("{question}", question)
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for CannedCompletionAdapter {
    async fn complete(&self, model: &AiModel, history: &[ChatMessage]) -> PortResult<String> {
        let question = last_user_message(history)
            .map(|m| m.text.as_str())
            .ok_or_else(|| {
                PortError::Unexpected("Completion requested without a user message".to_string())
            })?;

        // The thread-local RNG is not Send, so draw everything before awaiting.
        let (template, delay) = {
            let mut rng = rand::thread_rng();
            let template = RESPONSE_TEMPLATES[rng.gen_range(0..RESPONSE_TEMPLATES.len())];
            let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
            let extra = if jitter_ms == 0 {
                0
            } else {
                rng.gen_range(0..jitter_ms)
            };
            (template, self.min_delay + Duration::from_millis(extra))
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        info!("Canned reply from {} after {:?}", model.name, delay);
        Ok(Self::render(template, question))
    }
}
