//! crates/baeumteo_core/src/scam_quiz.rs
//!
//! The five-question scam-prevention quiz and each user's progress through it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizChoice {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub choices: &'static [QuizChoice],
    pub answer: &'static str,
    pub explanation: &'static str,
}

const YES_NO: &[QuizChoice] = &[
    QuizChoice { id: "yes", label: "네" },
    QuizChoice { id: "no", label: "아니요" },
];

const RESPONSES: &[QuizChoice] = &[
    QuizChoice { id: "ignore", label: "그냥 무시한다" },
    QuizChoice { id: "call", label: "기존 번호로 전화해 확인한다" },
    QuizChoice { id: "report", label: "클릭하지 않고 신고한다" },
    QuizChoice { id: "verify", label: "끊고 본인에게 직접 확인한다" },
    QuizChoice { id: "send", label: "요청대로 처리한다" },
];

pub static QUIZ: [QuizQuestion; 5] = [
    QuizQuestion {
        question: "\"택배 조회하세요\" 문자의 링크를 클릭해도 되나요?",
        choices: YES_NO,
        answer: "no",
        explanation: "절대 안됩니다. 택배 조회는 공식 앱이나 홈페이지로 직접 접속하세요.",
    },
    QuizQuestion {
        question: "경찰이라며 전화가 왔어요. 계좌번호를 알려줘야 하나요?",
        choices: YES_NO,
        answer: "no",
        explanation: "경찰이나 검찰은 전화로 계좌번호를 묻지 않습니다. 100% 사기입니다.",
    },
    QuizQuestion {
        question: "지인이 카톡으로 \"전화번호 바뀌었어\"라고 해요. 어떻게 하나요?",
        choices: RESPONSES,
        answer: "call",
        explanation: "반드시 기존 번호로 전화해서 본인인지 확인하세요.",
    },
    QuizQuestion {
        question: "의심스러운 링크를 받았어요. 어떻게 하나요?",
        choices: RESPONSES,
        answer: "report",
        explanation: "절대 클릭하지 말고, 앱의 사기예방 센터나 112에 신고하세요.",
    },
    QuizQuestion {
        question: "\"급히 돈이 필요해\"라는 전화를 받았어요. 어떻게 하나요?",
        choices: RESPONSES,
        answer: "verify",
        explanation: "끊고 본인에게 직접 전화해서 확인하세요. 급한 돈 요청은 대부분 사기입니다.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("No quiz question {0}")]
    UnknownQuestion(usize),
    #[error("Question {question} has no choice '{choice}'")]
    UnknownChoice { question: usize, choice: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: bool,
    pub answer: &'static str,
    pub explanation: &'static str,
}

/// Which questions a user has answered correctly. A wrong answer can be
/// retried; a correct one stays solved until the quiz is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizProgress {
    solved: [bool; QUIZ.len()],
}

impl QuizProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&mut self, index: usize, choice: &str) -> Result<QuizOutcome, QuizError> {
        let question = QUIZ.get(index).ok_or(QuizError::UnknownQuestion(index))?;
        let choice = choice.trim();
        if !question.choices.iter().any(|c| c.id == choice) {
            return Err(QuizError::UnknownChoice {
                question: index,
                choice: choice.to_string(),
            });
        }

        let correct = choice == question.answer;
        if correct {
            self.solved[index] = true;
        }
        Ok(QuizOutcome {
            correct,
            answer: question.answer,
            explanation: question.explanation,
        })
    }

    pub fn is_solved(&self, index: usize) -> bool {
        self.solved.get(index).copied().unwrap_or(false)
    }

    pub fn solved_count(&self) -> usize {
        self.solved.iter().filter(|s| **s).count()
    }

    pub fn progress_percent(&self) -> u8 {
        ((self.solved_count() * 100) / QUIZ.len()) as u8
    }

    pub fn reset(&mut self) {
        self.solved = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_answer_is_one_of_its_choices() {
        for q in &QUIZ {
            assert!(q.choices.iter().any(|c| c.id == q.answer), "{}", q.question);
        }
    }

    #[test]
    fn correct_answers_count_towards_progress() {
        let mut quiz = QuizProgress::new();
        assert!(quiz.answer(0, "no").unwrap().correct);
        assert!(quiz.answer(2, "call").unwrap().correct);
        assert_eq!(quiz.solved_count(), 2);
        assert_eq!(quiz.progress_percent(), 40);
    }

    #[test]
    fn wrong_answers_explain_and_can_be_retried() {
        let mut quiz = QuizProgress::new();
        let outcome = quiz.answer(4, "send").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.answer, "verify");
        assert!(!quiz.is_solved(4));
        assert!(quiz.answer(4, "verify").unwrap().correct);
        assert!(quiz.is_solved(4));
    }

    #[test]
    fn solving_twice_counts_once() {
        let mut quiz = QuizProgress::new();
        quiz.answer(1, "no").unwrap();
        quiz.answer(1, "no").unwrap();
        quiz.answer(1, "yes").unwrap();
        assert_eq!(quiz.solved_count(), 1);
    }

    #[test]
    fn unknown_question_or_choice() {
        let mut quiz = QuizProgress::new();
        assert_eq!(quiz.answer(5, "no"), Err(QuizError::UnknownQuestion(5)));
        assert!(matches!(
            quiz.answer(0, "call"),
            Err(QuizError::UnknownChoice { question: 0, .. })
        ));
    }

    #[test]
    fn full_marks_then_reset() {
        let mut quiz = QuizProgress::new();
        for (i, q) in QUIZ.iter().enumerate() {
            quiz.answer(i, q.answer).unwrap();
        }
        assert_eq!(quiz.progress_percent(), 100);
        quiz.reset();
        assert_eq!(quiz.solved_count(), 0);
    }
}
