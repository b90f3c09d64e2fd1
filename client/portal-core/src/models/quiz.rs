use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the four answer choices of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }
}

impl std::fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quiz item owned by the backend, fetched read-only.
///
/// `correct_answer` is only present for privileged clients or after the
/// viewer has answered; `already_answered` is computed per requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image: Option<String>,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<AnswerOption>,
    pub year: i32,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub already_answered: bool,
}

impl Question {
    pub fn option_text(&self, option: AnswerOption) -> &str {
        match option {
            AnswerOption::A => &self.option_a,
            AnswerOption::B => &self.option_b,
            AnswerOption::C => &self.option_c,
            AnswerOption::D => &self.option_d,
        }
    }
}

/// Payload for authoring a new question (admin only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image: Option<String>,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: AnswerOption,
    pub year: i32,
    pub expires_at: DateTime<Utc>,
}

/// Local record of the viewer's choice for one question. Once recorded for a
/// question id, no further submission is made in this session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub selected_option: AnswerOption,
    pub submitted_at: DateTime<Utc>,
}

/// Wire body for `POST /api/quiz/questions/{id}/answer/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub selected_answer: AnswerOption,
}

/// Backend verdict for a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
    pub correct_answer: AnswerOption,
}

/// The viewer's score as reported by `GET /api/quiz/my-score/`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u32,
    #[serde(default)]
    pub answered: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub full_name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuizSettings {
    pub leaderboard_visible: bool,
    pub active_year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_text_maps_each_choice() {
        let q = Question {
            id: 1,
            question_text: "?".into(),
            question_image: None,
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
            correct_answer: None,
            year: 2025,
            expires_at: Utc::now(),
            already_answered: false,
        };
        assert_eq!(q.option_text(AnswerOption::A), "a");
        assert_eq!(q.option_text(AnswerOption::D), "d");
    }

    #[test]
    fn answer_result_uses_wire_field_names() {
        let json = r#"{"isCorrect":true,"correct_answer":"B"}"#;
        let result: AnswerResult = serde_json::from_str(json).unwrap();
        assert!(result.is_correct);
        assert_eq!(result.correct_answer, AnswerOption::B);
    }

    #[test]
    fn question_tolerates_hidden_correct_answer() {
        let json = r#"{
            "id": 7,
            "question_text": "Who founded the association?",
            "option_a": "A", "option_b": "B", "option_c": "C", "option_d": "D",
            "year": 2025,
            "expires_at": "2025-06-01T12:00:00Z"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, None);
        assert!(!q.already_answered);
    }
}
