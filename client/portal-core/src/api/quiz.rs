use super::ApiClient;
use crate::error::ApiResult;
use crate::models::quiz::{
    AnswerOption, AnswerRequest, AnswerResult, LeaderboardEntry, NewQuestion, Question,
    QuizSettings, ScoreSummary,
};

/// Quiz endpoints. Question authoring and deletion are admin-gated on the
/// backend; the client-side gate only hides the affordances.
impl ApiClient {
    pub async fn list_questions(&self, year: i32) -> ApiResult<Vec<Question>> {
        self.get_json_query("/api/quiz/questions/", &[("year", year)])
            .await
    }

    pub async fn create_question(&self, question: &NewQuestion) -> ApiResult<Question> {
        self.post_json("/api/quiz/questions/", question).await
    }

    pub async fn delete_question(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/quiz/questions/{}/", id)).await
    }

    /// Sends one answer. The backend is the authority on acceptance; an
    /// expired or repeated submission comes back as a status error.
    pub async fn submit_answer(
        &self,
        question_id: i64,
        selected: AnswerOption,
    ) -> ApiResult<AnswerResult> {
        let body = AnswerRequest {
            selected_answer: selected,
        };
        self.post_json(&format!("/api/quiz/questions/{}/answer/", question_id), &body)
            .await
    }

    pub async fn my_score(&self) -> ApiResult<ScoreSummary> {
        self.get_json("/api/quiz/my-score/").await
    }

    pub async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        self.get_json("/api/quiz/leaderboard/").await
    }

    pub async fn quiz_settings(&self) -> ApiResult<QuizSettings> {
        self.get_json("/api/quiz/settings/").await
    }

    pub async fn update_quiz_settings(&self, settings: &QuizSettings) -> ApiResult<QuizSettings> {
        self.post_json("/api/quiz/settings/", settings).await
    }

    pub async fn toggle_leaderboard(&self) -> ApiResult<QuizSettings> {
        self.post_empty("/api/quiz/toggle-leaderboard/").await
    }
}
