use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::quiz::{AnswerOption, AnswerResult, AnswerSubmission, Question};
use crate::utils::time::{Clock, SystemClock};

/// Countdown value for one question, at 1-second display resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    Remaining { minutes: i64, seconds: i64 },
    Expired,
}

impl TimeRemaining {
    pub fn is_expired(&self) -> bool {
        matches!(self, TimeRemaining::Expired)
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Remaining { minutes, seconds } => {
                write!(f, "{}:{:02}", minutes, seconds)
            }
            TimeRemaining::Expired => f.write_str("Expired"),
        }
    }
}

/// Remaining time until `expires_at`, or the expired sentinel once
/// `now >= expires_at`. Display-only: the backend stays authoritative on
/// whether a submission is accepted.
pub fn compute_time_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let remaining = (expires_at - now).num_seconds();
    if remaining <= 0 {
        TimeRemaining::Expired
    } else {
        TimeRemaining::Remaining {
            minutes: remaining / 60,
            seconds: remaining % 60,
        }
    }
}

/// Mutually exclusive display state of one question, derived per render tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizRoundState {
    Answerable,
    Expired,
    Answered(AnswerResult),
    /// Answered in a prior session; the backend reports the flag only, with
    /// no result payload, so the correct answer stays undisclosed.
    PreviouslyAnswered,
}

/// Derives the display state. Precedence: a local result from this session
/// beats the `already_answered` flag, which beats expiry.
pub fn display_state(
    question: &Question,
    prior_result: Option<&AnswerResult>,
    now: DateTime<Utc>,
) -> QuizRoundState {
    if let Some(result) = prior_result {
        return QuizRoundState::Answered(*result);
    }
    if question.already_answered {
        return QuizRoundState::PreviouslyAnswered;
    }
    if compute_time_remaining(question.expires_at, now).is_expired() {
        return QuizRoundState::Expired;
    }
    QuizRoundState::Answerable
}

/// True iff the question is not expired, not already answered, has no local
/// result, and an option is actually selected.
pub fn can_submit(
    question: &Question,
    prior_result: Option<&AnswerResult>,
    selected: Option<AnswerOption>,
    now: DateTime<Utc>,
) -> bool {
    selected.is_some() && display_state(question, prior_result, now) == QuizRoundState::Answerable
}

/// Optimistic score mirror: +1 for a confirmed correct answer, unchanged
/// otherwise. Applied only after a successful backend response.
pub fn tally_score(current_score: u32, is_correct: bool) -> u32 {
    if is_correct {
        current_score + 1
    } else {
        current_score
    }
}

/// Outcome of a submission attempt that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(AnswerResult),
    /// The backend refused the submission (expired server-side, answered
    /// elsewhere, bad payload). The caller should re-fetch the question list
    /// rather than trust the local clock.
    Rejected { message: String },
    /// Nothing was sent: a result already exists for this question.
    AlreadyAnswered,
}

/// Per-page quiz session: local results keyed by question id plus the
/// optimistic score mirror.
pub struct QuizRound {
    results: HashMap<i64, AnswerResult>,
    submissions: HashMap<i64, AnswerSubmission>,
    score: u32,
    clock: Arc<dyn Clock>,
}

impl QuizRound {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            results: HashMap::new(),
            submissions: HashMap::new(),
            score: 0,
            clock,
        }
    }

    /// Seeds the mirror from `GET /api/quiz/my-score/`.
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn result_for(&self, question_id: i64) -> Option<&AnswerResult> {
        self.results.get(&question_id)
    }

    /// The recorded choice for a question, once a submission was accepted.
    pub fn submission_for(&self, question_id: i64) -> Option<&AnswerSubmission> {
        self.submissions.get(&question_id)
    }

    pub fn state_for(&self, question: &Question) -> QuizRoundState {
        display_state(question, self.results.get(&question.id), self.clock.now())
    }

    pub fn time_remaining(&self, question: &Question) -> TimeRemaining {
        compute_time_remaining(question.expires_at, self.clock.now())
    }

    pub fn can_submit(&self, question: &Question, selected: Option<AnswerOption>) -> bool {
        can_submit(
            question,
            self.results.get(&question.id),
            selected,
            self.clock.now(),
        )
    }

    /// Associates a backend verdict with a question for the rest of the
    /// session and bumps the score mirror. First write wins: no take-backs.
    pub fn record_result(&mut self, question_id: i64, result: AnswerResult) {
        if self.results.contains_key(&question_id) {
            tracing::debug!(question_id, "result already recorded, ignoring");
            return;
        }
        self.score = tally_score(self.score, result.is_correct);
        self.results.insert(question_id, result);
    }

    /// Submits the selected option for a question.
    ///
    /// Expiry is deliberately not pre-checked against the local clock (clock
    /// skew): the backend accepts or rejects. A backend rejection comes back
    /// as [`SubmitOutcome::Rejected`] so the page re-derives state from a
    /// fresh fetch. A transport failure propagates as `Err`, leaving the
    /// question answerable and the selection intact so the user may resubmit.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        question: &Question,
        selected: AnswerOption,
    ) -> ApiResult<SubmitOutcome> {
        if question.already_answered || self.results.contains_key(&question.id) {
            return Ok(SubmitOutcome::AlreadyAnswered);
        }

        match api.submit_answer(question.id, selected).await {
            Ok(result) => {
                tracing::debug!(
                    question_id = question.id,
                    correct = result.is_correct,
                    "answer accepted"
                );
                self.submissions
                    .entry(question.id)
                    .or_insert(AnswerSubmission {
                        question_id: question.id,
                        selected_option: selected,
                        submitted_at: self.clock.now(),
                    });
                self.record_result(question.id, result);
                Ok(SubmitOutcome::Accepted(result))
            }
            Err(ApiError::Status { status, message }) => {
                tracing::warn!(question_id = question.id, status, %message, "answer rejected");
                Ok(SubmitOutcome::Rejected { message })
            }
            Err(ApiError::Validation(fields)) => {
                let message = fields
                    .values()
                    .flatten()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!(question_id = question.id, %message, "answer rejected");
                Ok(SubmitOutcome::Rejected { message })
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for QuizRound {
    fn default() -> Self {
        Self::new()
    }
}

/// One shared 1-second ticker driving every visible countdown on the quiz
/// page. Created on mount, stopped on unmount; questions subscribe instead
/// of owning timers of their own.
pub struct CountdownClock {
    ticks: watch::Receiver<DateTime<Utc>>,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CountdownClock {
    pub fn start() -> Self {
        let (tick_tx, ticks) = watch::channel(Utc::now());
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if tick_tx.send(Utc::now()).is_err() {
                            break;
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("countdown clock stopped");
        });

        Self {
            ticks,
            shutdown,
            handle,
        }
    }

    /// A receiver yielding the current instant once per second.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.ticks.clone()
    }

    /// Explicit teardown on page unmount.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
