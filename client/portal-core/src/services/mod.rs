pub mod auth_gate;
pub mod poller;
pub mod quiz_round;

pub use auth_gate::AuthorizationGate;
pub use poller::PeriodicTask;
pub use quiz_round::{QuizRound, QuizRoundState, TimeRemaining};
