pub mod announcement;
pub mod auth;
pub mod chitfund;
pub mod expenditure;
pub mod game;
pub mod member;
pub mod memory;
pub mod notification;
pub mod quiz;
pub mod session;
pub mod sponsor;

pub use quiz::{AnswerOption, AnswerResult, AnswerSubmission, Question};
pub use session::{Role, Session};
