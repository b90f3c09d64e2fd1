//! Client-side core of the HT Portal admin console: session storage, the
//! authorization gate, the quiz round state machine, and the REST client
//! they sit on. The backend is an external collaborator; this crate only
//! consumes it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, MutationGuard};
pub use config::PortalConfig;
pub use error::{ApiError, ApiResult};
pub use services::auth_gate::AuthorizationGate;
pub use services::quiz_round::{QuizRound, QuizRoundState, TimeRemaining};
pub use storage::SessionStore;
