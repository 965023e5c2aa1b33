// Client exports
pub mod session;
pub mod transport;

pub use session::{Completion, FailureNotice, SearchPhase, SearchSession, SearchTicket, SessionError};
pub use transport::{ClientError, HttpScoringClient, ScoringTransport};
