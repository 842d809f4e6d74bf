pub mod identity;
pub mod services;
pub mod session;

pub use identity::{IdentityService, UserProfile};
pub use services::HistoryLedger;
pub use session::{start_session, LotSession, MoveContext, MoveOutcome, PendingFinish};
