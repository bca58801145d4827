pub mod impose;
pub mod proof;

pub use impose::{ImposeState, show_impose};
pub use proof::{ProofState, show_proof};
