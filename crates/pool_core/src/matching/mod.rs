pub mod algorithm;
pub mod best_fit;
pub mod first_fit;
pub mod types;

pub use algorithm::GroupMatching;
pub use best_fit::BestFitMatching;
pub use first_fit::FirstFitMatching;
pub use types::{GroupCandidate, MatchDecision, MatchRequest, PassengerStop};
