pub mod candidates;
pub mod matcher;
pub mod selection;

pub use candidates::CandidateSet;
pub use matcher::{DEFAULT_MAX_RESULTS, SuggestionEngine};
pub use selection::Selection;
