pub mod core;
pub mod source;
pub mod terminal;
pub mod ui;
pub mod widget;

pub use crate::core::candidates::CandidateSet;
pub use crate::core::matcher::{DEFAULT_MAX_RESULTS, SuggestionEngine};
pub use crate::core::selection::Selection;
pub use crate::source::{CandidateSource, SourceError};
pub use crate::widget::autocomplete::{Autocomplete, FocusPolicy, Options};
pub use crate::widget::event::{InteractionResult, WidgetAction};
