pub mod autocomplete;
pub mod event;
pub mod text_edit;

pub use autocomplete::{Autocomplete, FocusPolicy, Options};
pub use event::{InteractionResult, WidgetAction};
