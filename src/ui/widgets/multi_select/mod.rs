//! Searchable multi-select with removable chips and a dropdown of the
//! remaining options.

pub mod state;
pub mod widget;

pub use state::{
    filter_candidates, MultiSelectEvent, MultiSelectIntent, MultiSelectState,
    MultiSelectStateMachine,
};
pub use widget::{MultiSelect, EMPTY_MENU_TEXT};
