//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! Widgets here read the values computed by `core` and `app`; none of them
//! mutate state.

pub mod layout;
pub mod page;
pub mod progress;
pub mod spinner;
pub mod theme;
