//! Application orchestration: state, event loop plumbing, input and frames.

pub mod event;
pub mod frame;
pub mod handler;
pub mod scene_runtime;
pub mod state;
