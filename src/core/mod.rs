//! Core sequencing: waypoint matching, smoothing, and phase mapping.
//!
//! Nothing in this module depends on any TUI or rendering crate, and none of
//! it performs I/O inside the per-frame path.  The host feeds samples in and
//! applies the returned values.

pub mod geometry;
pub mod matcher;
pub mod path;
pub mod phase;
pub mod sampler;
pub mod skip;
pub mod smoother;
pub mod spring;
pub mod sync;
