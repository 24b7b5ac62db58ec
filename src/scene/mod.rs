//! Scene stand-in for the external 3D engine.
//!
//! The sequencer only ever talks to a scene through
//! [`crate::core::sampler::PositionProvider`].  The simulated scene here plays
//! the part of a scroll-triggered 3D scene: it receives scroll input as
//! deltas, animates one named object along its own timeline, and reports
//! where that object currently is.

pub mod simulated;
