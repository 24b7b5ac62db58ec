//! Nearest-index matching with jump rejection.
//!
//! The live position is snapped to the closest waypoint.  A candidate that
//! lands more than `max_jump` indices away from the last accepted index is
//! treated as a transient glitch and ignored.  Index 0 doubles as "nothing
//! matched yet", so the very first real match is always accepted.

use super::path::{Waypoint, WaypointPath};
use super::skip::SkipReason;

pub const DEFAULT_MAX_JUMP: usize = 5;

/// Matcher state: the shared path plus the last accepted index.
#[derive(Debug, Clone)]
pub struct IndexMatcher {
    path: WaypointPath,
    max_jump: usize,
    last_index: usize,
}

impl IndexMatcher {
    pub fn new(path: WaypointPath, max_jump: usize) -> Self {
        Self {
            path,
            max_jump,
            last_index: 0,
        }
    }

    pub fn path(&self) -> &WaypointPath {
        &self.path
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Treat `index` as the last accepted match (clamped to the path).
    pub fn set_last_index(&mut self, index: usize) {
        self.last_index = index.min(self.path.last_index());
    }

    /// Resolve `pos` to a path index.  On rejection `last_index` is left
    /// untouched.
    pub fn match_position(&mut self, pos: &Waypoint) -> Result<usize, SkipReason> {
        let candidate = self.path.nearest_index(pos);
        let delta = candidate.abs_diff(self.last_index);
        if delta > self.max_jump && self.last_index != 0 {
            return Err(SkipReason::JumpRejected {
                candidate,
                last: self.last_index,
                delta,
            });
        }
        self.last_index = candidate;
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::REFERENCE_WAYPOINTS;

    fn matcher_at(last: usize) -> IndexMatcher {
        let mut m = IndexMatcher::new(WaypointPath::reference(), DEFAULT_MAX_JUMP);
        m.last_index = last;
        m
    }

    #[test]
    fn set_last_index_moves_the_jump_window() {
        let mut m = matcher_at(20);
        m.set_last_index(500);
        assert_eq!(m.last_index(), 85);
        assert_eq!(m.match_position(&REFERENCE_WAYPOINTS[83]), Ok(83));
    }

    #[test]
    fn far_candidate_is_rejected() {
        let mut m = matcher_at(40);
        let err = m.match_position(&REFERENCE_WAYPOINTS[50]).unwrap_err();
        assert_eq!(
            err,
            SkipReason::JumpRejected {
                candidate: 50,
                last: 40,
                delta: 10
            }
        );
        assert_eq!(m.last_index(), 40);
    }

    #[test]
    fn near_candidate_is_accepted() {
        let mut m = matcher_at(40);
        assert_eq!(m.match_position(&REFERENCE_WAYPOINTS[43]), Ok(43));
        assert_eq!(m.last_index(), 43);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut m = matcher_at(40);
        assert_eq!(m.match_position(&REFERENCE_WAYPOINTS[35]), Ok(35));
        assert!(m.match_position(&REFERENCE_WAYPOINTS[41]).is_err());
    }

    #[test]
    fn first_match_from_zero_is_never_rejected() {
        let mut m = matcher_at(0);
        assert_eq!(m.match_position(&REFERENCE_WAYPOINTS[70]), Ok(70));
        // Protection is active again once a nonzero index is held.
        assert!(m.match_position(&REFERENCE_WAYPOINTS[10]).is_err());
    }

    #[test]
    fn returning_to_zero_reopens_the_window() {
        let mut m = matcher_at(3);
        assert_eq!(m.match_position(&REFERENCE_WAYPOINTS[0]), Ok(0));
        assert_eq!(m.match_position(&REFERENCE_WAYPOINTS[60]), Ok(60));
    }
}
