//! Reference waypoint path: the authored trajectory of the tracked object.
//!
//! The path is an ordered, immutable list of 3D points.  Index 0 is the
//! logical start and `len() - 1` the logical end.  The compiled-in
//! [`REFERENCE_WAYPOINTS`] table is the default asset; [`WaypointPath::load`]
//! reads an alternative from a plain-text file.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

// ───────────────────────────────────────── waypoint ──────────

/// One authored 3D reference coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance.  Ordering-equivalent to the real distance.
    pub fn distance_sq(&self, other: &Waypoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Linear interpolation toward `other` (`t` in [0, 1]).
    pub fn lerp(&self, other: &Waypoint, t: f64) -> Waypoint {
        Waypoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error)]
pub enum PathError {
    #[error("failed to read waypoint file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected `x, y, z`, got {text:?}")]
    Malformed { line: usize, text: String },
    #[error("a waypoint path needs at least 2 points, found {0}")]
    TooShort(usize),
}

// ───────────────────────────────────────── path ──────────────

/// Shared, read-only waypoint path.
///
/// Cloning is cheap (the points live behind an `Arc`), so the matcher and the
/// simulated scene can each hold a handle to the same instance.
#[derive(Debug, Clone)]
pub struct WaypointPath {
    points: Arc<[Waypoint]>,
}

impl WaypointPath {
    /// Build a path from owned points.  Fewer than two points cannot express
    /// progress (`index / (N - 1)`), so they are rejected.
    pub fn new(points: Vec<Waypoint>) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooShort(points.len()));
        }
        Ok(Self {
            points: points.into(),
        })
    }

    /// The compiled-in 86-point reference asset.
    pub fn reference() -> Self {
        Self {
            points: Arc::from(&REFERENCE_WAYPOINTS[..]),
        }
    }

    /// Load a path from a text file with one `x, y, z` triple per line.
    pub fn load(path: &Path) -> Result<Self, PathError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PathError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse the waypoint text format.  Commas and whitespace both separate
    /// components; blank lines and `#` comments are skipped.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let mut points = Vec::new();
        for (i, raw) in s.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<f64> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|p| !p.is_empty())
                .map(str::parse::<f64>)
                .collect::<Result<_, _>>()
                .map_err(|_| PathError::Malformed {
                    line: i + 1,
                    text: raw.to_string(),
                })?;
            let &[x, y, z] = parts.as_slice() else {
                return Err(PathError::Malformed {
                    line: i + 1,
                    text: raw.to_string(),
                });
            };
            points.push(Waypoint::new(x, y, z));
        }
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Last valid index (`N - 1`).
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    /// Index of the waypoint closest to `pos`.  O(N) scan; ties resolve to
    /// the lowest index because only a strictly smaller distance replaces
    /// the current best.
    pub fn nearest_index(&self, pos: &Waypoint) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, wp) in self.points.iter().enumerate() {
            let d = wp.distance_sq(pos);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    /// Normalized progress for an index: `index / (N - 1)`.
    pub fn progress_at(&self, index: usize) -> f64 {
        index.min(self.last_index()) as f64 / self.last_index() as f64
    }

    /// Position at a fractional index, interpolating between neighbours.
    pub fn sample(&self, t: f64) -> Waypoint {
        let t = t.clamp(0.0, self.last_index() as f64);
        let lo = t.floor() as usize;
        let hi = (lo + 1).min(self.last_index());
        self.points[lo].lerp(&self.points[hi], t - lo as f64)
    }
}

// ───────────────────────────────────────── asset ─────────────

/// Authored trajectory of the tracked object (86 points).
pub static REFERENCE_WAYPOINTS: [Waypoint; 86] = [
    Waypoint::new(194.01, 636.84, 26.73),
    Waypoint::new(196.75, 639.07, 21.2),
    Waypoint::new(205.4, 646.09, 3.8),
    Waypoint::new(254.21, 685.75, -94.43),
    Waypoint::new(272.95, 700.98, -132.14),
    Waypoint::new(274.6, 701.84, -131.9),
    Waypoint::new(282.52, 701.84, -100.24),
    Waypoint::new(282.99, 701.84, -98.35),
    Waypoint::new(277.98, 717.29, -118.75),
    Waypoint::new(275.61, 724.57, -128.4),
    Waypoint::new(263.53, 761.66, -177.57),
    Waypoint::new(252.82, 791.49, -200.96),
    Waypoint::new(251.26, 794.09, -192.92),
    Waypoint::new(245.03, 804.47, -160.76),
    Waypoint::new(241.92, 809.66, -144.69),
    Waypoint::new(235.69, 820.05, -112.53),
    Waypoint::new(235.52, 820.84, -111.2),
    Waypoint::new(237.69, 820.84, -119.11),
    Waypoint::new(240.3, 820.84, -128.64),
    Waypoint::new(243.62, 820.84, -140.72),
    Waypoint::new(250.4, 820.84, -165.45),
    Waypoint::new(252.87, 820.84, -174.46),
    Waypoint::new(255.0, 820.84, -182.22),
    Waypoint::new(255.6, 820.84, -197.05),
    Waypoint::new(256.0, 820.84, -207.13),
    Waypoint::new(254.38, 820.0, -209.31),
    Waypoint::new(250.91, 818.21, -213.65),
    Waypoint::new(210.38, 797.31, -264.31),
    Waypoint::new(203.31, 794.44, -271.08),
    Waypoint::new(202.53, 794.91, -269.74),
    Waypoint::new(199.95, 796.43, -265.36),
    Waypoint::new(189.8, 802.45, -248.09),
    Waypoint::new(176.21, 810.49, -224.99),
    Waypoint::new(155.1, 822.99, -189.09),
    Waypoint::new(83.33, 865.48, -67.04),
    Waypoint::new(71.36, 872.57, -46.67),
    Waypoint::new(51.2, 884.51, -12.4),
    Waypoint::new(51.98, 885.05, -10.14),
    Waypoint::new(61.15, 887.82, 3.4),
    Waypoint::new(64.54, 888.84, 8.42),
    Waypoint::new(79.46, 893.34, 30.45),
    Waypoint::new(114.88, 904.03, 82.79),
    Waypoint::new(148.0, 914.02, 131.73),
    Waypoint::new(146.7, 912.06, 131.73),
    Waypoint::new(146.13, 911.21, 131.73),
    Waypoint::new(141.83, 911.03, 131.43),
    Waypoint::new(134.75, 911.03, 130.93),
    Waypoint::new(132.15, 911.03, 130.74),
    Waypoint::new(126.18, 906.36, 129.1),
    Waypoint::new(118.17, 899.96, 126.86),
    Waypoint::new(110.85, 894.11, 124.81),
    Waypoint::new(107.29, 891.25, 123.81),
    Waypoint::new(107.01, 891.03, 86.53),
    Waypoint::new(107.01, 891.03, 64.74),
    Waypoint::new(107.01, 891.03, 39.62),
    Waypoint::new(107.01, 891.03, -69.51),
    Waypoint::new(107.01, 891.03, -71.27),
    Waypoint::new(152.42, 858.01, -178.6),
    Waypoint::new(184.72, 834.51, -254.96),
    Waypoint::new(199.29, 823.92, -289.38),
    Waypoint::new(224.75, 802.34, -355.1),
    Waypoint::new(178.67, 792.61, -324.38),
    Waypoint::new(156.59, 787.95, -309.65),
    Waypoint::new(138.01, 784.03, -297.27),
    Waypoint::new(138.01, 766.93, -262.61),
    Waypoint::new(138.01, 696.6, -120.06),
    Waypoint::new(138.01, 648.92, -23.43),
    Waypoint::new(141.82, 633.19, 4.73),
    Waypoint::new(151.78, 628.38, 4.73),
    Waypoint::new(187.28, 611.24, 4.73),
    Waypoint::new(194.57, 607.73, 4.73),
    Waypoint::new(176.58, 607.03, 7.07),
    Waypoint::new(165.58, 607.03, 8.4),
    Waypoint::new(131.85, 607.03, 12.72),
    Waypoint::new(95.28, 607.03, 18.62),
    Waypoint::new(76.01, 607.03, 21.73),
    Waypoint::new(100.62, 624.87, 54.95),
    Waypoint::new(107.47, 629.84, 64.2),
    Waypoint::new(115.3, 635.51, 74.77),
    Waypoint::new(131.9, 675.96, -4.23),
    Waypoint::new(155.94, 736.36, -125.19),
    Waypoint::new(164.65, 758.24, -169.01),
    Waypoint::new(171.15, 774.58, -201.73),
    Waypoint::new(179.39, 795.29, -243.19),
    Waypoint::new(183.86, 806.5, -265.64),
    Waypoint::new(184.4, 807.87, -268.39),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_path_has_86_points() {
        let path = WaypointPath::reference();
        assert_eq!(path.len(), 86);
        assert_eq!(path.last_index(), 85);
    }

    #[test]
    fn nearest_index_finds_exact_waypoint() {
        let path = WaypointPath::reference();
        for i in [0, 10, 42, 85] {
            assert_eq!(path.nearest_index(&REFERENCE_WAYPOINTS[i]), i);
        }
    }

    #[test]
    fn nearest_index_matches_brute_force_minimum() {
        let path = WaypointPath::reference();
        let probe = Waypoint::new(150.0, 800.0, -100.0);
        let got = path.nearest_index(&probe);
        let best = REFERENCE_WAYPOINTS
            .iter()
            .map(|w| w.distance_sq(&probe))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(REFERENCE_WAYPOINTS[got].distance_sq(&probe), best);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let path = WaypointPath::new(vec![
            Waypoint::new(-1.0, 0.0, 0.0),
            Waypoint::new(1.0, 0.0, 0.0),
            Waypoint::new(-1.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(path.nearest_index(&Waypoint::default()), 0);
    }

    #[test]
    fn progress_at_endpoints_and_middle() {
        let path = WaypointPath::reference();
        assert_eq!(path.progress_at(0), 0.0);
        assert_eq!(path.progress_at(85), 1.0);
        assert!((path.progress_at(42) - 0.494).abs() < 1e-3);
    }

    #[test]
    fn sample_interpolates_between_neighbours() {
        let path = WaypointPath::new(vec![
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(10.0, 20.0, -10.0),
        ])
        .unwrap();
        assert_eq!(path.sample(0.5), Waypoint::new(5.0, 10.0, -5.0));
        assert_eq!(path.sample(7.0), Waypoint::new(10.0, 20.0, -10.0));
    }

    #[test]
    fn parse_accepts_commas_whitespace_and_comments() {
        let path = WaypointPath::parse("# start\n1, 2, 3\n\n4 5 6  # end\n").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.sample(0.0), Waypoint::new(1.0, 2.0, 3.0));
        assert_eq!(path.sample(1.0), Waypoint::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn parse_reports_malformed_line_number() {
        let err = WaypointPath::parse("1,2,3\n1,2\n").unwrap_err();
        assert!(matches!(err, PathError::Malformed { line: 2, .. }));
    }

    #[test]
    fn single_point_path_is_rejected() {
        let err = WaypointPath::parse("1,2,3\n").unwrap_err();
        assert!(matches!(err, PathError::TooShort(1)));
    }
}
