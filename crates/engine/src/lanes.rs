//! Lane column hit-testing.

/// Horizontal pixel extent of one lane column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneBounds {
    /// Left edge, inclusive.
    pub left: i32,
    /// Right edge, inclusive.
    pub right: i32,
}

impl LaneBounds {
    /// Creates bounds spanning `left..=right`.
    #[must_use]
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Returns `true` if `x` lies within the column.
    #[must_use]
    pub const fn contains(&self, x: i32) -> bool {
        self.left <= x && x <= self.right
    }
}

/// Resolves the lane under horizontal position `x`.
///
/// Lanes are indexed by their position in `bounds`. When columns share an
/// edge the left-most match wins. Returns `None` when `x` is outside every
/// column or no layout is available; callers treat that as "no change".
///
/// # Examples
///
/// ```
/// use sitegrid_engine::lanes::{LaneBounds, lane_at};
///
/// let bounds = [LaneBounds::new(0, 99), LaneBounds::new(100, 199)];
/// assert_eq!(lane_at(150, &bounds), Some(1));
/// assert_eq!(lane_at(250, &bounds), None);
/// assert_eq!(lane_at(50, &[]), None);
/// ```
#[must_use]
pub fn lane_at(x: i32, bounds: &[LaneBounds]) -> Option<usize> {
    bounds.iter().position(|b| b.contains(x))
}

/// Builds equal-width, edge-to-edge columns starting at `origin`.
///
/// # Examples
///
/// ```
/// use sitegrid_engine::lanes::{LaneBounds, uniform_lanes};
///
/// let lanes = uniform_lanes(100, 100, 2);
/// assert_eq!(lanes, vec![LaneBounds::new(100, 199), LaneBounds::new(200, 299)]);
/// ```
#[must_use]
pub fn uniform_lanes(origin: i32, width: i32, count: usize) -> Vec<LaneBounds> {
    let width = width.max(1);
    (0..count)
        .scan(origin, |left, _| {
            let bounds = LaneBounds::new(*left, left.saturating_add(width - 1));
            *left = left.saturating_add(width);
            Some(bounds)
        })
        .collect()
}
