//! Entrance and exit gate placement.

use ss_core::{CrowdConfig, Point2};

/// Fixed gate positions, generated once per model.
#[derive(Clone, Debug, PartialEq)]
pub struct Gates {
    /// On the left edge, `x = 0`.
    pub entrances: Vec<Point2>,
    /// On the right edge, `x = width`.
    pub exits: Vec<Point2>,
}

impl Gates {
    pub fn new(config: &CrowdConfig) -> Self {
        Self {
            entrances: gate_positions(config.entrance_count, 0.0, config.height),
            exits:     gate_positions(config.exit_count, config.width, config.height),
        }
    }
}

/// `count` gates on the vertical edge at `x`.
///
/// One gate sits at mid-height; several are spread evenly over the middle
/// half of the edge, `height/4 ..= 3·height/4`.
pub fn gate_positions(count: usize, x: f64, height: f64) -> Vec<Point2> {
    match count {
        0 => Vec::new(),
        1 => vec![Point2::new(x, height / 2.0)],
        n => {
            let lo = height / 4.0;
            let hi = 3.0 * height / 4.0;
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| Point2::new(x, lo + step * i as f64)).collect()
        }
    }
}
