//! Predictive interception: where the pointer should go so that it lands on
//! the target once the reaction delay has elapsed.
//!
//! With a device-count displacement `Δ` scaled by `dpi` into pixels, the
//! landing error is
//!
//! ```text
//! E(Δx, Δy) = (cx + dpi·Δx − Tx)² + (cy + dpi·Δy − Ty)²
//! ```
//!
//! where `T` is the target extrapolated over the reaction time. Both terms
//! are independent convex quadratics, so the zero of the gradient is the
//! global minimum: `Δ = (T − c) / dpi`. The y component is negated for
//! display so that positive means "move up".

use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::error::{AimError, Result};
use crate::target::Target;

/// Physical pointer displacement in inches; `dy > 0` means up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

/// Eight compass sectors, 45° wide, centered on the compass points
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum Direction {
    Right,
    #[strum(serialize = "Up-Right")]
    #[serde(rename = "Up-Right")]
    UpRight,
    Up,
    #[strum(serialize = "Up-Left")]
    #[serde(rename = "Up-Left")]
    UpLeft,
    Left,
    #[strum(serialize = "Down-Left")]
    #[serde(rename = "Down-Left")]
    DownLeft,
    Down,
    #[strum(serialize = "Down-Right")]
    #[serde(rename = "Down-Right")]
    DownRight,
}

impl Direction {
    /// Classify an angle in degrees. Sectors are half-open `[low, high)`;
    /// `Left` wraps around as `>= 157.5 or < -157.5`.
    pub fn from_angle(deg: f64) -> Self {
        if (-22.5..22.5).contains(&deg) {
            Direction::Right
        } else if (22.5..67.5).contains(&deg) {
            Direction::UpRight
        } else if (67.5..112.5).contains(&deg) {
            Direction::Up
        } else if (112.5..157.5).contains(&deg) {
            Direction::UpLeft
        } else if deg >= 157.5 || deg < -157.5 {
            Direction::Left
        } else if (-157.5..-112.5).contains(&deg) {
            Direction::DownLeft
        } else if (-112.5..-67.5).contains(&deg) {
            Direction::Down
        } else {
            Direction::DownRight
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interception {
    pub target_final: Point,
    pub displacement: Displacement,
    pub distance_in: f64,
    pub angle_deg: f64,
    pub direction: Direction,
}

/// Compute the least-squares pointer correction for `target` seen from
/// `cursor`. `dpi` must be non-zero.
pub fn compute(cursor: Point, target: &Target, reaction_secs: f64, dpi: u32) -> Result<Interception> {
    if dpi == 0 {
        return Err(AimError::InvalidConfig("dpi must be positive".to_string()));
    }
    let k = f64::from(dpi);

    let target_final = target.position_after(reaction_secs);

    let dx = (target_final.x - cursor.x) / k;
    let dy = -((target_final.y - cursor.y) / k);

    let distance_in = dx.hypot(dy);
    let angle_deg = normalize_angle(dy.atan2(dx).to_degrees());

    Ok(Interception {
        target_final,
        displacement: Displacement { dx, dy },
        distance_in,
        angle_deg,
        direction: Direction::from_angle(angle_deg),
    })
}

/// Fold into `(-180, 180]` and drop the sign of a negative zero.
fn normalize_angle(deg: f64) -> f64 {
    if deg <= -180.0 {
        deg + 360.0
    } else {
        deg + 0.0
    }
}
