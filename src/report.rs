use serde::Serialize;

use crate::config::Configuration;
use crate::coords::Point;
use crate::intercept::{Direction, Interception};
use crate::pattern::MotionPattern;
use crate::target::{Target, Velocity};

/// Least-squares model behind the displayed correction
pub const MODEL_LINES: [&str; 5] = [
    "E(Δx, Δy) = [cx + kΔx − (Tx0 + sx·r)]² + [cy + kΔy − (Ty0 + sy·r)]²",
    "∂E/∂Δx = 2k[cx + kΔx − (Tx0 + sx·r)] = 0",
    "∂E/∂Δy = 2k[cy + kΔy − (Ty0 + sy·r)] = 0",
    "Δx = (Tx0 + sx·r − cx) / k",
    "Δy = (Ty0 + sy·r − cy) / k",
];

/// Everything the display shows for one (cursor, target) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub cursor: Point,
    pub target_initial: Point,
    pub target_final: Point,
    pub pattern: MotionPattern,
    pub speed: Velocity,
    pub reaction_ms: u32,
    pub dpi: u32,
    pub dx_in: f64,
    pub dy_in: f64,
    pub distance_in: f64,
    pub angle_deg: f64,
    pub direction: Direction,
}

impl Report {
    pub fn new(
        config: &Configuration,
        cursor: Point,
        target: &Target,
        interception: &Interception,
    ) -> Self {
        Self {
            cursor,
            target_initial: target.initial_position,
            target_final: interception.target_final,
            pattern: target.pattern,
            speed: target.velocity,
            reaction_ms: config.reaction_ms().round() as u32,
            dpi: config.dpi,
            dx_in: interception.displacement.dx,
            dy_in: interception.displacement.dy,
            distance_in: interception.distance_in,
            angle_deg: interception.angle_deg,
            direction: interception.direction,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Move your mouse {:.3} inches at {}° ({})",
            self.distance_in,
            format_angle(self.angle_deg),
            self.direction
        )
    }

    /// Label/value pairs in display order
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Movement Pattern", self.pattern.to_string()),
            ("Target Speed", format_speed(self.speed)),
            ("Reaction Time", format!("{} ms", self.reaction_ms)),
            ("DPI (k)", self.dpi.to_string()),
            ("Δx (inches)", format_inches(self.dx_in)),
            ("Δy (inches)", format_inches(self.dy_in)),
            ("Total Distance", format!("{:.3} inches", self.distance_in)),
            ("Movement Angle", format!("{}°", format_angle(self.angle_deg))),
            ("Direction", self.direction.to_string()),
        ]
    }

    pub fn position_details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Crosshair Start (cx, cy)", format_px(self.cursor)),
            ("Target Initial (Tx0, Ty0)", format_px(self.target_initial)),
            ("Target Final", format_px(self.target_final)),
        ]
    }
}

pub fn format_px(p: Point) -> String {
    format!("({:.1}, {:.1}) px", p.x, p.y)
}

pub fn format_speed(v: Velocity) -> String {
    format!("({:.1}, {:.1}) px/s", v.sx, v.sy)
}

pub fn format_inches(v: f64) -> String {
    format!("{:.3}\"", v + 0.0)
}

/// One decimal, without a "-0.0" for angles that round to zero
pub fn format_angle(deg: f64) -> String {
    let rounded = (deg * 10.0).round() / 10.0;
    format!("{:.1}", rounded + 0.0)
}
