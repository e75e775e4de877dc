use serde::{Deserialize, Serialize};

/// Horizontal speed range (px/s) for patterns moving right
pub const RIGHT_SPEED: (f64, f64) = (100.0, 300.0);
/// Horizontal speed range (px/s) for patterns moving left
pub const LEFT_SPEED: (f64, f64) = (-300.0, -100.0);
/// Vertical speed range (px/s) for patterns moving up; screen y grows downwards
pub const UP_SPEED: (f64, f64) = (-100.0, -50.0);
/// Vertical speed range (px/s) for patterns moving down
pub const DOWN_SPEED: (f64, f64) = (50.0, 100.0);

/// Named motion categories a target can be spawned with
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum MotionPattern {
    Stationary,
    Right,
    Left,
    Up,
    Down,
    #[strum(serialize = "Up-Right")]
    #[serde(rename = "Up-Right")]
    UpRight,
    #[strum(serialize = "Up-Left")]
    #[serde(rename = "Up-Left")]
    UpLeft,
    #[strum(serialize = "Down-Right")]
    #[serde(rename = "Down-Right")]
    DownRight,
    #[strum(serialize = "Down-Left")]
    #[serde(rename = "Down-Left")]
    DownLeft,
}

impl MotionPattern {
    pub const ALL: [MotionPattern; 9] = [
        MotionPattern::Stationary,
        MotionPattern::Right,
        MotionPattern::Left,
        MotionPattern::Up,
        MotionPattern::Down,
        MotionPattern::UpRight,
        MotionPattern::UpLeft,
        MotionPattern::DownRight,
        MotionPattern::DownLeft,
    ];

    /// Sampling range of the x velocity, `None` when the axis is fixed at zero
    pub fn x_range(self) -> Option<(f64, f64)> {
        match self {
            MotionPattern::Right | MotionPattern::UpRight | MotionPattern::DownRight => {
                Some(RIGHT_SPEED)
            }
            MotionPattern::Left | MotionPattern::UpLeft | MotionPattern::DownLeft => {
                Some(LEFT_SPEED)
            }
            MotionPattern::Stationary | MotionPattern::Up | MotionPattern::Down => None,
        }
    }

    /// Sampling range of the y velocity, `None` when the axis is fixed at zero
    pub fn y_range(self) -> Option<(f64, f64)> {
        match self {
            MotionPattern::Up | MotionPattern::UpRight | MotionPattern::UpLeft => Some(UP_SPEED),
            MotionPattern::Down | MotionPattern::DownRight | MotionPattern::DownLeft => {
                Some(DOWN_SPEED)
            }
            MotionPattern::Stationary | MotionPattern::Right | MotionPattern::Left => None,
        }
    }

    pub fn is_stationary(self) -> bool {
        self.x_range().is_none() && self.y_range().is_none()
    }

    /// Name the pattern a velocity belongs to by the signs of its components
    pub fn from_velocity(sx: f64, sy: f64) -> Self {
        use std::cmp::Ordering::*;

        let horizontal = sx.partial_cmp(&0.0).unwrap_or(Equal);
        let vertical = sy.partial_cmp(&0.0).unwrap_or(Equal);
        match (horizontal, vertical) {
            (Equal, Equal) => MotionPattern::Stationary,
            (Greater, Equal) => MotionPattern::Right,
            (Less, Equal) => MotionPattern::Left,
            (Equal, Less) => MotionPattern::Up,
            (Equal, Greater) => MotionPattern::Down,
            (Greater, Less) => MotionPattern::UpRight,
            (Less, Less) => MotionPattern::UpLeft,
            (Greater, Greater) => MotionPattern::DownRight,
            (Less, Greater) => MotionPattern::DownLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_nine_distinct_patterns() {
        let set: HashSet<_> = MotionPattern::ALL.iter().collect();
        assert_eq!(set.len(), 9);
    }

    #[test]
    fn display_names_use_hyphenated_diagonals() {
        let names: Vec<String> = MotionPattern::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "Stationary",
                "Right",
                "Left",
                "Up",
                "Down",
                "Up-Right",
                "Up-Left",
                "Down-Right",
                "Down-Left"
            ]
        );
    }

    #[test]
    fn only_stationary_has_no_moving_axis() {
        for p in MotionPattern::ALL {
            assert_eq!(p.is_stationary(), p == MotionPattern::Stationary);
        }
    }

    #[test]
    fn ranges_follow_screen_convention() {
        assert_eq!(MotionPattern::Right.x_range(), Some((100.0, 300.0)));
        assert_eq!(MotionPattern::Right.y_range(), None);
        assert_eq!(MotionPattern::Up.y_range(), Some((-100.0, -50.0)));
        assert_eq!(MotionPattern::DownLeft.x_range(), Some((-300.0, -100.0)));
        assert_eq!(MotionPattern::DownLeft.y_range(), Some((50.0, 100.0)));
    }

    #[test]
    fn from_velocity_inverts_the_catalog_ranges() {
        for p in MotionPattern::ALL {
            let sx = p.x_range().map_or(0.0, |(lo, hi)| (lo + hi) / 2.0);
            let sy = p.y_range().map_or(0.0, |(lo, hi)| (lo + hi) / 2.0);
            assert_eq!(MotionPattern::from_velocity(sx, sy), p);
        }
        assert_eq!(
            MotionPattern::from_velocity(f64::NAN, 0.0),
            MotionPattern::Stationary
        );
    }

    #[test]
    fn serializes_with_display_names() {
        let json = serde_json::to_string(&MotionPattern::UpLeft).unwrap();
        assert_eq!(json, "\"Up-Left\"");
    }
}
