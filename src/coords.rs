use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, AimError, Result};

/// Upper bound on the logical canvas width in pixels
pub const MAX_CANVAS_WIDTH: f64 = 1600.0;
/// Logical canvas height as a fraction of its width
pub const CANVAS_ASPECT: f64 = 0.6;

/// A position in logical screen-pixel space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Logical canvas dimensions and the scale factors from canvas pixels to
/// screen pixels for a given screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub width: f64,
    pub height: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl CanvasGeometry {
    pub fn for_screen(screen_width: f64, screen_height: f64) -> Result<Self> {
        let screen_width = ensure_finite("screen_width", screen_width)?;
        let screen_height = ensure_finite("screen_height", screen_height)?;
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return Err(AimError::InvalidConfig(format!(
                "screen dimensions must be positive, got {screen_width}x{screen_height}"
            )));
        }

        let width = (screen_width / 2.0).min(MAX_CANVAS_WIDTH);
        let height = width * CANVAS_ASPECT;

        Ok(Self {
            width,
            height,
            x_scale: screen_width / width,
            y_scale: screen_height / height,
        })
    }

    /// Map a sample taken on a surface of `local_width` x `local_height`
    /// onto screen pixels. A surface of exactly the logical canvas size
    /// maps with the bare scale factors.
    pub fn map(
        &self,
        local_x: f64,
        local_y: f64,
        local_width: f64,
        local_height: f64,
    ) -> Result<Point> {
        let local_x = ensure_finite("local_x", local_x)?;
        let local_y = ensure_finite("local_y", local_y)?;
        let local_width = ensure_finite("local_width", local_width)?;
        let local_height = ensure_finite("local_height", local_height)?;
        if local_width <= 0.0 || local_height <= 0.0 {
            return Err(AimError::InvalidConfig(format!(
                "surface dimensions must be positive, got {local_width}x{local_height}"
            )));
        }

        let canvas_x = local_x * (self.width / local_width);
        let canvas_y = local_y * (self.height / local_height);

        Ok(Point {
            x: canvas_x * self.x_scale,
            y: canvas_y * self.y_scale,
        })
    }
}

/// Convert a raw local-space sample into logical screen pixels.
pub fn map(
    local_x: f64,
    local_y: f64,
    local_width: f64,
    local_height: f64,
    screen_width: f64,
    screen_height: f64,
) -> Result<Point> {
    CanvasGeometry::for_screen(screen_width, screen_height)?.map(
        local_x,
        local_y,
        local_width,
        local_height,
    )
}
