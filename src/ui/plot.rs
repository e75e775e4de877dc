use aimtrain::coords::Point;
use ratatui::layout::Rect;

/// Screen pixels to canvas widget coordinates (the widget's y axis points up)
pub fn to_canvas_xy(p: Point, screen_height: f64) -> (f64, f64) {
    (p.x, screen_height - p.y)
}

/// Radius for position markers, proportional to the screen width
pub fn marker_radius(screen_width: f64) -> f64 {
    (screen_width / 120.0).max(1.0)
}

/// Local position of a terminal cell inside `inner`, measured at the cell
/// center. `None` when the cell lies outside.
pub fn local_position(column: u16, row: u16, inner: Rect) -> Option<(f64, f64)> {
    let inside = column >= inner.x
        && column < inner.x.saturating_add(inner.width)
        && row >= inner.y
        && row < inner.y.saturating_add(inner.height);
    if !inside {
        return None;
    }
    Some((
        f64::from(column - inner.x) + 0.5,
        f64::from(row - inner.y) + 0.5,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_y_axis() {
        assert_eq!(to_canvas_xy(Point::new(10.0, 100.0), 1600.0), (10.0, 1500.0));
    }

    #[test]
    fn marker_radius_has_a_floor() {
        assert_eq!(marker_radius(2400.0), 20.0);
        assert_eq!(marker_radius(10.0), 1.0);
    }

    #[test]
    fn local_position_uses_cell_centers() {
        let inner = Rect::new(2, 3, 10, 5);
        assert_eq!(local_position(2, 3, inner), Some((0.5, 0.5)));
        assert_eq!(local_position(11, 7, inner), Some((9.5, 4.5)));
        assert_eq!(local_position(12, 7, inner), None);
        assert_eq!(local_position(1, 4, inner), None);
        assert_eq!(local_position(5, 8, inner), None);
    }
}
