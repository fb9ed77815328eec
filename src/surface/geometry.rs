//! Viewport geometry derived from the hosting container's pixel box.

use serde::{Deserialize, Serialize};

use crate::runtime::Size;

/// Screen position in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Drawing area with a constant pixel margin on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl ViewportGeometry {
    /// Measure the container; `None` until it has a measurable box
    pub fn measure(container: Option<Size>, margin: f64) -> Option<Self> {
        let size = container.filter(Size::is_measurable)?;
        Some(Self {
            width: size.width,
            height: size.height,
            margin,
        })
    }

    /// Usable plotting width, `W - 2·margin` floored at zero
    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// Usable plotting height, `H - 2·margin` floored at zero
    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.margin).max(0.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.margin, self.margin)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.margin, self.height - self.margin)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.width - self.margin, self.height - self.margin)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Horizontal position of a strike fraction in [0, 1]
    pub fn x_at(&self, strike_fraction: f64) -> f64 {
        self.margin + strike_fraction * self.plot_width()
    }

    /// Vertical position of a vol; `ceiling` maps to the top of the plot
    pub fn y_at(&self, vol: f64, ceiling: f64) -> f64 {
        self.height - self.margin - (vol / ceiling) * self.plot_height()
    }

    /// Screen position of a (strike fraction, vol) pair
    pub fn project(&self, strike_fraction: f64, vol: f64, ceiling: f64) -> Point {
        Point::new(self.x_at(strike_fraction), self.y_at(vol, ceiling))
    }

    /// Evenly spaced guide lines: `divisions + 1` per direction
    pub fn grid_lines(&self, divisions: usize) -> Vec<(Point, Point)> {
        let n = divisions.max(1) as f64;
        let mut lines = Vec::with_capacity(divisions.saturating_add(1).saturating_mul(2));

        for i in 0..=divisions {
            let y = self.margin + (i as f64 / n) * self.plot_height();
            lines.push((Point::new(self.margin, y), Point::new(self.width - self.margin, y)));
        }
        for i in 0..=divisions {
            let x = self.margin + (i as f64 / n) * self.plot_width();
            lines.push((Point::new(x, self.margin), Point::new(x, self.height - self.margin)));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_requires_box() {
        assert!(ViewportGeometry::measure(None, 40.0).is_none());
        assert!(ViewportGeometry::measure(Some(Size::new(0.0, 300.0)), 40.0).is_none());

        let geo = ViewportGeometry::measure(Some(Size::new(800.0, 400.0)), 40.0).unwrap();
        assert_eq!(geo.plot_width(), 720.0);
        assert_eq!(geo.plot_height(), 320.0);
    }

    #[test]
    fn test_projection_bounds() {
        let geo = ViewportGeometry::measure(Some(Size::new(500.0, 300.0)), 40.0).unwrap();

        let origin = geo.project(0.0, 0.0, 0.30);
        assert_eq!(origin, geo.bottom_left());

        let top_right = geo.project(1.0, 0.30, 0.30);
        assert!((top_right.x - 460.0).abs() < 1e-9);
        assert!((top_right.y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_lines_inside_margin() {
        let geo = ViewportGeometry::measure(Some(Size::new(600.0, 400.0)), 40.0).unwrap();
        let lines = geo.grid_lines(5);

        assert_eq!(lines.len(), 12);
        for (a, b) in lines {
            for p in [a, b] {
                assert!(p.x >= 40.0 - 1e-9 && p.x <= 560.0 + 1e-9);
                assert!(p.y >= 40.0 - 1e-9 && p.y <= 360.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_small_container_floors_plot_area() {
        let geo = ViewportGeometry::measure(Some(Size::new(50.0, 60.0)), 40.0).unwrap();
        assert_eq!(geo.plot_width(), 0.0);
        assert_eq!(geo.plot_height(), 0.0);
    }
}
