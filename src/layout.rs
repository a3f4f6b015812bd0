use cgmath::{Point2, Vector2};
use super::error::ConfigError;
use super::stroke_transform::{GridSpec, Point};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Vector2<f64>,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            origin: Point2::new(x, y),
            size: Vector2::new(w, h),
        }
    }

    /// Half-open: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }

    pub fn translate(&self, by: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + by,
            size: self.size,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub label: &'static str,
    pub rect: Rect,
}

/// Canvas split into labelled panels:
///
/// ```text
/// | DRAW    | NOISE 1 | STROKE 1 |
/// |         | NOISE 2 | GRID 2   |
/// ```
#[derive(Clone, Debug)]
pub struct Layout {
    pub capture: Region,
    pub noise_reflected: Region,
    pub stroke_reflected: Region,
    pub noise_independent: Region,
    pub grid_independent: Region,
    panel: f64,
    label_height: f64,
}

impl Layout {
    pub fn new(panel: f64, label_height: f64) -> Self {
        let cell = |col: f64, row: f64| {
            Rect::new(
                col * panel,
                label_height + row * (panel + label_height),
                panel,
                panel,
            )
        };
        Self {
            capture: Region {
                label: "DRAW",
                rect: cell(0.0, 0.0),
            },
            noise_reflected: Region {
                label: "NOISE 1",
                rect: cell(1.0, 0.0),
            },
            stroke_reflected: Region {
                label: "STROKE 1",
                rect: cell(2.0, 0.0),
            },
            noise_independent: Region {
                label: "NOISE 2",
                rect: cell(1.0, 1.0),
            },
            grid_independent: Region {
                label: "GRID 2",
                rect: cell(2.0, 1.0),
            },
            panel,
            label_height,
        }
    }

    pub fn regions(&self) -> [&Region; 5] {
        [
            &self.capture,
            &self.noise_reflected,
            &self.stroke_reflected,
            &self.noise_independent,
            &self.grid_independent,
        ]
    }

    pub fn canvas_size(&self) -> (usize, usize) {
        let w = 3.0 * self.panel;
        let h = 2.0 * (self.panel + self.label_height);
        (w.ceil() as usize, h.ceil() as usize)
    }

    /// Dot grid covering `region`.
    pub fn grid_for(&self, region: &Region, gap: f64) -> Result<GridSpec, ConfigError> {
        GridSpec::new(region.rect.origin, region.rect.size, gap)
    }

    /// Vector moving data computed in `from` onto the same spot in `to`.
    pub fn shift(from: &Region, to: &Region) -> Vector2<f64> {
        to.rect.origin - from.rect.origin
    }

    /// Where the label of `region` is written.
    pub fn label_anchor(&self, region: &Region) -> Point {
        let r = region.rect.origin;
        Point2::new(r.x + 6.0, r.y - self.label_height + 0.5 * (self.label_height - 7.0))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(200.0, 20.0)
    }
}
