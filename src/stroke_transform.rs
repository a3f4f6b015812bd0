use cgmath::{Point2, Vector2};
use super::error::ConfigError;
use super::noise_field::{displacement, NoiseField, ScaleFactors};
use super::offsets::NoiseOffset;

pub type Point = Point2<f64>;

/// Points captured from one continuous pointer drag, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn snapshot(&self) -> Vec<Point> {
        self.points.clone()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Largest number of sample centers a grid may hold.
pub const MAX_CELLS: usize = 1 << 24;

// Relative slack when counting cells, so 0.3 / 0.1 still holds three.
const CELL_EPSILON: f64 = 1e-9;

/// Rectangular sampling grid with a fixed step between sample centers.
///
/// Centers are inset by half a step, so a 40x40 area with a step of 20 holds
/// four centers at 10 and 30 on each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridSpec {
    origin: Point,
    extent: Vector2<f64>,
    gap: f64,
    nx: usize,
    ny: usize,
}

impl GridSpec {
    pub fn new(origin: Point, extent: Vector2<f64>, gap: f64) -> Result<Self, ConfigError> {
        if !(gap.is_finite() && gap > 0.0) {
            return Err(ConfigError::Gap(gap));
        }
        let finite = origin.x.is_finite() && origin.y.is_finite();
        if !(finite && extent.x.is_finite() && extent.y.is_finite())
            || extent.x < 0.0
            || extent.y < 0.0
        {
            return Err(ConfigError::Extent([extent.x, extent.y]));
        }
        let too_many = ConfigError::TooManyCells([extent.x, extent.y], gap);
        let nx = cells_along(extent.x, gap).ok_or_else(|| too_many.clone())?;
        let ny = cells_along(extent.y, gap).ok_or_else(|| too_many.clone())?;
        match nx.checked_mul(ny) {
            Some(n) if n <= MAX_CELLS => {}
            _ => return Err(too_many),
        }
        Ok(Self {
            origin,
            extent,
            gap,
            nx,
            ny,
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn extent(&self) -> Vector2<f64> {
        self.extent
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Number of cells along x and y.
    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Sample centers, x outer and y inner.
    pub fn centers(&self) -> GridCenters {
        GridCenters {
            spec: *self,
            index: 0,
        }
    }

    fn center(&self, i: usize, j: usize) -> Point {
        let half = 0.5 * self.gap;
        Point2::new(
            self.origin.x + half + i as f64 * self.gap,
            self.origin.y + half + j as f64 * self.gap,
        )
    }
}

/// Whole cells of `gap` fitting in `extent`, or `None` past `MAX_CELLS`.
fn cells_along(extent: f64, gap: f64) -> Option<usize> {
    let n = extent / gap;
    let n = (n + n * CELL_EPSILON).floor();
    if n <= MAX_CELLS as f64 {
        Some(n as usize)
    } else {
        None
    }
}

#[derive(Clone, Debug)]
pub struct GridCenters {
    spec: GridSpec,
    index: usize,
}

impl Iterator for GridCenters {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let ny = self.spec.ny;
        if self.index >= self.spec.cell_count() {
            return None;
        }
        let (i, j) = (self.index / ny, self.index % ny);
        self.index += 1;
        Some(self.spec.center(i, j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.spec.cell_count().saturating_sub(self.index);
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridCenters {}

/// One dot of the noise grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridSample {
    pub center: Point,
    pub diameter: f64,
}

/// Lazy dot grid; clone it to walk the same samples again.
#[derive(Clone)]
pub struct GridSamples<'a> {
    field: &'a NoiseField,
    centers: GridCenters,
    offset: NoiseOffset,
    scale: ScaleFactors,
    gap: f64,
}

impl<'a> Iterator for GridSamples<'a> {
    type Item = GridSample;

    fn next(&mut self) -> Option<GridSample> {
        let center = self.centers.next()?;
        let n = self.field.sample_at(center, self.offset, self.scale);
        Some(GridSample {
            center,
            diameter: n * self.gap,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.centers.size_hint()
    }
}

impl<'a> ExactSizeIterator for GridSamples<'a> {}

/// Dot diameters over `spec`: `noise((x + offset) * sx, (y + offset) * sy) * gap`.
pub fn render_grid<'a>(
    field: &'a NoiseField,
    spec: &GridSpec,
    offset: NoiseOffset,
    scale: ScaleFactors,
) -> GridSamples<'a> {
    GridSamples {
        field,
        centers: spec.centers(),
        offset,
        scale,
        gap: spec.gap,
    }
}

/// Moves each point diagonally by the displacement of its own noise sample.
/// Output has the same length and order as `points`.
pub fn transform_stroke(
    field: &NoiseField,
    points: &[Point],
    offset: NoiseOffset,
    scale: ScaleFactors,
) -> Vec<Point> {
    points
        .iter()
        .map(|&p| {
            let d = displacement(field.sample_at(p, offset, scale));
            p + Vector2::new(d, d)
        })
        .collect()
}
