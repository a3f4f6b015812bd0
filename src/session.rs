use std::time::{Duration, Instant};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use super::layout::Rect;
use super::noise_field::{NoiseField, ScaleFactors};
use super::offsets::{FieldId, NoiseOffset, OffsetRegistry};
use super::stroke_transform::{render_grid, transform_stroke, GridSample, GridSpec, Point, Stroke};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
}

/// Which points a field displaces into its line drawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointSource {
    Stroke,
    GridCenters,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldPlan {
    pub field: FieldId,
    pub grid: GridSpec,
    pub source: PointSource,
}

/// Everything computed for one noise field, in sampling coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldLayer {
    pub field: FieldId,
    pub offset: NoiseOffset,
    pub dots: Vec<GridSample>,
    pub line: Vec<Point>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SketchFrame {
    pub layers: Vec<FieldLayer>,
}

impl SketchFrame {
    pub fn layer(&self, field: FieldId) -> Option<&FieldLayer> {
        self.layers.iter().find(|l| l.field == field)
    }
}

/// Owns the stroke and the offsets of one interactive sketch.
pub struct Session<R: Rng = StdRng> {
    state: CaptureState,
    stroke: Stroke,
    field: NoiseField,
    scale: ScaleFactors,
    capture: Rect,
    plans: Vec<FieldPlan>,
    offsets: OffsetRegistry<R>,
}

impl<R: Rng> Session<R> {
    /// Every plan's field is registered in `offsets` (keeping its current
    /// value as the initial default).
    pub fn new(
        field: NoiseField,
        scale: ScaleFactors,
        capture: Rect,
        plans: Vec<FieldPlan>,
        mut offsets: OffsetRegistry<R>,
    ) -> Self {
        for plan in &plans {
            let initial = offsets.current(plan.field);
            offsets.register(plan.field, initial);
        }
        Self {
            state: CaptureState::Idle,
            stroke: Stroke::new(),
            field,
            scale,
            capture,
            plans,
            offsets,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn offsets(&self) -> &OffsetRegistry<R> {
        &self.offsets
    }

    pub fn plans(&self) -> &[FieldPlan] {
        &self.plans
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.state == CaptureState::Idle && self.capture.contains(p) {
            debug!("capture started at ({:.1}, {:.1})", p.x, p.y);
            self.state = CaptureState::Capturing;
        }
    }

    pub fn pointer_move(&mut self, p: Point) {
        if self.state == CaptureState::Capturing && self.capture.contains(p) {
            self.stroke.push(p);
        }
    }

    /// Ends a capture: reseeds every field once, then samples each field's
    /// grid and displaces its points. Returns `None` if nothing was being
    /// captured.
    pub fn pointer_up(&mut self) -> Option<SketchFrame> {
        if self.state != CaptureState::Capturing {
            return None;
        }
        self.state = CaptureState::Idle;
        debug!("capture ended with {} points", self.stroke.len());
        self.offsets.reseed_all();
        Some(self.recompute())
    }

    /// Host press. Only presses inside the capture region count towards a
    /// double click; one completing it resets and returns the redrawn frame,
    /// any other inside press starts a capture.
    pub fn press(
        &mut self,
        p: Point,
        now: Instant,
        clicks: &mut ClickTimer,
    ) -> Option<SketchFrame> {
        if !self.capture.contains(p) {
            return None;
        }
        if clicks.click(now) {
            self.reset();
            return Some(self.recompute());
        }
        self.pointer_down(p);
        None
    }

    /// Clears the stroke. Offsets are kept.
    pub fn reset(&mut self) {
        debug!("reset, dropping {} points", self.stroke.len());
        self.stroke.clear();
        self.state = CaptureState::Idle;
    }

    /// Samples every field with its current offset, without reseeding.
    pub fn recompute(&self) -> SketchFrame {
        let layers = self
            .plans
            .iter()
            .map(|plan| {
                let offset = self.offsets.current(plan.field);
                let dots: Vec<GridSample> =
                    render_grid(&self.field, &plan.grid, offset, self.scale).collect();
                let line = match plan.source {
                    PointSource::Stroke => {
                        transform_stroke(&self.field, self.stroke.points(), offset, self.scale)
                    }
                    PointSource::GridCenters => {
                        let centers: Vec<Point> = plan.grid.centers().collect();
                        transform_stroke(&self.field, &centers, offset, self.scale)
                    }
                };
                FieldLayer {
                    field: plan.field,
                    offset,
                    dots,
                    line,
                }
            })
            .collect();
        SketchFrame { layers }
    }
}

/// Double-click detector for the reset gesture.
#[derive(Clone, Debug)]
pub struct ClickTimer {
    threshold: Duration,
    last: Option<Instant>,
}

impl Default for ClickTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl ClickTimer {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    /// Records a press at `now`; true when it completes a double click.
    pub fn click(&mut self, now: Instant) -> bool {
        match self.last {
            Some(prev) if now.saturating_duration_since(prev) <= self.threshold => {
                self.last = None;
                true
            }
            _ => {
                self.last = Some(now);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point2, Vector2};

    fn session() -> Session {
        let capture = Rect::new(0.0, 0.0, 100.0, 100.0);
        let origin = Point2::new(0.0, 0.0);
        let reflected = GridSpec::new(origin, Vector2::new(100.0, 100.0), 10.0).unwrap();
        let independent = GridSpec::new(origin, Vector2::new(40.0, 40.0), 20.0).unwrap();
        let plans = vec![
            FieldPlan {
                field: FieldId::REFLECTED,
                grid: reflected,
                source: PointSource::Stroke,
            },
            FieldPlan {
                field: FieldId::INDEPENDENT,
                grid: independent,
                source: PointSource::GridCenters,
            },
        ];
        Session::new(
            NoiseField::default(),
            ScaleFactors::default(),
            capture,
            plans,
            OffsetRegistry::seeded(3),
        )
    }

    #[test]
    fn down_outside_capture_is_ignored() {
        let mut s = session();
        s.pointer_down(Point2::new(150.0, 10.0));
        assert_eq!(s.state(), CaptureState::Idle);
        s.pointer_move(Point2::new(10.0, 10.0));
        assert!(s.stroke().is_empty());
        assert!(s.pointer_up().is_none());
    }

    #[test]
    fn moves_append_only_inside_capture() {
        let mut s = session();
        s.pointer_down(Point2::new(5.0, 5.0));
        assert_eq!(s.state(), CaptureState::Capturing);
        s.pointer_move(Point2::new(10.0, 10.0));
        s.pointer_move(Point2::new(300.0, 10.0));
        s.pointer_move(Point2::new(20.0, 12.0));
        assert_eq!(s.stroke().points(), &[Point2::new(10.0, 10.0), Point2::new(20.0, 12.0)]);
    }

    #[test]
    fn pointer_up_reseeds_each_field_once() {
        let mut s = session();
        let before: Vec<_> = s.plans().iter().map(|p| s.offsets().current(p.field)).collect();
        s.pointer_down(Point2::new(5.0, 5.0));
        s.pointer_move(Point2::new(10.0, 10.0));
        let frame = s.pointer_up().unwrap();
        assert_eq!(s.state(), CaptureState::Idle);
        assert_eq!(frame.layers.len(), 2);
        for (layer, old) in frame.layers.iter().zip(before) {
            assert_ne!(layer.offset, old);
            assert_eq!(layer.offset, s.offsets().current(layer.field));
        }
    }

    #[test]
    fn layers_follow_their_sources() {
        let mut s = session();
        s.pointer_down(Point2::new(5.0, 5.0));
        for i in 0..7 {
            s.pointer_move(Point2::new(10.0 + i as f64, 20.0));
        }
        let frame = s.pointer_up().unwrap();
        let reflected = frame.layer(FieldId::REFLECTED).unwrap();
        assert_eq!(reflected.dots.len(), 100);
        assert_eq!(reflected.line.len(), 7);
        let independent = frame.layer(FieldId::INDEPENDENT).unwrap();
        assert_eq!(independent.dots.len(), 4);
        assert_eq!(independent.line.len(), 4);
    }

    #[test]
    fn recompute_without_reseed_is_stable() {
        let mut s = session();
        s.pointer_down(Point2::new(5.0, 5.0));
        s.pointer_move(Point2::new(50.0, 50.0));
        let frame = s.pointer_up().unwrap();
        assert_eq!(s.recompute(), frame);
    }

    #[test]
    fn reset_clears_stroke_and_keeps_offsets() {
        let mut s = session();
        s.pointer_down(Point2::new(5.0, 5.0));
        s.pointer_move(Point2::new(50.0, 50.0));
        s.pointer_up();
        let offsets: Vec<_> = s.plans().iter().map(|p| s.offsets().current(p.field)).collect();
        s.reset();
        assert!(s.stroke().is_empty());
        let after: Vec<_> = s.plans().iter().map(|p| s.offsets().current(p.field)).collect();
        assert_eq!(offsets, after);
        let frame = s.recompute();
        assert!(frame.layer(FieldId::REFLECTED).unwrap().line.is_empty());
    }

    #[test]
    fn reset_during_capture_ends_it() {
        let mut s = session();
        s.pointer_down(Point2::new(5.0, 5.0));
        s.reset();
        assert_eq!(s.state(), CaptureState::Idle);
        assert!(s.pointer_up().is_none());
    }

    #[test]
    fn double_click_inside_capture_resets() {
        let mut s = session();
        let mut clicks = ClickTimer::default();
        let t0 = Instant::now();
        assert!(s.press(Point2::new(5.0, 5.0), t0, &mut clicks).is_none());
        s.pointer_move(Point2::new(20.0, 20.0));
        s.pointer_up();
        let frame = s.press(Point2::new(6.0, 6.0), t0 + Duration::from_millis(200), &mut clicks);
        assert!(frame.is_some());
        assert!(s.stroke().is_empty());
        assert_eq!(s.state(), CaptureState::Idle);
    }

    #[test]
    fn press_outside_capture_does_not_arm_reset() {
        let mut s = session();
        let mut clicks = ClickTimer::default();
        let t0 = Instant::now();
        assert!(s.press(Point2::new(150.0, 5.0), t0, &mut clicks).is_none());
        let frame = s.press(Point2::new(5.0, 5.0), t0 + Duration::from_millis(100), &mut clicks);
        assert!(frame.is_none());
        assert_eq!(s.state(), CaptureState::Capturing);
        s.pointer_move(Point2::new(20.0, 20.0));
        assert_eq!(s.stroke().len(), 1);
    }

    #[test]
    fn double_click_within_threshold() {
        let mut t = ClickTimer::default();
        let t0 = Instant::now();
        assert!(!t.click(t0));
        assert!(t.click(t0 + Duration::from_millis(250)));
        // the pair was consumed
        assert!(!t.click(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn slow_clicks_are_single() {
        let mut t = ClickTimer::new(Duration::from_millis(300));
        let t0 = Instant::now();
        assert!(!t.click(t0));
        assert!(!t.click(t0 + Duration::from_millis(301)));
        assert!(t.click(t0 + Duration::from_millis(500)));
    }
}
