use cgmath::Vector2;
use super::canvas::{FrameBuffer, BLACK, WHITE};
use super::layout::{Layout, Region};
use super::offsets::FieldId;
use super::session::{FieldLayer, SketchFrame};
use super::stroke_transform::{Point, Stroke};

pub const PANEL: u32 = 0x00_20_20_20;
pub const INK: u32 = WHITE;
pub const DOT: u32 = 0x00_E0_E0_E0;

/// Draws one full frame. Layers are computed in the coordinates of their
/// sampling region and moved into their display panels here.
pub fn paint(fb: &mut FrameBuffer, layout: &Layout, stroke: &Stroke, frame: Option<&SketchFrame>) {
    fb.clear(BLACK);
    for region in layout.regions() {
        let r = region.rect;
        fb.fill_rect(r.origin, r.size.x, r.size.y, PANEL);
        fb.draw_text(layout.label_anchor(region), region.label, INK);
    }

    fb.draw_polyline(stroke.points(), INK);

    let Some(frame) = frame else { return };
    if let Some(layer) = frame.layer(FieldId::REFLECTED) {
        paint_layer(
            fb,
            layer,
            Layout::shift(&layout.capture, &layout.noise_reflected),
            Layout::shift(&layout.capture, &layout.stroke_reflected),
            &layout.stroke_reflected,
        );
    }
    if let Some(layer) = frame.layer(FieldId::INDEPENDENT) {
        // the independent grid is sampled over its own dot panel
        paint_layer(
            fb,
            layer,
            Vector2::new(0.0, 0.0),
            Layout::shift(&layout.noise_independent, &layout.grid_independent),
            &layout.grid_independent,
        );
    }
}

fn paint_layer(
    fb: &mut FrameBuffer,
    layer: &FieldLayer,
    dots_by: Vector2<f64>,
    line_by: Vector2<f64>,
    line_panel: &Region,
) {
    for dot in &layer.dots {
        fb.fill_circle(dot.center + dots_by, dot.diameter, DOT);
    }
    let line: Vec<Point> = layer.line.iter().map(|&p| p + line_by).collect();
    // displaced points may leave the panel by up to the displacement range
    let clip = line_panel.rect;
    for pair in line.windows(2) {
        if clip.contains(pair[0]) || clip.contains(pair[1]) {
            fb.draw_line(pair[0], pair[1], INK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::NoiseField;
    use crate::offsets::{NoiseOffset, OffsetRegistry};
    use crate::session::{FieldPlan, PointSource, Session};
    use cgmath::Point2;

    fn pixel(fb: &FrameBuffer, p: Point) -> u32 {
        fb.get(p.x as usize, p.y as usize).unwrap()
    }

    #[test]
    fn panels_are_drawn_without_frame() {
        let layout = Layout::default();
        let (w, h) = layout.canvas_size();
        let mut fb = FrameBuffer::new(w, h);
        paint(&mut fb, &layout, &Stroke::new(), None);
        let c = layout.capture.rect;
        assert_eq!(pixel(&fb, c.origin + c.size * 0.5), PANEL);
    }

    #[test]
    fn stroke_is_drawn_in_capture_panel() {
        let layout = Layout::default();
        let (w, h) = layout.canvas_size();
        let mut fb = FrameBuffer::new(w, h);
        let mut stroke = Stroke::new();
        stroke.push(Point2::new(20.0, 60.0));
        stroke.push(Point2::new(120.0, 60.0));
        paint(&mut fb, &layout, &stroke, None);
        assert_eq!(pixel(&fb, Point2::new(70.0, 60.0)), INK);
    }

    #[test]
    fn dots_land_in_their_panels() {
        let layout = Layout::default();
        let field = NoiseField::default();
        let plans = vec![
            FieldPlan {
                field: FieldId::REFLECTED,
                grid: layout.grid_for(&layout.capture, 10.0).unwrap(),
                source: PointSource::Stroke,
            },
            FieldPlan {
                field: FieldId::INDEPENDENT,
                grid: layout.grid_for(&layout.noise_independent, 10.0).unwrap(),
                source: PointSource::GridCenters,
            },
        ];
        let mut offsets = OffsetRegistry::seeded(8);
        offsets.register(FieldId::REFLECTED, NoiseOffset::new(12.0));
        let session = Session::new(field, Default::default(), layout.capture.rect, plans, offsets);
        let frame = session.recompute();

        let (w, h) = layout.canvas_size();
        let mut fb = FrameBuffer::new(w, h);
        paint(&mut fb, &layout, session.stroke(), Some(&frame));

        let shift = Layout::shift(&layout.capture, &layout.noise_reflected);
        let big = frame
            .layer(FieldId::REFLECTED)
            .unwrap()
            .dots
            .iter()
            .find(|d| d.diameter > 4.0)
            .expect("some dot is visible");
        assert_eq!(pixel(&fb, big.center + shift), DOT);
        // nothing is painted over the source panel
        assert_eq!(pixel(&fb, big.center), PANEL);
    }
}
