use super::fullscreen::{FullscreenError, FullscreenPlatform};
use super::input::{InputOutcome, ViewerInput, ViewerKey, WheelInput};
use super::transform::{PAN_STEP, Point, ViewerTransform, ZOOM_STEP};

/// Pointer travel (px) below which a press/release counts as a click.
const CLICK_TOLERANCE: f64 = 3.0;

const EASED_TRANSITION: &str = "transform 0.2s ease-out";

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    /// Pointer position minus offset, fixed for the whole drag.
    anchor: Point,
    origin: Point,
    moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchState {
    distance: f64,
    midpoint: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Drag(DragState),
    Pinch(PinchState),
}

/// Inline style for the image layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub transform: String,
    pub transform_origin: &'static str,
    /// `None` while a gesture is in progress so the layer follows the pointer immediately.
    pub transition: Option<&'static str>,
    pub cursor: &'static str,
}

/// View state of one diagram viewer instance.
#[derive(Debug, Clone)]
pub struct PanZoomViewer {
    transform: ViewerTransform,
    width: f64,
    height: f64,
    gesture: Gesture,
    hovered: bool,
    fullscreen: bool,
}

impl PanZoomViewer {
    /// A viewer for a container of the given size, at the identity transform.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            transform: ViewerTransform::IDENTITY,
            width,
            height,
            gesture: Gesture::Idle,
            hovered: false,
            fullscreen: false,
        }
    }

    pub fn transform(&self) -> ViewerTransform {
        self.transform
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// A drag or pinch is in progress.
    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_at(ZOOM_STEP, self.center());
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_at(1.0 / ZOOM_STEP, self.center());
    }

    pub fn reset(&mut self) {
        self.transform.reset();
    }

    /// Ask the platform to enter or leave fullscreen.
    ///
    /// The flag itself only changes when the platform reports back with
    /// [`ViewerInput::FullscreenChanged`].
    pub fn toggle_fullscreen(
        &mut self,
        platform: &mut dyn FullscreenPlatform,
    ) -> Result<(), FullscreenError> {
        if self.fullscreen {
            platform.exit_fullscreen()
        } else {
            platform.request_fullscreen()
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        let active = self.is_gesture_active();
        RenderStyle {
            transform: self.transform.css(),
            transform_origin: "0 0",
            transition: if active { None } else { Some(EASED_TRANSITION) },
            cursor: if active { "grabbing" } else { "grab" },
        }
    }

    pub fn handle(&mut self, input: ViewerInput) -> InputOutcome {
        match input {
            ViewerInput::Wheel(wheel) => self.on_wheel(wheel),
            ViewerInput::PointerDown(p) => {
                self.begin_drag(p);
                InputOutcome::Handled
            }
            ViewerInput::PointerMove(p) => self.on_pointer_move(p),
            ViewerInput::PointerUp(_) => self.end_gesture(),
            ViewerInput::PointerEnter => {
                self.hovered = true;
                InputOutcome::PassThrough
            }
            ViewerInput::PointerLeave => {
                self.hovered = false;
                self.gesture = Gesture::Idle;
                InputOutcome::PassThrough
            }
            ViewerInput::TouchStart(touches) => self.on_touch_start(&touches),
            ViewerInput::TouchMove(touches) => self.on_touch_move(&touches),
            ViewerInput::TouchEnd(remaining) => self.on_touch_end(&remaining),
            ViewerInput::Key(key) => self.on_key(key),
            ViewerInput::ZoomInButton => {
                self.zoom_in();
                InputOutcome::Handled
            }
            ViewerInput::ZoomOutButton => {
                self.zoom_out();
                InputOutcome::Handled
            }
            ViewerInput::ResetButton => {
                self.reset();
                InputOutcome::Handled
            }
            ViewerInput::Resize { width, height } => {
                self.width = width;
                self.height = height;
                InputOutcome::PassThrough
            }
            ViewerInput::FullscreenChanged(fullscreen) => {
                self.fullscreen = fullscreen;
                InputOutcome::PassThrough
            }
        }
    }

    fn on_wheel(&mut self, wheel: WheelInput) -> InputOutcome {
        if wheel.delta_y == 0.0 {
            return InputOutcome::PassThrough;
        }
        let zoom_in = wheel.delta_y < 0.0;

        // At rest the page keeps scrolling; only an explicit modifier zoom is captured.
        if self.transform.is_identity() && (!zoom_in || !wheel.zoom_modifier) {
            return InputOutcome::PassThrough;
        }

        let factor = if zoom_in { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.transform.zoom_at(factor, wheel.position);
        InputOutcome::Handled
    }

    fn begin_drag(&mut self, p: Point) {
        self.gesture = Gesture::Drag(DragState {
            anchor: p - self.transform.offset(),
            origin: p,
            moved: false,
        });
    }

    fn drag_to(&mut self, p: Point) {
        if let Gesture::Drag(drag) = &mut self.gesture {
            if p.distance(drag.origin) > CLICK_TOLERANCE {
                drag.moved = true;
            }
            self.transform.set_offset(p - drag.anchor);
        }
    }

    fn on_pointer_move(&mut self, p: Point) -> InputOutcome {
        match self.gesture {
            Gesture::Drag(_) => {
                self.drag_to(p);
                InputOutcome::Handled
            }
            _ => InputOutcome::PassThrough,
        }
    }

    fn end_gesture(&mut self) -> InputOutcome {
        let outcome = match self.gesture {
            Gesture::Drag(drag) if !drag.moved => InputOutcome::Click(drag.origin),
            Gesture::Idle => InputOutcome::PassThrough,
            _ => InputOutcome::Handled,
        };
        self.gesture = Gesture::Idle;
        outcome
    }

    fn begin_pinch(&mut self, a: Point, b: Point) {
        self.gesture = Gesture::Pinch(PinchState {
            distance: a.distance(b),
            midpoint: a.midpoint(b),
        });
    }

    fn pinch_to(&mut self, a: Point, b: Point) {
        let Gesture::Pinch(prev) = self.gesture else {
            return;
        };
        let distance = a.distance(b);
        let midpoint = a.midpoint(b);

        if prev.distance > 0.0 {
            let moved = midpoint - prev.midpoint;
            self.transform.pan_by(moved.x, moved.y);
            self.transform.zoom_at(distance / prev.distance, midpoint);
        }

        self.gesture = Gesture::Pinch(PinchState { distance, midpoint });
    }

    fn on_touch_start(&mut self, touches: &[Point]) -> InputOutcome {
        match touches {
            [] => InputOutcome::PassThrough,
            [single] => {
                self.begin_drag(*single);
                InputOutcome::Handled
            }
            [a, b, ..] => {
                self.begin_pinch(*a, *b);
                InputOutcome::Handled
            }
        }
    }

    fn on_touch_move(&mut self, touches: &[Point]) -> InputOutcome {
        match (self.gesture, touches) {
            (Gesture::Pinch(_), [a, b, ..]) => self.pinch_to(*a, *b),
            (Gesture::Drag(_), [single]) => self.drag_to(*single),
            // A second finger landed mid-drag.
            (Gesture::Drag(_), [a, b, ..]) => self.begin_pinch(*a, *b),
            (Gesture::Pinch(_), [single]) => self.begin_drag(*single),
            _ => return InputOutcome::PassThrough,
        }
        InputOutcome::Handled
    }

    fn on_touch_end(&mut self, remaining: &[Point]) -> InputOutcome {
        match remaining {
            [] => self.end_gesture(),
            [single] => {
                // Lifting one finger of a pinch continues as a drag from the other.
                self.begin_drag(*single);
                if let Gesture::Drag(drag) = &mut self.gesture {
                    drag.moved = true;
                }
                InputOutcome::Handled
            }
            [a, b, ..] => {
                self.begin_pinch(*a, *b);
                InputOutcome::Handled
            }
        }
    }

    fn on_key(&mut self, key: ViewerKey) -> InputOutcome {
        if !self.hovered {
            return InputOutcome::PassThrough;
        }
        match key {
            ViewerKey::ZoomIn => self.zoom_in(),
            ViewerKey::ZoomOut => self.zoom_out(),
            ViewerKey::Reset => self.reset(),
            ViewerKey::ArrowUp => self.transform.pan_by(0.0, PAN_STEP),
            ViewerKey::ArrowDown => self.transform.pan_by(0.0, -PAN_STEP),
            ViewerKey::ArrowLeft => self.transform.pan_by(PAN_STEP, 0.0),
            ViewerKey::ArrowRight => self.transform.pan_by(-PAN_STEP, 0.0),
            ViewerKey::Other => return InputOutcome::PassThrough,
        }
        InputOutcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::transform::{MAX_SCALE, ViewerTransform};

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    fn wheel(delta_y: f64, x: f64, y: f64, zoom_modifier: bool) -> ViewerInput {
        ViewerInput::Wheel(WheelInput {
            delta_y,
            position: Point::new(x, y),
            zoom_modifier,
        })
    }

    #[derive(Default)]
    struct FakeFullscreen {
        requests: usize,
        exits: usize,
    }

    impl FullscreenPlatform for FakeFullscreen {
        fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
            self.requests += 1;
            Ok(())
        }

        fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
            self.exits += 1;
            Ok(())
        }
    }

    #[test]
    fn test_drag_pans_relative_to_anchor() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.transform.set_offset(Point::new(10.0, 10.0));

        viewer.handle(ViewerInput::PointerDown(Point::new(50.0, 50.0)));
        viewer.handle(ViewerInput::PointerMove(Point::new(80.0, 70.0)));
        let outcome = viewer.handle(ViewerInput::PointerUp(Point::new(80.0, 70.0)));

        assert_eq!(outcome, InputOutcome::Handled);
        let t = viewer.transform();
        assert_close(t.offset_x, 40.0);
        assert_close(t.offset_y, 30.0);
        assert_close(t.scale, 1.0);
        assert!(!viewer.is_gesture_active());
    }

    #[test]
    fn test_press_without_movement_is_click() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::PointerDown(Point::new(5.0, 5.0)));
        viewer.handle(ViewerInput::PointerMove(Point::new(6.0, 6.0)));
        let outcome = viewer.handle(ViewerInput::PointerUp(Point::new(6.0, 6.0)));
        assert_eq!(outcome, InputOutcome::Click(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_pointer_move_without_press_is_ignored() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        let outcome = viewer.handle(ViewerInput::PointerMove(Point::new(80.0, 70.0)));
        assert_eq!(outcome, InputOutcome::PassThrough);
        assert!(viewer.transform().is_identity());
    }

    #[test]
    fn test_wheel_at_identity_lets_page_scroll() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);

        assert_eq!(
            viewer.handle(wheel(120.0, 100.0, 100.0, false)),
            InputOutcome::PassThrough
        );
        assert_eq!(
            viewer.handle(wheel(120.0, 100.0, 100.0, true)),
            InputOutcome::PassThrough
        );
        assert_eq!(
            viewer.handle(wheel(-120.0, 100.0, 100.0, false)),
            InputOutcome::PassThrough
        );
        assert!(viewer.transform().is_identity());
    }

    #[test]
    fn test_modifier_wheel_zooms_at_cursor() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        let outcome = viewer.handle(wheel(-120.0, 100.0, 100.0, true));
        assert_eq!(outcome, InputOutcome::Handled);

        let t = viewer.transform();
        assert_close(t.scale, ZOOM_STEP);
        assert_close(t.offset_x, 100.0 - ZOOM_STEP * 100.0);
    }

    #[test]
    fn test_wheel_captured_once_zoomed() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::ZoomInButton);

        assert_eq!(
            viewer.handle(wheel(-120.0, 10.0, 10.0, false)),
            InputOutcome::Handled
        );
        assert_eq!(
            viewer.handle(wheel(120.0, 10.0, 10.0, false)),
            InputOutcome::Handled
        );
        assert_close(viewer.transform().scale, ZOOM_STEP);
    }

    #[test]
    fn test_wheel_captured_after_pan_only() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::PointerDown(Point::new(0.0, 0.0)));
        viewer.handle(ViewerInput::PointerMove(Point::new(20.0, 0.0)));
        viewer.handle(ViewerInput::PointerUp(Point::new(20.0, 0.0)));

        assert_eq!(
            viewer.handle(wheel(120.0, 10.0, 10.0, false)),
            InputOutcome::Handled
        );
    }

    #[test]
    fn test_buttons_zoom_around_center() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::ZoomInButton);
        let t = viewer.transform();
        assert_close(t.offset_x, 400.0 - ZOOM_STEP * 400.0);
        assert_close(t.offset_y, 300.0 - ZOOM_STEP * 300.0);

        viewer.handle(ViewerInput::ZoomOutButton);
        let t = viewer.transform();
        assert_close(t.scale, 1.0);
        assert_close(t.offset_x, 0.0);
        assert_close(t.offset_y, 0.0);
    }

    #[test]
    fn test_repeated_zoom_stays_in_bounds() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        for _ in 0..20 {
            viewer.handle(ViewerInput::ZoomInButton);
        }
        assert_close(viewer.transform().scale, MAX_SCALE);
    }

    #[test]
    fn test_reset_button() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::ZoomInButton);
        viewer.handle(ViewerInput::ResetButton);
        assert_eq!(viewer.transform(), ViewerTransform::IDENTITY);
        viewer.handle(ViewerInput::ResetButton);
        assert_eq!(viewer.transform(), ViewerTransform::IDENTITY);
    }

    #[test]
    fn test_keyboard_requires_hover() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        assert_eq!(
            viewer.handle(ViewerInput::Key(ViewerKey::ZoomIn)),
            InputOutcome::PassThrough
        );
        assert!(viewer.transform().is_identity());

        viewer.handle(ViewerInput::PointerEnter);
        assert_eq!(
            viewer.handle(ViewerInput::Key(ViewerKey::from_key("="))),
            InputOutcome::Handled
        );
        assert_close(viewer.transform().scale, ZOOM_STEP);

        viewer.handle(ViewerInput::Key(ViewerKey::from_key("0")));
        assert!(viewer.transform().is_identity());
    }

    #[test]
    fn test_arrow_keys_pan_by_step() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::PointerEnter);

        viewer.handle(ViewerInput::Key(ViewerKey::ArrowLeft));
        viewer.handle(ViewerInput::Key(ViewerKey::ArrowUp));
        viewer.handle(ViewerInput::Key(ViewerKey::ArrowUp));
        let t = viewer.transform();
        assert_close(t.offset_x, PAN_STEP);
        assert_close(t.offset_y, 2.0 * PAN_STEP);

        viewer.handle(ViewerInput::Key(ViewerKey::ArrowRight));
        viewer.handle(ViewerInput::Key(ViewerKey::ArrowDown));
        let t = viewer.transform();
        assert_close(t.offset_x, 0.0);
        assert_close(t.offset_y, PAN_STEP);

        assert_eq!(
            viewer.handle(ViewerInput::Key(ViewerKey::from_key("a"))),
            InputOutcome::PassThrough
        );
    }

    #[test]
    fn test_pinch_zooms_around_midpoint() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::TouchStart(vec![
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
        ]));
        // Fingers spread symmetrically: distance doubles, midpoint stays at (150, 100).
        viewer.handle(ViewerInput::TouchMove(vec![
            Point::new(50.0, 100.0),
            Point::new(250.0, 100.0),
        ]));

        let t = viewer.transform();
        assert_close(t.scale, 2.0);
        assert_close(t.offset_x, -150.0);
        assert_close(t.offset_y, -100.0);
    }

    #[test]
    fn test_pinch_follows_midpoint_movement() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::TouchStart(vec![
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
        ]));
        // Same distance, both fingers moved 30px right and 10px down.
        viewer.handle(ViewerInput::TouchMove(vec![
            Point::new(130.0, 110.0),
            Point::new(230.0, 110.0),
        ]));

        let t = viewer.transform();
        assert_close(t.scale, 1.0);
        assert_close(t.offset_x, 30.0);
        assert_close(t.offset_y, 10.0);
    }

    #[test]
    fn test_pinch_with_zero_distance_is_skipped() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::TouchStart(vec![
            Point::new(100.0, 100.0),
            Point::new(100.0, 100.0),
        ]));
        viewer.handle(ViewerInput::TouchMove(vec![
            Point::new(90.0, 100.0),
            Point::new(110.0, 100.0),
        ]));
        assert!(viewer.transform().is_identity());

        // The next frame has a usable baseline again.
        viewer.handle(ViewerInput::TouchMove(vec![
            Point::new(80.0, 100.0),
            Point::new(120.0, 100.0),
        ]));
        assert_close(viewer.transform().scale, 2.0);
    }

    #[test]
    fn test_single_finger_drags_and_lifting_ends_gesture() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::TouchStart(vec![Point::new(10.0, 10.0)]));
        viewer.handle(ViewerInput::TouchMove(vec![Point::new(40.0, 25.0)]));
        assert!(viewer.render_style().transition.is_none());

        let outcome = viewer.handle(ViewerInput::TouchEnd(vec![]));
        assert_eq!(outcome, InputOutcome::Handled);
        assert!(!viewer.is_gesture_active());

        let t = viewer.transform();
        assert_close(t.offset_x, 30.0);
        assert_close(t.offset_y, 15.0);
    }

    #[test]
    fn test_render_style_transitions_only_when_idle() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        let idle = viewer.render_style();
        assert_eq!(idle.transform, "translate(0px, 0px) scale(1)");
        assert_eq!(idle.transform_origin, "0 0");
        assert_eq!(idle.transition, Some(EASED_TRANSITION));

        viewer.handle(ViewerInput::PointerDown(Point::new(1.0, 1.0)));
        let dragging = viewer.render_style();
        assert_eq!(dragging.transition, None);
        assert_eq!(dragging.cursor, "grabbing");
    }

    #[test]
    fn test_fullscreen_toggle_goes_through_platform() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        let mut platform = FakeFullscreen::default();

        viewer.toggle_fullscreen(&mut platform).unwrap();
        assert_eq!(platform.requests, 1);
        assert!(!viewer.is_fullscreen());

        viewer.handle(ViewerInput::FullscreenChanged(true));
        assert!(viewer.is_fullscreen());

        viewer.toggle_fullscreen(&mut platform).unwrap();
        assert_eq!(platform.exits, 1);

        // Leaving with Escape is reported by the platform as well.
        viewer.handle(ViewerInput::FullscreenChanged(false));
        assert!(!viewer.is_fullscreen());
    }

    #[test]
    fn test_leaving_container_cancels_drag() {
        let mut viewer = PanZoomViewer::new(800.0, 600.0);
        viewer.handle(ViewerInput::PointerEnter);
        viewer.handle(ViewerInput::PointerDown(Point::new(0.0, 0.0)));
        viewer.handle(ViewerInput::PointerLeave);
        assert!(!viewer.is_gesture_active());
        assert!(!viewer.is_hovered());
    }
}
