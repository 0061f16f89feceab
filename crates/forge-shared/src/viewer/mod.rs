//! Pan/zoom engine for the production-line diagram viewer.
//!
//! The engine owns a translate + uniform scale transform and updates it from
//! wheel, mouse drag, touch pinch, keyboard and toolbar input. It has no
//! knowledge of the DOM: the host feeds it [`ViewerInput`] values, applies the
//! returned [`InputOutcome`] (prevent default or not) and writes
//! [`RenderStyle`] onto the image layer.

mod engine;
mod fullscreen;
mod input;
mod transform;

pub use engine::{PanZoomViewer, RenderStyle};
pub use fullscreen::{FullscreenError, FullscreenPlatform};
pub use input::{InputOutcome, ViewerInput, ViewerKey, WheelInput};
pub use transform::{MAX_SCALE, MIN_SCALE, PAN_STEP, Point, ViewerTransform, ZOOM_STEP};
