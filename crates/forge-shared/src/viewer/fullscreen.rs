/// Platform fullscreen API (the browser's `requestFullscreen` / `exitFullscreen`).
///
/// Requests are fire-and-forget; the platform later reports the actual state
/// through [`ViewerInput::FullscreenChanged`](super::ViewerInput::FullscreenChanged).
pub trait FullscreenPlatform {
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    #[error("Fullscreen is not supported")]
    Unsupported,

    #[error("Fullscreen request denied: {0}")]
    Denied(String),
}
