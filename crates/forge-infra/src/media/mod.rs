//! Media storage for admin uploads.

mod local;

pub use local::{LocalMediaStorage, MediaConfig};
