/// Data model, palette compositor and playback state for palcycle.
///
/// This crate contains the scene model, the cycle compositor, the playback
/// clock, the viewer control surface and configuration shared across the
/// palcycle workspace.

pub mod clock;
pub mod color;
pub mod compositor;
pub mod config;
pub mod cycle;
pub mod error;
pub mod palette;
pub mod scene;
pub mod session;
pub mod traits;

pub use clock::PlaybackClock;
pub use color::Rgb;
pub use compositor::Compositor;
pub use config::{FormatConfig, ViewerConfig};
pub use cycle::CycleRange;
pub use error::{ParseError, SceneError, ValidationError};
pub use palette::Palette;
pub use scene::{Scene, SceneDescriptor};
pub use session::{Command, Effect, Navigation, ViewerSession};
