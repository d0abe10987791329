pub mod animation;
pub mod pipeline;
pub mod scheduler;
pub mod surface;
pub mod text;

#[cfg(test)]
mod testing;

pub use pipeline::{RenderSettings, TimelineRenderer};
pub use scheduler::FrameLoop;
pub use surface::{ImageProvider, Surface};
