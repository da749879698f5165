//! Rendering: the scenes, per-frame drawing and the loop that drives them.

pub mod driver;
pub mod frame;
pub mod scene;

pub use driver::*;
pub use frame::*;
pub use scene::*;
