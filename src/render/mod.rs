//! Animated plot rendering.
//!
//! Each time block becomes one line-plot frame; all frames share the axis
//! limits computed in `bounds`.

pub mod animation;
pub mod bounds;
pub mod frame;

pub use animation::create_animation;
