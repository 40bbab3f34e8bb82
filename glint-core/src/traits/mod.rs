//! Drawing abstraction traits
//!
//! These traits define the interface between the eye model and whatever
//! surface it is painted on.

pub mod canvas;

pub use canvas::{Canvas, MAX_POLYGON_VERTICES};
