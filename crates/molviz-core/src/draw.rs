//! Draw primitives and styling for molecule diagrams.
//!
//! The renderer produces a [`Scene`]: an ordered list of [`Primitive`]s, each
//! tagged with a [`RenderLayer`]. Strokes are described by
//! [`StrokeDefinition`] and text by [`TextStyle`].

mod layer;
mod primitive;
mod stroke;
mod text;

pub use layer::{RenderLayer, Scene, SvgNode};
pub use primitive::{Primitive, TextRun};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{MIN_FONT_SIZE, TextStyle, measure};
