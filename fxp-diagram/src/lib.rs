//! Bit-field diagrams of fixed-point formats.
//!
//! [`layout`] turns an [`fxp::Fpf`] and [`DiagramOptions`] into positioned,
//! labeled cells; [`render`] serializes them as TikZ commands.

pub mod layout;
pub mod options;
pub mod render;

pub use layout::{layout, BitCell, Diagram, Mark};
pub use options::{CategoryStyles, DiagramOptions, LabelPlacement, NotationMode};
pub use render::{render, render_diagram, render_picture};
