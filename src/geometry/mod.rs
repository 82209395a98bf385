//! Panel geometry: anchored boxes and the layouts that own them
//!
//! Boxes live in normalized figure coordinates and are edited through an anchor
//! point. A [`FigureLayout`] holds the boxes of one figure by name.

pub mod anchor;
pub mod anchored;
pub mod collection;
pub mod config;
pub mod error;
pub mod grid;
pub mod types;

pub use anchor::{Anchor, IntoAnchor};
pub use anchored::{AnchoredBox, DEGENERATE_EPSILON};
pub use collection::{Edit, EditField, FigureLayout};
pub use config::EditorConfig;
pub use error::GeometryError;
pub use grid::{create_shape, hsubplots, subplot_layout, SubplotSpec};
pub use types::*;
