//! SVG renderer for figure layout previews
//!
//! This module takes a FigureLayout and produces an SVG string showing every
//! panel as a labelled placeholder with its anchor point marked.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::render_svg;
