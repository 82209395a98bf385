//! Axes Positioner - place chart panels inside a figure canvas
//!
//! Panels are rectangles in normalized figure coordinates, stored by their
//! lower-left corner and edited through a selectable anchor point. This library
//! provides the anchored box model, named panel layouts, grid and subplot
//! helpers, a layout file format, and SVG previews.
//!
//! # Example
//!
//! ```rust
//! use axes_positioner::{AnchoredBox, Anchor};
//!
//! let mut panel = AnchoredBox::new((0.25, 0.25, 0.5, 0.5), 1.0)
//!     .with_anchor(Anchor::Center)
//!     .unwrap();
//! assert_eq!(panel.x(), 0.5);
//!
//! // Resizing keeps the anchor in place
//! panel.set_w(0.25).unwrap();
//! assert_eq!(panel.x(), 0.5);
//! assert_eq!(panel.bounds().xll, 0.375);
//! ```

pub mod error;
pub mod geometry;
pub mod parser;
pub mod renderer;
pub mod serialize;
pub mod settings;

pub use error::ParseError;
pub use geometry::{
    create_shape, hsubplots, subplot_layout, Anchor, AnchoredBox, Bounds, Edit, EditField,
    EditorConfig, FigureLayout, FigureSize, GeometryError, IntoAnchor, Point, SubplotSpec,
};
pub use parser::{parse, LayoutFile};
pub use renderer::{render_svg, SvgConfig};
pub use serialize::{bounds_literal, to_source};
pub use settings::{Settings, SettingsError};

use thiserror::Error;

/// Errors that can occur while loading a layout file
#[derive(Debug, Error)]
pub enum LoadError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while building or editing the layout
    #[error("layout error: {0}")]
    Geometry(#[from] GeometryError),
}

impl From<Vec<ParseError>> for LoadError {
    fn from(errors: Vec<ParseError>) -> Self {
        LoadError::Parse(errors)
    }
}

impl LoadError {
    /// Format the error, with ariadne source context for parse errors
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            LoadError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            LoadError::Geometry(e) => e.to_string(),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load a layout file with default settings
///
/// # Example
///
/// ```rust
/// use axes_positioner::load;
///
/// let layout = load(r#"
///     figsize = (12, 4)
///     bounds = [
///         (0.080, 0.100, 0.260, 0.800),  # left
///         (0.360, 0.100, 0.260, 0.800),  # right
///     ]
/// "#).unwrap();
///
/// assert_eq!(layout.names().collect::<Vec<_>>(), vec!["left", "right"]);
/// ```
pub fn load(source: &str) -> Result<FigureLayout, LoadError> {
    load_with_settings(source, &Settings::default())
}

/// Load a layout file, using the settings' figure size when the file has none
pub fn load_with_settings(source: &str, settings: &Settings) -> Result<FigureLayout, LoadError> {
    let file = parse(source)?;
    let default_figsize = settings.figsize.unwrap_or_default();
    let layout = file.into_layout(default_figsize, settings.editor.clone())?;
    log::debug!(
        "loaded {} panels on a {} figure",
        layout.len(),
        layout.figsize()
    );
    Ok(layout)
}

/// Load a layout file and render its SVG preview with default settings
///
/// # Example
///
/// ```rust
/// use axes_positioner::render;
///
/// let svg = render("bounds = [(0.1, 0.1, 0.8, 0.8)]").unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render(source: &str) -> Result<String, LoadError> {
    let settings = Settings::default();
    let layout = load_with_settings(source, &settings)?;
    Ok(render_svg(&layout, &settings.svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_default_anchor() {
        let layout = load("bounds = [(0.1, 0.1, 0.8, 0.8)]").unwrap();
        let panel = layout.get("A").unwrap();
        assert_eq!(panel.anchor(), Anchor::Center);
        assert_eq!(layout.figsize(), FigureSize::default());
    }

    #[test]
    fn test_load_uses_settings_figsize() {
        let settings = Settings {
            figsize: Some(FigureSize::new(8.0, 4.0)),
            ..Settings::default()
        };
        let layout = load_with_settings("bounds = [(0, 0, 1, 1)]", &settings).unwrap();
        assert_eq!(layout.figsize(), FigureSize::new(8.0, 4.0));
        assert_eq!(layout.get("A").unwrap().container_aspect(), 2.0);
    }

    #[test]
    fn test_file_figsize_wins_over_settings() {
        let settings = Settings {
            figsize: Some(FigureSize::new(8.0, 4.0)),
            ..Settings::default()
        };
        let layout =
            load_with_settings("figsize = (3, 3)\nbounds = [(0, 0, 1, 1)]", &settings).unwrap();
        assert_eq!(layout.figsize(), FigureSize::new(3.0, 3.0));
    }

    #[test]
    fn test_auto_names_skip_explicit_names() {
        let layout = load(
            r#"
            bounds = [
                (0, 0, 0.5, 0.5)
                (0.5, 0, 0.5, 0.5)  # A
            ]
            "#,
        )
        .unwrap();
        assert_eq!(layout.names().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn test_duplicate_names_in_file() {
        let err = load("bounds = [(0, 0, 1, 1)  # A\n(0, 0, 1, 1)  # A\n]").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Geometry(GeometryError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = load("bounds = [(0, 0, 1, 1)").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        let report = err.format("bounds = [(0, 0, 1, 1)", "layout.txt");
        assert!(report.contains("layout.txt"));
    }

    #[test]
    fn test_non_positive_figsize_rejected() {
        let err = load("figsize = (0, 4)\nbounds = []").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Geometry(GeometryError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn test_overflowing_numbers_rejected() {
        let err = load("figsize = (1e999, 4)\nbounds = [(0, 0, 1, 1)]").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Geometry(GeometryError::InvalidLayout { .. })
        ));

        let err = load("bounds = [(1e999, 0.1, 0.5, 0.5)]").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Geometry(GeometryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_many_unnamed_entries() {
        let tuples = "(0, 0, 0.1, 0.1)\n".repeat(60);
        let layout = load(&format!("bounds = [\n{tuples}]")).unwrap();
        assert_eq!(layout.len(), 60);
        let saved = to_source(&layout);
        assert_eq!(load(&saved).unwrap().len(), 60);
    }

    #[test]
    fn test_render_simple_layout() {
        let svg = render("bounds = [(0.1, 0.1, 0.8, 0.8)  # main\n]").unwrap();
        assert!(svg.contains(r#"id="main""#));
    }
}
