//! Settings files for the editor and preview
//!
//! Settings are read from TOML. Every key is optional; missing keys keep their
//! defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Anchor, EditorConfig, FigureSize, GeometryError};
use crate::renderer::SvgConfig;

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid settings: {0}")]
    Invalid(#[from] GeometryError),
}

/// Resolved settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Figure size used when a layout file does not declare one
    pub figsize: Option<FigureSize>,
    pub editor: EditorConfig,
    pub svg: SvgConfig,
}

/// TOML structure for deserializing settings
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    figure: Option<TomlFigure>,
    editor: Option<TomlEditor>,
    preview: Option<TomlPreview>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlFigure {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEditor {
    anchor: Option<String>,
    lock_aspect: Option<bool>,
    margin: Option<f64>,
    box_margin: Option<f64>,
    new_panel_size: Option<[f64; 2]>,
    new_panel_offset: Option<[f64; 2]>,
    max_auto_names: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPreview {
    canvas_width: Option<f64>,
    padding: Option<f64>,
    standalone: Option<bool>,
    pretty_print: Option<bool>,
    class_prefix: Option<String>,
    canvas_fill: Option<String>,
    panel_fill: Option<String>,
    panel_stroke: Option<String>,
    anchor_color: Option<String>,
    anchor_radius: Option<f64>,
    font_size: Option<f64>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let mut settings = Settings::default();

        if let Some(figure) = parsed.figure {
            let figsize = FigureSize::new(figure.width, figure.height);
            if !figsize.is_valid() {
                return Err(GeometryError::invalid_layout(format!(
                    "figure size {figsize} must be finite and positive"
                ))
                .into());
            }
            settings.figsize = Some(figsize);
        }

        if let Some(editor) = parsed.editor {
            let config = &mut settings.editor;
            if let Some(anchor) = editor.anchor {
                config.anchor = anchor.parse::<Anchor>()?;
            }
            if let Some(locked) = editor.lock_aspect {
                config.lock_aspect = locked;
            }
            if let Some(margin) = editor.margin {
                config.margin = margin;
            }
            if let Some(margin) = editor.box_margin {
                config.box_margin = margin;
            }
            if let Some([w, h]) = editor.new_panel_size {
                config.new_panel_size = (w, h);
            }
            if let Some([dx, dy]) = editor.new_panel_offset {
                config.new_panel_offset = (dx, dy);
            }
            if let Some(max) = editor.max_auto_names {
                config.max_auto_names = max;
            }
        }

        if let Some(preview) = parsed.preview {
            let svg = &mut settings.svg;
            if let Some(width) = preview.canvas_width {
                svg.canvas_width = width;
            }
            if let Some(padding) = preview.padding {
                svg.padding = padding;
            }
            if let Some(standalone) = preview.standalone {
                svg.standalone = standalone;
            }
            if let Some(pretty) = preview.pretty_print {
                svg.pretty_print = pretty;
            }
            if let Some(prefix) = preview.class_prefix {
                svg.class_prefix = if prefix.is_empty() { None } else { Some(prefix) };
            }
            if let Some(fill) = preview.canvas_fill {
                svg.canvas_fill = fill;
            }
            if let Some(fill) = preview.panel_fill {
                svg.panel_fill = fill;
            }
            if let Some(stroke) = preview.panel_stroke {
                svg.panel_stroke = stroke;
            }
            if let Some(color) = preview.anchor_color {
                svg.anchor_color = color;
            }
            if let Some(radius) = preview.anchor_radius {
                svg.anchor_radius = radius;
            }
            if let Some(size) = preview.font_size {
                svg.font_size = size;
            }
        }

        Ok(settings)
    }
}
