//! Configuration for SVG previews

/// Configuration options for SVG preview output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Width of the drawn canvas in pixels; the height follows the figure aspect
    pub canvas_width: f64,

    /// Padding around the canvas
    pub padding: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "axp-" for "axp-panel")
    pub class_prefix: Option<String>,

    /// Fill of the figure background
    pub canvas_fill: String,

    /// Fill of each panel placeholder
    pub panel_fill: String,

    /// Outline of each panel placeholder
    pub panel_stroke: String,

    /// Color of the anchor marker
    pub anchor_color: String,

    /// Radius of the anchor marker in pixels
    pub anchor_radius: f64,

    /// Font size of panel labels in pixels
    pub font_size: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            padding: 10.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("axp-".to_string()),
            canvas_fill: "#ffffff".to_string(),
            panel_fill: "#ffffff".to_string(),
            panel_stroke: "#333333".to_string(),
            anchor_color: "#8080e6".to_string(),
            anchor_radius: 8.0,
            font_size: 14.0,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas width in pixels
    pub fn with_canvas_width(mut self, width: f64) -> Self {
        self.canvas_width = width;
        self
    }

    /// Set the padding around the canvas
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the anchor marker color
    pub fn with_anchor_color(mut self, color: impl Into<String>) -> Self {
        self.anchor_color = color.into();
        self
    }
}
