//! Configuration for layout construction and editing

use super::anchor::Anchor;

/// Configuration options for building and editing figure layouts
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Anchor applied to every panel when a layout is loaded
    pub anchor: Anchor,

    /// Whether panels start with their aspect ratio locked
    pub lock_aspect: bool,

    /// Outer margin around a generated grid
    pub margin: f64,

    /// Margin inside each grid cell
    pub box_margin: f64,

    /// Size (width, height) of a panel added by pointing at the canvas
    pub new_panel_size: (f64, f64),

    /// Offset from the pointed location to the new panel's lower-left corner
    pub new_panel_offset: (f64, f64),

    /// Number of names (`A`, `B`, ...) tried when adding a panel by pointing
    pub max_auto_names: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::Center,
            lock_aspect: false,
            margin: 0.05,
            box_margin: 0.05,
            new_panel_size: (0.4, 0.4),
            new_panel_offset: (0.3, 0.3),
            max_auto_names: 50,
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor applied on load
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set whether panels start aspect-locked
    pub fn with_lock_aspect(mut self, locked: bool) -> Self {
        self.lock_aspect = locked;
        self
    }

    /// Set the outer grid margin
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the per-cell grid margin
    pub fn with_box_margin(mut self, margin: f64) -> Self {
        self.box_margin = margin;
        self
    }

    /// Set the size of panels added by pointing
    pub fn with_new_panel_size(mut self, width: f64, height: f64) -> Self {
        self.new_panel_size = (width, height);
        self
    }
}
