//! Regular panel arrangements: placeholder grids and shared-axis subplots

use log::debug;

use super::collection::FigureLayout;
use super::config::EditorConfig;
use super::error::GeometryError;
use super::types::{Bounds, FigureSize};

/// Build an `rows × cols` grid of placeholder panels
///
/// Cells are laid out bottom-up and named row by row. Each cell is inset by the
/// configured box margin, and the grid as a whole by the outer margin.
pub fn create_shape(
    rows: usize,
    cols: usize,
    figsize: FigureSize,
    config: EditorConfig,
) -> Result<FigureLayout, GeometryError> {
    if rows == 0 || cols == 0 {
        return Err(GeometryError::invalid_layout(format!(
            "grid shape {rows}x{cols} has no cells"
        )));
    }

    let margin = config.margin;
    let box_margin = config.box_margin;
    let bw = (1.0 - 2.0 * margin) / cols as f64;
    let bh = (1.0 - 2.0 * margin) / rows as f64;

    let mut bounds = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            bounds.push(Bounds::new(
                margin + j as f64 * bw + box_margin,
                margin + i as f64 * bh + box_margin,
                bw - 2.0 * box_margin,
                bh - 2.0 * box_margin,
            ));
        }
    }
    debug!("created {rows}x{cols} grid on a {figsize} figure");

    FigureLayout::from_bounds(figsize, bounds, config)
}

/// Parameters for [`hsubplots`]
#[derive(Debug, Clone, PartialEq)]
pub struct SubplotSpec {
    /// Figure width; the height is derived
    pub fig_width: f64,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Horizontal gap between panels
    pub hpad: f64,
    /// Vertical gap between panels
    pub vpad: f64,
    /// Region holding all panels as `(x0, y0, x1, y1)`
    pub region: (f64, f64, f64, f64),
    /// Displayed aspect ratio of each panel
    pub ax_aspect: f64,
}

impl SubplotSpec {
    pub fn new(fig_width: f64, rows: usize, cols: usize) -> Self {
        Self {
            fig_width,
            rows,
            cols,
            hpad: 0.0,
            vpad: 0.0,
            region: (0.0, 0.0, 1.0, 1.0),
            ax_aspect: 1.0,
        }
    }

    pub fn with_padding(mut self, hpad: f64, vpad: f64) -> Self {
        self.hpad = hpad;
        self.vpad = vpad;
        self
    }

    pub fn with_region(mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        self.region = (x0, y0, x1, y1);
        self
    }

    pub fn with_ax_aspect(mut self, aspect: f64) -> Self {
        self.ax_aspect = aspect;
        self
    }
}

/// Compute shared-axis subplot positions for a figure of fixed width
///
/// Returns the figure size and the panel rectangles as rows of columns, with
/// row 0 being the top row.
pub fn hsubplots(spec: &SubplotSpec) -> Result<(FigureSize, Vec<Vec<Bounds>>), GeometryError> {
    let SubplotSpec {
        fig_width,
        rows,
        cols,
        hpad,
        vpad,
        region: (x0, y0, x1, y1),
        ax_aspect,
    } = *spec;

    if rows == 0 || cols == 0 {
        return Err(GeometryError::invalid_layout(format!(
            "subplot shape {rows}x{cols} has no cells"
        )));
    }

    let ax_width = (x1 - x0 - hpad * (cols - 1) as f64) / cols as f64;
    let ax_height = (y1 - y0 - vpad * (rows - 1) as f64) / rows as f64;
    if ax_width <= 0.0 || ax_height <= 0.0 {
        return Err(GeometryError::invalid_layout(format!(
            "padding leaves no room for panels ({ax_width:.3} x {ax_height:.3})"
        )));
    }

    let fig_height = fig_width * (ax_width / ax_height) * ax_aspect;
    if !fig_height.is_finite() || fig_height <= 0.0 {
        return Err(GeometryError::invalid_layout(format!(
            "derived figure height {fig_height} is not positive"
        )));
    }

    let mut positions: Vec<Vec<Bounds>> = (0..rows)
        .map(|i| {
            (0..cols)
                .map(|j| {
                    Bounds::new(
                        x0 + j as f64 * ax_width + j as f64 * hpad,
                        y0 + i as f64 * ax_height + i as f64 * vpad,
                        ax_width,
                        ax_height,
                    )
                })
                .collect()
        })
        .collect();
    positions.reverse();

    Ok((FigureSize::new(fig_width, fig_height), positions))
}

/// Run [`hsubplots`] and collect the panels into a named layout, top row first
pub fn subplot_layout(
    spec: &SubplotSpec,
    config: EditorConfig,
) -> Result<FigureLayout, GeometryError> {
    let (figsize, positions) = hsubplots(spec)?;
    FigureLayout::from_bounds(figsize, positions.into_iter().flatten(), config)
}
