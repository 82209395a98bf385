//! Layout file output
//!
//! The emitted text is valid Python as well as a valid layout file, so it can be
//! pasted straight into plotting code as initialization data.

use std::fmt::Write;

use crate::geometry::{Bounds, FigureLayout};

/// `bounds = [ ... ]` with one `(xll, yll, w, h),  # name` line per panel
pub fn bounds_literal(layout: &FigureLayout) -> String {
    let mut out = String::from("bounds = [\n");
    for (name, panel) in layout.iter() {
        let Bounds { xll, yll, w, h } = panel.bounds();
        let _ = writeln!(
            out,
            "    ({:.3}, {:.3}, {:.3}, {:.3}),  # {}",
            xll, yll, w, h, name
        );
    }
    out.push(']');
    out
}

/// Full layout file: figure size header followed by the bounds literal
pub fn to_source(layout: &FigureLayout) -> String {
    let figsize = layout.figsize();
    format!(
        "figsize = ({}, {})\n{}\n",
        format_number(figsize.width),
        format_number(figsize.height),
        bounds_literal(layout)
    )
}

/// Shortest decimal form, trimmed to at most six fractional digits
fn format_number(value: f64) -> String {
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
