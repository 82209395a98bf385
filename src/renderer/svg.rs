//! SVG previews of figure layouts

use crate::geometry::{Bounds, FigureLayout, FigureSize, Point};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, class: &str, x: f64, y: f64, w: f64, h: f64, styles: &str) {
        let prefix = self.prefix();
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"{}<rect{} class="{}{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            prefix,
            class,
            fmt_px(x),
            fmt_px(y),
            fmt_px(w),
            fmt_px(h),
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, class: &str, cx: f64, cy: f64, r: f64, styles: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<circle class="{}{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            prefix,
            class,
            fmt_px(cx),
            fmt_px(cy),
            fmt_px(r),
            styles
        ));
    }

    /// Add a centered text element
    pub fn add_text(&mut self, class: &str, x: f64, y: f64, content: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="{}">{}</text>"#,
            self.indent_str(),
            prefix,
            class,
            fmt_px(x),
            fmt_px(y),
            self.config.font_size,
            escape_xml(content)
        ));
    }

    /// Start a group element
    pub fn start_group(&mut self, id: &str, class: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<g id="{}" class="{}{}">"#,
            self.indent_str(),
            escape_xml(id),
            prefix,
            class
        ));
        self.indent += 1;
    }

    /// End a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1).max(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a canvas of the given pixel size
    pub fn build(self, width: f64, height: f64) -> String {
        let padding = self.config.padding;
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            fmt_px(width + 2.0 * padding),
            fmt_px(height + 2.0 * padding),
            fmt_px(-padding),
            fmt_px(-padding),
            fmt_px(width + 2.0 * padding),
            fmt_px(height + 2.0 * padding)
        ));
        svg.push_str(nl);

        for element in &self.elements {
            svg.push_str(element);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

/// Maps normalized figure coordinates to pixels, flipping the y axis
#[derive(Debug, Clone, Copy)]
struct Canvas {
    width: f64,
    height: f64,
}

impl Canvas {
    fn new(figsize: FigureSize, pixel_width: f64) -> Self {
        Self {
            width: pixel_width,
            height: pixel_width / figsize.aspect(),
        }
    }

    fn point(&self, p: Point) -> (f64, f64) {
        (p.x * self.width, (1.0 - p.y) * self.height)
    }

    /// Top-left corner and size in pixels; negative extents are normalized
    fn rect(&self, b: Bounds) -> (f64, f64, f64, f64) {
        let left = b.xll.min(b.right());
        let top = b.yll.max(b.top());
        (
            left * self.width,
            (1.0 - top) * self.height,
            b.w.abs() * self.width,
            b.h.abs() * self.height,
        )
    }
}

/// Render a figure layout as an SVG preview
///
/// Each panel is drawn as a placeholder with its name in the middle and its
/// anchor point marked by a circle. Panels are drawn in insertion order.
pub fn render_svg(layout: &FigureLayout, config: &SvgConfig) -> String {
    let canvas = Canvas::new(layout.figsize(), config.canvas_width);
    let mut builder = SvgBuilder::new(config.clone());

    builder.add_rect(
        None,
        "canvas",
        0.0,
        0.0,
        canvas.width,
        canvas.height,
        &format!(r#" fill="{}" stroke="{}""#, config.canvas_fill, config.panel_stroke),
    );

    for (name, panel) in layout.iter() {
        builder.start_group(name, "panel");

        let (x, y, w, h) = canvas.rect(panel.bounds());
        builder.add_rect(
            None,
            "panel-frame",
            x,
            y,
            w,
            h,
            &format!(
                r#" fill="{}" stroke="{}" stroke-width="1""#,
                config.panel_fill, config.panel_stroke
            ),
        );

        let (cx, cy) = canvas.point(panel.bounds().center());
        builder.add_text("panel-label", cx, cy, name);

        let (ax, ay) = canvas.point(panel.anchor_point());
        builder.add_circle(
            "anchor",
            ax,
            ay,
            config.anchor_radius,
            &format!(r#" fill="{}" fill-opacity="0.8""#, config.anchor_color),
        );

        builder.end_group();
    }

    builder.build(canvas.width, canvas.height)
}

/// Pixel values rounded to two decimals without trailing zeros
fn fmt_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Anchor, EditorConfig};

    fn single_panel(anchor: Anchor) -> FigureLayout {
        FigureLayout::from_bounds(
            FigureSize::new(6.0, 6.0),
            [(0.1, 0.1, 0.8, 0.8)],
            EditorConfig::default().with_anchor(anchor),
        )
        .unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_fmt_px() {
        assert_eq!(fmt_px(40.0), "40");
        assert_eq!(fmt_px(33.333333), "33.33");
        assert_eq!(fmt_px(-0.0001), "0");
    }

    #[test]
    fn test_canvas_flips_y() {
        let canvas = Canvas::new(FigureSize::new(12.0, 4.0), 300.0);
        assert_eq!(canvas.height, 100.0);
        assert_eq!(canvas.point(Point::new(0.0, 0.0)), (0.0, 100.0));
        assert_eq!(canvas.point(Point::new(1.0, 1.0)), (300.0, 0.0));
    }

    #[test]
    fn test_canvas_normalizes_negative_extent() {
        let canvas = Canvas::new(FigureSize::new(1.0, 1.0), 100.0);
        let (x, y, w, h) = canvas.rect(Bounds::new(0.5, 0.5, -0.25, -0.25));
        assert_eq!((x, y, w, h), (25.0, 50.0, 25.0, 25.0));
    }

    #[test]
    fn test_render_panel_with_center_anchor() {
        let svg = render_svg(&single_panel(Anchor::Center), &SvgConfig::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"<g id="A" class="axp-panel">"#));
        assert!(svg.contains(r#"x="40" y="40" width="320" height="320""#));
        assert!(svg.contains(r#"<circle class="axp-anchor" cx="200" cy="200" r="8""#));
        assert!(svg.contains(">A</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_anchor_marker_follows_anchor() {
        let svg = render_svg(&single_panel(Anchor::UpperLeft), &SvgConfig::default());
        assert!(svg.contains(r#"cx="40" cy="40""#));
    }

    #[test]
    fn test_compact_output() {
        let config = SvgConfig::default()
            .with_pretty_print(false)
            .with_standalone(false)
            .without_class_prefix();
        let svg = render_svg(&single_panel(Anchor::Center), &config);
        assert!(!svg.contains('\n'));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"class="panel""#));
    }
}
