//! Syntax tree for layout files

use std::collections::HashSet;

use crate::geometry::collection::auto_name;
use crate::geometry::{Bounds, EditorConfig, FigureLayout, FigureSize, GeometryError};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// One `(xll, yll, w, h)` tuple and the name given in its trailing comment
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub bounds: Spanned<Bounds>,
    pub name: Option<Spanned<String>>,
}

/// A parsed layout file
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFile {
    pub figsize: Option<Spanned<FigureSize>>,
    pub entries: Vec<Entry>,
}

impl LayoutFile {
    /// Build a figure layout from the parsed entries
    ///
    /// `default_figsize` applies when the file has no `figsize` statement.
    /// Unnamed entries receive the first automatic names not claimed by any
    /// named entry in the file, so explicit names never collide with generated ones.
    pub fn into_layout(
        self,
        default_figsize: FigureSize,
        config: EditorConfig,
    ) -> Result<FigureLayout, GeometryError> {
        let figsize = self.figsize.map_or(default_figsize, |s| s.node);
        if !figsize.is_valid() {
            return Err(GeometryError::invalid_layout(format!(
                "figure size {figsize} must be finite and positive"
            )));
        }

        let mut taken: HashSet<String> = self
            .entries
            .iter()
            .filter_map(|e| e.name.as_ref().map(|n| n.node.clone()))
            .collect();
        let mut auto_names = (0..).map(auto_name);

        let mut layout = FigureLayout::with_config(figsize, config);
        for entry in self.entries {
            let name = match entry.name {
                Some(name) => name.node,
                None => {
                    let name = auto_names
                        .by_ref()
                        .find(|candidate| !taken.contains(candidate))
                        .ok_or(GeometryError::NoFreeName)?;
                    taken.insert(name.clone());
                    name
                }
            };
            layout.insert(name, entry.bounds.node)?;
        }
        Ok(layout)
    }
}
