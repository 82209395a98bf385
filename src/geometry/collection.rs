//! Named, insertion-ordered collections of anchored boxes

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;

use super::anchor::{Anchor, IntoAnchor};
use super::anchored::AnchoredBox;
use super::config::EditorConfig;
use super::error::GeometryError;
use super::types::{Bounds, FigureSize};

/// The panels of one figure, keyed by name in insertion order
#[derive(Debug, Clone)]
pub struct FigureLayout {
    figsize: FigureSize,
    panels: IndexMap<String, AnchoredBox>,
    anchor: Anchor,
    config: EditorConfig,
}

impl FigureLayout {
    /// Create an empty layout with the default editor configuration
    pub fn new(figsize: FigureSize) -> Self {
        Self::with_config(figsize, EditorConfig::default())
    }

    /// Create an empty layout with a custom editor configuration
    pub fn with_config(figsize: FigureSize, config: EditorConfig) -> Self {
        Self {
            figsize,
            panels: IndexMap::new(),
            anchor: config.anchor,
            config,
        }
    }

    /// Build a layout from unnamed rectangles, naming them `A`, `B`, ...
    pub fn from_bounds<I, B>(
        figsize: FigureSize,
        bounds: I,
        config: EditorConfig,
    ) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = B>,
        B: Into<Bounds>,
    {
        let mut layout = Self::with_config(figsize, config);
        for (index, b) in bounds.into_iter().enumerate() {
            layout.insert(auto_name(index), b)?;
        }
        Ok(layout)
    }

    pub fn figsize(&self) -> FigureSize {
        self.figsize
    }

    /// Resize the canvas; every panel picks up the new container aspect
    pub fn set_figsize(&mut self, figsize: FigureSize) {
        self.figsize = figsize;
        let aspect = figsize.aspect();
        for panel in self.panels.values_mut() {
            panel.set_container_aspect(aspect);
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Anchor currently applied to the layout's panels
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Apply one anchor to every panel
    ///
    /// The anchor is validated once up front, so either all panels change or none.
    pub fn set_anchor(&mut self, anchor: impl IntoAnchor) -> Result<(), GeometryError> {
        let anchor = anchor.into_anchor()?;
        for panel in self.panels.values_mut() {
            panel.set_anchor(anchor)?;
        }
        self.anchor = anchor;
        debug!("layout anchor set to {anchor}");
        Ok(())
    }

    /// Lock or unlock the aspect ratio of every panel
    pub fn lock_aspect(&mut self, locked: bool) {
        for panel in self.panels.values_mut() {
            panel.lock_aspect(locked);
        }
        self.config.lock_aspect = locked;
    }

    /// Add a named panel using the layout's anchor and lock settings
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        bounds: impl Into<Bounds>,
    ) -> Result<&mut AnchoredBox, GeometryError> {
        let name = name.into();
        if self.panels.contains_key(&name) {
            return Err(GeometryError::duplicate(name));
        }
        let panel = AnchoredBox::try_new(bounds, self.figsize.aspect())?
            .with_anchor(self.anchor)?
            .with_locked_aspect(self.config.lock_aspect);
        debug!("adding panel {name} at {}", panel.bounds());
        let entry = self.panels.entry(name).or_insert(panel);
        Ok(entry)
    }

    /// Add a panel around a pointed-at location and return its generated name
    pub fn add_at(&mut self, x: f64, y: f64) -> Result<String, GeometryError> {
        let name = self.next_free_name()?;
        let (dx, dy) = self.config.new_panel_offset;
        let (w, h) = self.config.new_panel_size;
        self.insert(name.clone(), Bounds::new(x - dx, y - dy, w, h))?;
        Ok(name)
    }

    /// Remove a panel, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Result<AnchoredBox, GeometryError> {
        let removed = self
            .panels
            .shift_remove(name)
            .ok_or_else(|| GeometryError::unknown(name))?;
        debug!("removed panel {name}");
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Option<&AnchoredBox> {
        self.panels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnchoredBox> {
        self.panels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.panels.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnchoredBox)> {
        self.panels.iter().map(|(name, panel)| (name.as_str(), panel))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Lower-left bounds of every panel in insertion order
    pub fn bounds(&self) -> Vec<Bounds> {
        self.panels.values().map(AnchoredBox::bounds).collect()
    }

    /// First automatic name not already in use
    pub fn next_free_name(&self) -> Result<String, GeometryError> {
        (0..self.config.max_auto_names)
            .map(auto_name)
            .find(|name| !self.panels.contains_key(name))
            .ok_or(GeometryError::NoFreeName)
    }

    /// Apply a single textual edit such as `A.w=0.3`
    pub fn apply(&mut self, edit: &Edit) -> Result<(), GeometryError> {
        let panel = self
            .panels
            .get_mut(&edit.name)
            .ok_or_else(|| GeometryError::unknown(&edit.name))?;

        if edit.field == EditField::Anchor {
            return panel.set_anchor(edit.value.as_str());
        }

        let value: f64 = edit
            .value
            .trim()
            .parse()
            .map_err(|_| GeometryError::invalid_value(edit.field.to_string(), &edit.value))?;
        debug!("{} {} <- {value}", edit.name, edit.field);

        match edit.field {
            EditField::X => panel.set_x(value),
            EditField::Y => panel.set_y(value),
            EditField::W => panel.set_w(value),
            EditField::H => panel.set_h(value),
            EditField::Aspect => panel.set_aspect_ratio(value, false),
            EditField::Anchor => unreachable!("anchor edits return early"),
        }
    }
}

/// `A`..`Z`, then `AA`..`ZZ`, then `AAA`, ...; distinct for every index
pub fn auto_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Panel property targeted by an [`Edit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    X,
    Y,
    W,
    H,
    Aspect,
    Anchor,
}

impl FromStr for EditField {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" => Ok(EditField::X),
            "y" => Ok(EditField::Y),
            "w" => Ok(EditField::W),
            "h" => Ok(EditField::H),
            "aspect" | "A" => Ok(EditField::Aspect),
            "anchor" => Ok(EditField::Anchor),
            other => Err(GeometryError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditField::X => "x",
            EditField::Y => "y",
            EditField::W => "w",
            EditField::H => "h",
            EditField::Aspect => "aspect",
            EditField::Anchor => "anchor",
        };
        f.write_str(name)
    }
}

/// One field assignment, written `name.field=value`
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub name: String,
    pub field: EditField,
    pub value: String,
}

impl FromStr for Edit {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeometryError::invalid_value("edit", s);
        let (target, value) = s.split_once('=').ok_or_else(malformed)?;
        let (name, field) = target.trim().rsplit_once('.').ok_or_else(malformed)?;
        if name.is_empty() {
            return Err(malformed());
        }
        Ok(Edit {
            name: name.to_string(),
            field: field.parse()?,
            value: value.trim().to_string(),
        })
    }
}
