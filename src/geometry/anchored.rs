//! Anchored boxes: panel rectangles edited through a reference point
//!
//! A box is stored as `(xll, yll, w, h)`. Its user-facing `x` and `y` are the
//! coordinates of the anchor point instead of the lower-left corner, and size
//! edits keep that anchor point fixed. With the aspect lock enabled, width and
//! height edits are coupled so that the displayed aspect ratio stays constant.

use log::trace;

use super::anchor::{Anchor, IntoAnchor};
use super::error::GeometryError;
use super::types::{Bounds, Point};

/// Magnitudes below this are treated as zero in aspect computations
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// A panel rectangle with an anchor point and an optional aspect lock
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredBox {
    bounds: Bounds,
    anchor: Anchor,
    aspect_locked: bool,
    /// Width over height of the enclosing canvas
    container_aspect: f64,
}

impl AnchoredBox {
    /// Create an unlocked box anchored at its lower-left corner
    ///
    /// The bounds are taken as given; see [`AnchoredBox::try_new`].
    pub fn new(bounds: impl Into<Bounds>, container_aspect: f64) -> Self {
        Self {
            bounds: bounds.into(),
            anchor: Anchor::LowerLeft,
            aspect_locked: false,
            container_aspect,
        }
    }

    /// Create an unlocked box, rejecting non-finite bounds
    ///
    /// This is the checked counterpart of [`AnchoredBox::new`], used wherever
    /// bounds come from outside the crate.
    pub fn try_new(bounds: impl Into<Bounds>, container_aspect: f64) -> Result<Self, GeometryError> {
        let bounds = bounds.into();
        if !bounds.is_finite() {
            return Err(GeometryError::invalid_value("bounds", bounds.to_string()));
        }
        require_finite("container aspect", container_aspect)?;
        Ok(Self::new(bounds, container_aspect))
    }

    /// Set the anchor while building
    pub fn with_anchor(mut self, anchor: impl IntoAnchor) -> Result<Self, GeometryError> {
        self.set_anchor(anchor)?;
        Ok(self)
    }

    /// Set the aspect lock while building
    pub fn with_locked_aspect(mut self, locked: bool) -> Self {
        self.aspect_locked = locked;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace the bounds wholesale
    pub fn set_bounds(&mut self, bounds: impl Into<Bounds>) -> Result<(), GeometryError> {
        self.commit(bounds.into())
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Change the reference point for subsequent position reads and writes
    ///
    /// The box itself does not move.
    pub fn set_anchor(&mut self, anchor: impl IntoAnchor) -> Result<(), GeometryError> {
        self.anchor = anchor.into_anchor()?;
        Ok(())
    }

    pub fn is_aspect_locked(&self) -> bool {
        self.aspect_locked
    }

    /// Toggle the aspect lock; nothing is resized
    pub fn lock_aspect(&mut self, locked: bool) {
        self.aspect_locked = locked;
    }

    pub fn container_aspect(&self) -> f64 {
        self.container_aspect
    }

    pub fn set_container_aspect(&mut self, aspect: f64) {
        self.container_aspect = aspect;
    }

    // ---- anchor conversions ----

    /// Convert an anchor-relative x to the lower-left x
    pub fn x_to_xll(&self, x: f64) -> f64 {
        x - self.bounds.w * self.anchor.coords().0
    }

    /// Convert a lower-left x to the anchor-relative x
    pub fn xll_to_x(&self, xll: f64) -> f64 {
        xll + self.bounds.w * self.anchor.coords().0
    }

    /// Convert an anchor-relative y to the lower-left y
    pub fn y_to_yll(&self, y: f64) -> f64 {
        y - self.bounds.h * self.anchor.coords().1
    }

    /// Convert a lower-left y to the anchor-relative y
    pub fn yll_to_y(&self, yll: f64) -> f64 {
        yll + self.bounds.h * self.anchor.coords().1
    }

    // ---- position ----

    /// Anchor-relative x position
    pub fn x(&self) -> f64 {
        self.xll_to_x(self.bounds.xll)
    }

    /// Anchor-relative y position
    pub fn y(&self) -> f64 {
        self.yll_to_y(self.bounds.yll)
    }

    /// Absolute position of the anchor point
    pub fn anchor_point(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Move the box so that its anchor lands on `x`
    pub fn set_x(&mut self, x: f64) -> Result<(), GeometryError> {
        require_finite("x", x)?;
        // Re-applying the current value must not drift the bounds through rounding
        if x == self.x() {
            return Ok(());
        }
        let xll = self.x_to_xll(x);
        self.commit(Bounds { xll, ..self.bounds })
    }

    /// Move the box so that its anchor lands on `y`
    pub fn set_y(&mut self, y: f64) -> Result<(), GeometryError> {
        require_finite("y", y)?;
        if y == self.y() {
            return Ok(());
        }
        let yll = self.y_to_yll(y);
        self.commit(Bounds { yll, ..self.bounds })
    }

    // ---- size ----

    pub fn w(&self) -> f64 {
        self.bounds.w
    }

    pub fn h(&self) -> f64 {
        self.bounds.h
    }

    /// Resize horizontally around the anchor
    ///
    /// With the aspect lock enabled the height follows, keeping the anchor's y
    /// fixed as well.
    pub fn set_w(&mut self, w: f64) -> Result<(), GeometryError> {
        require_finite("w", w)?;
        if w == self.bounds.w {
            return Ok(());
        }
        let bounds = self.resized_w(w, self.aspect_locked)?;
        self.commit(bounds)
    }

    /// Resize vertically around the anchor
    ///
    /// With the aspect lock enabled the width follows, keeping the anchor's x
    /// fixed as well.
    pub fn set_h(&mut self, h: f64) -> Result<(), GeometryError> {
        require_finite("h", h)?;
        if h == self.bounds.h {
            return Ok(());
        }
        let bounds = self.resized_h(h, self.aspect_locked)?;
        self.commit(bounds)
    }

    // ---- aspect ----

    /// Displayed aspect ratio: canvas aspect times `w / h`
    pub fn aspect_ratio(&self) -> Result<f64, GeometryError> {
        let container = self.checked_container_aspect()?;
        if self.bounds.h.abs() < DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate("height is zero"));
        }
        Ok(container * (self.bounds.w / self.bounds.h))
    }

    /// Ratio `w / h` in normalized figure units
    pub fn box_aspect(&self) -> Result<f64, GeometryError> {
        let Bounds { w, h, .. } = self.bounds;
        if w.abs() < DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate("width is zero"));
        }
        if h.abs() < DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate("height is zero"));
        }
        Ok(w / h)
    }

    /// Reach a displayed aspect ratio by changing one dimension
    ///
    /// The height is recomputed from the width unless `fix_height` is set, in
    /// which case the width is recomputed from the height. The anchor point
    /// stays in place either way.
    pub fn set_aspect_ratio(&mut self, ratio: f64, fix_height: bool) -> Result<(), GeometryError> {
        require_finite("aspect", ratio)?;
        if ratio.abs() < DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate("target aspect ratio is zero"));
        }
        let container = self.checked_container_aspect()?;
        let target = ratio / container;

        let bounds = if fix_height {
            if self.bounds.h.abs() < DEGENERATE_EPSILON {
                return Err(GeometryError::degenerate("height is zero"));
            }
            self.resized_w(self.bounds.h * target, false)?
        } else {
            if self.bounds.w.abs() < DEGENERATE_EPSILON {
                return Err(GeometryError::degenerate("width is zero"));
            }
            self.resized_h(self.bounds.w / target, false)?
        };
        self.commit(bounds)
    }

    // ---- internals ----

    fn resized_w(&self, w: f64, couple: bool) -> Result<Bounds, GeometryError> {
        let Bounds {
            xll,
            yll,
            w: w0,
            h: h0,
        } = self.bounds;
        let (ax, ay) = self.anchor.coords();

        let xll = xll + ax * (w0 - w);
        if !couple {
            return Ok(Bounds::new(xll, yll, w, h0));
        }

        // Box aspect is taken before the resize
        let h = w / self.box_aspect()?;
        let yll = yll + ay * (h0 - h);
        Ok(Bounds::new(xll, yll, w, h))
    }

    fn resized_h(&self, h: f64, couple: bool) -> Result<Bounds, GeometryError> {
        let Bounds {
            xll,
            yll,
            w: w0,
            h: h0,
        } = self.bounds;
        let (ax, ay) = self.anchor.coords();

        let yll = yll + ay * (h0 - h);
        if !couple {
            return Ok(Bounds::new(xll, yll, w0, h));
        }

        let w = h * self.box_aspect()?;
        let xll = xll + ax * (w0 - w);
        Ok(Bounds::new(xll, yll, w, h))
    }

    fn checked_container_aspect(&self) -> Result<f64, GeometryError> {
        let aspect = self.container_aspect;
        if !aspect.is_finite() || aspect.abs() < DEGENERATE_EPSILON {
            return Err(GeometryError::degenerate(format!(
                "container aspect {aspect} is unusable"
            )));
        }
        Ok(aspect)
    }

    /// Single write point for the bounds
    fn commit(&mut self, bounds: Bounds) -> Result<(), GeometryError> {
        if !bounds.is_finite() {
            return Err(GeometryError::degenerate(format!(
                "resulting bounds {bounds:?} are not finite"
            )));
        }
        trace!("bounds {} -> {}", self.bounds, bounds);
        self.bounds = bounds;
        Ok(())
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::invalid_value(field, value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOL,
            "expected {expected}, got {actual}"
        );
    }

    fn xywh(b: &AnchoredBox) -> (f64, f64, f64, f64) {
        (b.x(), b.y(), b.w(), b.h())
    }

    fn square(anchor: Anchor) -> AnchoredBox {
        AnchoredBox::new((0.1, 0.1, 0.8, 0.8), 1.0)
            .with_anchor(anchor)
            .unwrap()
    }

    #[test]
    fn test_center_anchor_reads() {
        let b = square(Anchor::Center);
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.8, 0.8));
        assert_close(b.x(), 0.5);
        assert_close(b.y(), 0.5);
        assert_close(b.w(), 0.8);
        assert_close(b.h(), 0.8);
    }

    #[test]
    fn test_lower_left_anchor_reads() {
        let b = square(Anchor::LowerLeft);
        assert_eq!(xywh(&b), (0.1, 0.1, 0.8, 0.8));
    }

    #[test]
    fn test_anchor_switch_does_not_move_box() {
        let mut b = square(Anchor::LowerLeft);
        let expected = [
            ("c", (0.5, 0.5)),
            ("ur", (0.9, 0.9)),
            ("ul", (0.1, 0.9)),
            ("lr", (0.9, 0.1)),
        ];
        for (anchor, (x, y)) in expected {
            b.set_anchor(anchor).unwrap();
            assert_close(b.x(), x);
            assert_close(b.y(), y);
            assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.8, 0.8));
        }
    }

    #[test]
    fn test_set_x_round_trip_is_noop() {
        for anchor in Anchor::PRESETS {
            let mut b = AnchoredBox::new((0.13, 0.27, 0.41, 0.33), 1.5)
                .with_anchor(anchor)
                .unwrap();
            let before = b.bounds();
            b.set_x(b.x()).unwrap();
            b.set_y(b.y()).unwrap();
            assert_eq!(b.bounds(), before, "anchor {anchor}");
        }
    }

    #[test]
    fn test_set_x_places_anchor() {
        let mut b = square(Anchor::UpperRight);
        b.set_x(0.7).unwrap();
        b.set_y(0.6).unwrap();
        assert_close(b.x(), 0.7);
        assert_close(b.y(), 0.6);
        assert_close(b.bounds().xll, -0.1);
        assert_close(b.bounds().yll, -0.2);
        assert_close(b.w(), 0.8);
    }

    #[test]
    fn test_set_w_keeps_anchor_x() {
        let mut b = square(Anchor::Center);
        b.set_w(0.4).unwrap();
        assert_close(b.x(), 0.5);
        assert_close(b.bounds().xll, 0.3);
        // Unlocked: height and y untouched
        assert_close(b.h(), 0.8);
        assert_close(b.bounds().yll, 0.1);
    }

    #[test]
    fn test_set_h_keeps_anchor_y() {
        let mut b = square(Anchor::UpperLeft);
        b.set_h(0.5).unwrap();
        assert_close(b.y(), 0.9);
        assert_close(b.bounds().yll, 0.4);
        assert_close(b.w(), 0.8);
    }

    #[test]
    fn test_locked_width_edit_preserves_aspect_and_anchor() {
        let mut b = AnchoredBox::new((0.1, 0.2, 0.6, 0.3), 1.5)
            .with_anchor(Anchor::Center)
            .unwrap();
        b.set_aspect_ratio(2.0, false).unwrap();
        b.lock_aspect(true);
        let anchor_before = b.anchor_point();

        b.set_w(0.3).unwrap();

        assert_close(b.w(), 0.3);
        assert_close(b.aspect_ratio().unwrap(), 2.0);
        assert_close(b.anchor_point().x, anchor_before.x);
        assert_close(b.anchor_point().y, anchor_before.y);
    }

    #[test]
    fn test_locked_height_edit_preserves_aspect_and_anchor() {
        let mut b = AnchoredBox::new((0.1, 0.1, 0.4, 0.2), 0.75)
            .with_anchor(Anchor::UpperRight)
            .unwrap()
            .with_locked_aspect(true);
        let ratio = b.aspect_ratio().unwrap();
        let anchor_before = b.anchor_point();

        b.set_h(0.5).unwrap();

        assert_close(b.h(), 0.5);
        assert_close(b.w(), 1.0);
        assert_close(b.aspect_ratio().unwrap(), ratio);
        assert_close(b.anchor_point().x, anchor_before.x);
        assert_close(b.anchor_point().y, anchor_before.y);
    }

    #[test]
    fn test_set_aspect_ratio_either_dimension() {
        for fix_height in [false, true] {
            for locked in [false, true] {
                let mut b = AnchoredBox::new((0.2, 0.2, 0.5, 0.4), 12.0 / 4.0)
                    .with_anchor(Anchor::LowerRight)
                    .unwrap()
                    .with_locked_aspect(locked);
                b.set_aspect_ratio(1.25, fix_height).unwrap();
                assert_close(b.aspect_ratio().unwrap(), 1.25);
                if fix_height {
                    assert_close(b.h(), 0.4);
                } else {
                    assert_close(b.w(), 0.5);
                }
                // Lower-right anchor stays at (0.7, 0.2)
                assert_close(b.x(), 0.7);
                assert_close(b.y(), 0.2);
            }
        }
    }

    #[test]
    fn test_lock_toggle_does_not_resize() {
        let mut b = square(Anchor::Center);
        b.lock_aspect(true);
        assert!(b.is_aspect_locked());
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.8, 0.8));
        b.lock_aspect(false);
        assert!(!b.is_aspect_locked());
    }

    #[test]
    fn test_degenerate_height_under_lock() {
        let mut b = AnchoredBox::new((0.1, 0.1, 0.5, 0.0), 1.0).with_locked_aspect(true);
        let err = b.set_w(0.2).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateBox { .. }));
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.5, 0.0));
        assert!(b.aspect_ratio().is_err());
    }

    #[test]
    fn test_degenerate_width_under_lock() {
        let mut b = AnchoredBox::new((0.1, 0.1, 0.0, 0.5), 1.0).with_locked_aspect(true);
        let err = b.set_h(0.2).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateBox { .. }));
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.0, 0.5));
    }

    #[test]
    fn test_fixed_height_aspect_on_flat_box() {
        let mut b = AnchoredBox::new((0.1, 0.1, 0.5, 0.0), 1.0)
            .with_anchor(Anchor::Center)
            .unwrap();
        assert!(matches!(
            b.set_aspect_ratio(2.0, true),
            Err(GeometryError::DegenerateBox { .. })
        ));
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.5, 0.0));
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        assert!(matches!(
            AnchoredBox::try_new((f64::NAN, 0.0, 1.0, 1.0), 1.0),
            Err(GeometryError::InvalidValue { .. })
        ));
        assert!(matches!(
            AnchoredBox::try_new((0.0, 0.0, f64::INFINITY, 1.0), 1.0),
            Err(GeometryError::InvalidValue { .. })
        ));
        assert!(AnchoredBox::try_new((0.0, 0.0, 1.0, 1.0), f64::INFINITY).is_err());
        let b = AnchoredBox::try_new((0.1, 0.2, 0.3, 0.4), 1.5).unwrap();
        assert_eq!(b.bounds().to_tuple(), (0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_degenerate_height_unlocked_is_fine() {
        let mut b = AnchoredBox::new((0.1, 0.1, 0.5, 0.0), 1.0);
        b.set_w(0.2).unwrap();
        assert_close(b.w(), 0.2);
    }

    #[test]
    fn test_degenerate_aspect_targets() {
        let mut b = square(Anchor::Center);
        assert!(matches!(
            b.set_aspect_ratio(0.0, false),
            Err(GeometryError::DegenerateBox { .. })
        ));
        b.set_container_aspect(0.0);
        assert!(matches!(
            b.set_aspect_ratio(1.0, false),
            Err(GeometryError::DegenerateBox { .. })
        ));
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.8, 0.8));
    }

    #[test]
    fn test_invalid_anchor_leaves_box_unchanged() {
        let mut b = square(Anchor::Center);
        assert!(matches!(
            b.set_anchor("middle"),
            Err(GeometryError::InvalidAnchorName { .. })
        ));
        assert!(matches!(
            b.set_anchor("(1, 2, 3)"),
            Err(GeometryError::InvalidAnchorType { .. })
        ));
        assert_eq!(b.anchor(), Anchor::Center);
    }

    #[test]
    fn test_out_of_range_anchor_extrapolates() {
        let b = AnchoredBox::new((0.0, 0.0, 0.5, 0.5), 1.0)
            .with_anchor((2.0, -1.0))
            .unwrap();
        assert_close(b.x(), 1.0);
        assert_close(b.y(), -0.5);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let mut b = square(Anchor::Center);
        assert!(matches!(
            b.set_w(f64::INFINITY),
            Err(GeometryError::InvalidValue { .. })
        ));
        assert!(b.set_x(f64::NAN).is_err());
        assert_eq!(b.bounds(), Bounds::new(0.1, 0.1, 0.8, 0.8));
    }

    #[test]
    fn test_fresh_box_matches_reanchored_box() {
        let bounds = Bounds::new(0.05, 0.3, 0.45, 0.25);
        for anchor in Anchor::PRESETS {
            let mut b = AnchoredBox::new(bounds, 1.0);
            b.set_anchor(anchor).unwrap();
            let fresh = AnchoredBox::new(bounds, 1.0).with_anchor(anchor).unwrap();
            assert_eq!((b.x(), b.y()), (fresh.x(), fresh.y()));
        }
    }
}
