#![forbid(unsafe_code)]

//! Responsive layout policy, computed as data.
//!
//! [`compute`] is a pure function of the viewport, the modal's measured
//! geometry, and an optional body image. Calling it twice with unchanged
//! inputs yields identical output, which is what makes relayout-on-resize
//! and relayout-on-image-load safe to fire at arbitrary times.
//!
//! Policy, first match wins:
//!
//! 1. A visible body image is capped at 80% of the viewport on each axis
//!    (aspect preserved); the modal is centered vertically and its width
//!    follows the scaled image.
//! 2. Otherwise the viewport width selects a breakpoint: the two smallest
//!    go full-screen, the rest center vertically with a height cap of the
//!    viewport height minus a fixed chrome allowance (the body region is
//!    further reduced by the header's rendered height).
//! 3. If the resulting width still exceeds the viewport, shrink to 90% of
//!    the viewport width and recenter horizontally with a negative margin
//!    of half that width.

use parlor_core::geometry::{Px, Size, Viewport};

/// Vertical chrome allowance subtracted from the viewport height when
/// capping modal height on the larger breakpoints.
pub const MODAL_HEIGHT_ALLOWANCE: Px = 30.0;

/// Viewport-width class applied to a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Breakpoint {
    /// Width of 340px or less; full-screen.
    W340,
    /// Width of 500px or less; full-screen.
    W500,
    /// Width of 800px or less; centered with height cap.
    W800,
    /// Width of 960px or less; centered with height cap.
    W960,
    /// Anything wider; centered with height cap, no class.
    Wide,
}

impl Breakpoint {
    /// Classes cleared before each layout pass.
    pub const ALL_CLASSES: [&'static str; 4] = ["bp340", "bp500", "bp800", "bp960"];

    /// Select the breakpoint for a viewport width.
    #[must_use]
    pub fn for_width(width: Px) -> Self {
        if width <= 340.0 {
            Self::W340
        } else if width <= 500.0 {
            Self::W500
        } else if width <= 800.0 {
            Self::W800
        } else if width <= 960.0 {
            Self::W960
        } else {
            Self::Wide
        }
    }

    /// The CSS class this breakpoint applies, if any.
    #[must_use]
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::W340 => Some("bp340"),
            Self::W500 => Some("bp500"),
            Self::W800 => Some("bp800"),
            Self::W960 => Some("bp960"),
            Self::Wide => None,
        }
    }

    /// Whether this breakpoint renders the modal full-screen.
    #[must_use]
    pub const fn is_full_screen(self) -> bool {
        matches!(self, Self::W340 | Self::W500)
    }
}

/// Style values computed for the modal element. `None` means the
/// property is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedStyle {
    pub bottom: Option<Px>,
    pub height: Option<Px>,
    pub width: Option<Px>,
    pub max_height: Option<Px>,
    pub margin_left: Option<Px>,
}

/// Style values computed for the modal body region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyStyle {
    pub max_height: Option<Px>,
}

/// Geometry the embedder measured from the rendered modal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModalMetrics {
    /// Rendered outer height of the whole modal.
    pub outer_height: Px,
    /// Rendered width of the whole modal.
    pub width: Px,
    /// Rendered height of the header region.
    pub header_height: Px,
}

/// A body image the layout engine must account for.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageInfo {
    /// Natural (intrinsic) size of the image.
    pub natural: Size,
    /// Hidden images do not drive layout.
    pub visible: bool,
}

impl ImageInfo {
    /// A visible image with the given natural size.
    #[must_use]
    pub fn new(width: Px, height: Px) -> Self {
        Self {
            natural: Size::new(width, height),
            visible: true,
        }
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutResult {
    pub style: ComputedStyle,
    pub body_style: BodyStyle,
    /// Breakpoint class to apply; [`Breakpoint::Wide`] when the image
    /// rule won or the viewport is wider than every threshold.
    pub breakpoint: Breakpoint,
    /// Display size of the body image after the 80% cap, when rule 1
    /// applied.
    pub image: Option<Size>,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::Wide
    }
}

/// Scale an image down (never up) to fit 80% of the viewport per axis.
#[must_use]
pub fn fit_image(natural: Size, viewport: Viewport) -> Size {
    if natural.is_empty() {
        return natural;
    }
    let max_width = viewport.width * 0.8;
    let max_height = viewport.height * 0.8;
    let scale = (max_width / natural.width)
        .min(max_height / natural.height)
        .min(1.0);
    Size::new(natural.width * scale, natural.height * scale)
}

/// Compute modal and body styles for the given inputs.
#[must_use]
pub fn compute(viewport: Viewport, metrics: ModalMetrics, image: Option<ImageInfo>) -> LayoutResult {
    let width = viewport.width;
    let height = viewport.height;

    let mut style = ComputedStyle::default();
    let mut body_style = BodyStyle::default();
    let mut breakpoint = Breakpoint::for_width(width);
    let mut fitted = None;

    let visible_image = image.filter(|img| img.visible && !img.natural.is_empty());
    if let Some(img) = visible_image {
        let display = fit_image(img.natural, viewport);
        style.bottom = Some((height - metrics.outer_height) / 2.0);
        style.margin_left = Some(-(display.width / 2.0));
        style.width = Some(display.width);
        fitted = Some(display);
        // The image rule carries no breakpoint class.
        breakpoint = Breakpoint::Wide;
    } else if breakpoint.is_full_screen() {
        style.bottom = Some(0.0);
        style.height = Some(height);
        style.width = Some(width);
    } else {
        style.bottom = Some((height - metrics.outer_height) / 2.0);
        let cap = height - MODAL_HEIGHT_ALLOWANCE;
        style.max_height = Some(cap);
        body_style.max_height = Some(cap - metrics.header_height);
    }

    let resulting_width = style.width.unwrap_or(metrics.width);
    if resulting_width > width {
        let shrunk = width * 0.9;
        style.width = Some(shrunk);
        style.margin_left = Some(-(shrunk / 2.0));
    }

    LayoutResult {
        style,
        body_style,
        breakpoint,
        image: fitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(outer_height: Px, width: Px, header_height: Px) -> ModalMetrics {
        ModalMetrics {
            outer_height,
            width,
            header_height,
        }
    }

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::for_width(340.0), Breakpoint::W340);
        assert_eq!(Breakpoint::for_width(341.0), Breakpoint::W500);
        assert_eq!(Breakpoint::for_width(500.0), Breakpoint::W500);
        assert_eq!(Breakpoint::for_width(800.0), Breakpoint::W800);
        assert_eq!(Breakpoint::for_width(900.0), Breakpoint::W960);
        assert_eq!(Breakpoint::for_width(961.0), Breakpoint::Wide);
    }

    #[test]
    fn small_breakpoints_go_full_screen() {
        let result = compute(Viewport::new(320.0, 480.0), metrics(200.0, 300.0, 20.0), None);
        assert_eq!(result.breakpoint, Breakpoint::W340);
        assert_eq!(result.style.bottom, Some(0.0));
        assert_eq!(result.style.height, Some(480.0));
        assert_eq!(result.style.width, Some(320.0));
        assert_eq!(result.style.max_height, None);
    }

    #[test]
    fn nine_hundred_wide_viewport_caps_height() {
        let result = compute(Viewport::new(900.0, 600.0), metrics(400.0, 500.0, 40.0), None);
        assert_eq!(result.breakpoint, Breakpoint::W960);
        assert_eq!(result.breakpoint.class_name(), Some("bp960"));
        assert_eq!(result.style.max_height, Some(600.0 - 30.0));
        assert_eq!(result.body_style.max_height, Some(570.0 - 40.0));
        assert_eq!(result.style.bottom, Some((600.0 - 400.0) / 2.0));
    }

    #[test]
    fn wide_viewport_has_no_class() {
        let result = compute(Viewport::new(1280.0, 720.0), metrics(300.0, 500.0, 0.0), None);
        assert_eq!(result.breakpoint, Breakpoint::Wide);
        assert_eq!(result.breakpoint.class_name(), None);
        assert_eq!(result.style.max_height, Some(690.0));
    }

    #[test]
    fn image_rule_wins_over_breakpoints() {
        let viewport = Viewport::new(900.0, 600.0);
        let image = ImageInfo::new(2000.0, 1000.0);
        let result = compute(viewport, metrics(500.0, 500.0, 0.0), Some(image));

        // 80% caps: 720 wide, 480 tall. Width binds: scale = 0.36.
        let display = result.image.expect("image rule applied");
        assert!((display.width - 720.0).abs() < 1e-9);
        assert!((display.height - 360.0).abs() < 1e-9);
        assert_eq!(result.style.width, Some(display.width));
        assert_eq!(result.style.margin_left, Some(-360.0));
        assert_eq!(result.breakpoint.class_name(), None);
    }

    #[test]
    fn hidden_image_does_not_drive_layout() {
        let image = ImageInfo {
            natural: Size::new(2000.0, 1000.0),
            visible: false,
        };
        let result = compute(Viewport::new(900.0, 600.0), metrics(400.0, 500.0, 0.0), Some(image));
        assert_eq!(result.image, None);
        assert_eq!(result.breakpoint, Breakpoint::W960);
    }

    #[test]
    fn small_image_is_not_enlarged() {
        let result = compute(
            Viewport::new(1000.0, 1000.0),
            metrics(300.0, 300.0, 0.0),
            Some(ImageInfo::new(100.0, 50.0)),
        );
        let display = result.image.expect("image rule applied");
        assert_eq!(display, Size::new(100.0, 50.0));
    }

    #[test]
    fn overflowing_width_shrinks_to_ninety_percent() {
        let result = compute(Viewport::new(1000.0, 800.0), metrics(400.0, 1200.0, 0.0), None);
        assert_eq!(result.style.width, Some(900.0));
        assert_eq!(result.style.margin_left, Some(-450.0));
    }

    #[test]
    fn compute_is_idempotent() {
        let viewport = Viewport::new(900.0, 600.0);
        let m = metrics(400.0, 500.0, 32.0);
        let first = compute(viewport, m, None);
        let second = compute(viewport, m, None);
        assert_eq!(first, second);
    }
}
