#![forbid(unsafe_code)]

//! CSS-pixel geometry.
//!
//! Dimensions are `f64` because computed styles routinely land on
//! half-pixel values (centering offsets, percentage scaling). Negative
//! dimensions are clamped to zero at construction; callers never observe
//! a viewport or size with a negative axis.

/// A CSS pixel length.
pub type Px = f64;

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: Px,
    pub height: Px,
}

impl Size {
    /// Create a size, clamping negative axes to zero.
    #[must_use]
    pub fn new(width: Px, height: Px) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether either axis is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// The visible document area layout is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: Px,
    pub height: Px,
}

impl Viewport {
    /// Create a viewport, clamping negative axes to zero.
    #[must_use]
    pub fn new(width: Px, height: Px) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_axes_clamp_to_zero() {
        let size = Size::new(-10.0, 5.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 5.0);

        let viewport = Viewport::new(-1.0, -1.0);
        assert_eq!(viewport.width, 0.0);
        assert_eq!(viewport.height, 0.0);
    }

    #[test]
    fn empty_size() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }
}
