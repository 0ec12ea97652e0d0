//! Property tests for stack and layout invariants.

use parlor_core::geometry::Viewport;
use parlor_modal::{
    layout, ImageInfo, ModalManager, ModalMetrics, ModalOptions, MODAL_HEIGHT_ALLOWANCE,
};
use proptest::prelude::*;

proptest! {
    /// Opening N modals yields a stack of size N with exactly one
    /// visible modal and exactly one overlay, for any N >= 1.
    #[test]
    fn open_n_keeps_one_visible_and_one_overlay(n in 1usize..24) {
        let mut manager = ModalManager::new(Viewport::new(1280.0, 720.0));
        for _ in 0..n {
            manager.open(ModalOptions::new(), None);
        }
        prop_assert_eq!(manager.depth(), n);
        prop_assert_eq!(manager.visible_count(), 1);
        prop_assert_eq!(manager.overlay_count(), 1);
    }

    /// Closing N times from depth N always ends with an empty stack and
    /// no overlay, while every intermediate close keeps one visible top.
    #[test]
    fn close_unwinds_to_empty(n in 1usize..24) {
        let mut manager = ModalManager::new(Viewport::new(1280.0, 720.0));
        for _ in 0..n {
            manager.open(ModalOptions::new(), None);
        }
        for remaining in (0..n).rev() {
            manager.close();
            prop_assert_eq!(manager.depth(), remaining);
            if remaining > 0 {
                prop_assert_eq!(manager.visible_count(), 1);
                prop_assert_eq!(manager.overlay_count(), 1);
            }
        }
        prop_assert_eq!(manager.overlay_count(), 0);
        prop_assert!(!manager.is_scroll_locked());
    }

    /// Whenever layout assigns a width, it never exceeds the viewport.
    #[test]
    fn computed_width_never_exceeds_viewport(
        vw in 1.0f64..4000.0,
        vh in 1.0f64..4000.0,
        outer_height in 0.0f64..4000.0,
        width in 0.0f64..8000.0,
        header_height in 0.0f64..200.0,
        image in proptest::option::of((1.0f64..8000.0, 1.0f64..8000.0)),
    ) {
        let viewport = Viewport::new(vw, vh);
        let metrics = ModalMetrics { outer_height, width, header_height };
        let image = image.map(|(w, h)| ImageInfo::new(w, h));

        let result = layout::compute(viewport, metrics, image);
        if let Some(w) = result.style.width {
            prop_assert!(w <= vw + 1e-9, "width {w} exceeds viewport {vw}");
        }
    }

    /// On the non-full-screen breakpoints without an image, the height
    /// cap is always the viewport height minus the chrome allowance.
    #[test]
    fn height_cap_on_large_breakpoints(
        vw in 501.0f64..4000.0,
        vh in 100.0f64..4000.0,
        outer_height in 0.0f64..4000.0,
        width in 0.0f64..500.0,
        header_height in 0.0f64..200.0,
    ) {
        let result = layout::compute(
            Viewport::new(vw, vh),
            ModalMetrics { outer_height, width, header_height },
            None,
        );
        prop_assert_eq!(result.style.max_height, Some(vh - MODAL_HEIGHT_ALLOWANCE));
        prop_assert_eq!(
            result.body_style.max_height,
            Some(vh - MODAL_HEIGHT_ALLOWANCE - header_height)
        );
    }

    /// Layout is idempotent: same inputs, same outputs.
    #[test]
    fn layout_is_idempotent(
        vw in 1.0f64..4000.0,
        vh in 1.0f64..4000.0,
        outer_height in 0.0f64..4000.0,
        width in 0.0f64..8000.0,
    ) {
        let viewport = Viewport::new(vw, vh);
        let metrics = ModalMetrics { outer_height, width, header_height: 0.0 };
        let first = layout::compute(viewport, metrics, None);
        let second = layout::compute(viewport, metrics, None);
        prop_assert_eq!(first, second);
    }
}
