//! Assertions over what a mounted list rendered and where it placed it.

use recycler_core::{MeasureHost, Opacity};
use recycler_foundation::RecyclerList;
use recycler_ui_graphics::Rect;

/// Fails unless `actual` is within `tolerance` px of `expected`.
pub fn assert_within(actual: f32, expected: f32, tolerance: f32, what: &str) {
    let off_by = (actual - expected).abs();
    assert!(
        off_by <= tolerance,
        "{what}: {actual}px is {off_by}px away from {expected}px (allowed {tolerance}px)"
    );
}

/// Edge-by-edge [`assert_within`] for item and container boxes.
pub fn assert_rect_within(actual: Rect, expected: Rect, tolerance: f32, what: &str) {
    let edges = [
        ("x", actual.x, expected.x),
        ("y", actual.y, expected.y),
        ("width", actual.width, expected.width),
        ("height", actual.height, expected.height),
    ];
    for (edge, got, want) in edges {
        assert_within(got, want, tolerance, &format!("{what} {edge} ({actual:?})"));
    }
}

/// Fails unless some bound holder rendered exactly `text`.
pub fn assert_rendered(rendered: &[String], text: &str, what: &str) {
    assert!(
        rendered.iter().any(|t| t == text),
        "{what}: no bound holder shows {text:?}; bound holders show {rendered:?}"
    );
}

/// Fails if any bound holder rendered `text`.
pub fn assert_not_rendered(rendered: &[String], text: &str, what: &str) {
    assert!(
        !rendered.iter().any(|t| t == text),
        "{what}: a bound holder still shows {text:?}; bound holders show {rendered:?}"
    );
}

pub fn assert_len<T>(items: &[T], expected: usize, what: &str) {
    assert_eq!(items.len(), expected, "{what}: wrong length");
}

/// Assert that the list is opaque exactly when its container is measured and
/// at least one holder is bound.
pub fn assert_gate_sound<H: MeasureHost>(list: &RecyclerList<H>, msg: &str) {
    let expected = list.container_layout().is_some() && list.render_stack().is_populated();
    assert_eq!(
        list.current_opacity() == Opacity::Opaque,
        expected,
        "{}: opacity {:?} with container {:?} and {} bound holders",
        msg,
        list.current_opacity(),
        list.container_layout(),
        list.render_stack().len()
    );
}
