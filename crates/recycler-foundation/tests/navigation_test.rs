//! A list hidden under another screen and shown again.

use recycler_foundation::{CommitPhase, Delivery, Opacity, Rect, RecyclerListConfig};
use recycler_testing::prelude::*;

fn screen(data: Vec<i32>, estimate: f32) -> ListTestRule<i32> {
    ListTestRule::mount(
        FakeMeasureHost::phone(),
        RecyclerListConfig::new().estimated_item_size(estimate),
        data,
        |item: &i32| item.to_string(),
    )
    .expect("mount succeeds")
}

#[test]
fn hidden_list_keeps_bindings_and_reveals_again_on_return() {
    let mut stack = ScreenStack::new();
    stack
        .push("A", screen(vec![0, 1, 2, 3, 4], 100.0))
        .expect("A settles");
    let a = stack.screen("A").expect("A mounted");
    assert_eq!(a.opacity(), Opacity::Opaque);
    assert_eq!(a.render_id().get(), 1);

    stack
        .push("B", screen(vec![0, 1, 2], 100.0))
        .expect("B settles");

    let b = stack.top().expect("B on top");
    assert_eq!(b.opacity(), Opacity::Opaque);
    assert_eq!(b.rendered_texts(), vec!["0", "1", "2"]);

    let a = stack.screen("A").expect("A still mounted");
    assert_eq!(a.opacity(), Opacity::Transparent);
    assert_eq!(a.list().phase(), CommitPhase::AwaitingLayout);
    assert_eq!(a.rendered_indices(), vec![0, 1, 2, 3, 4]);
    assert_gate_sound(a.list(), "A hidden");

    assert_eq!(stack.pop().expect("pop succeeds").as_deref(), Some("B"));
    assert_eq!(stack.len(), 1);

    let a = stack.top().expect("A on top again");
    assert_eq!(a.opacity(), Opacity::Opaque);
    assert_eq!(a.render_id().get(), 2);
    assert_eq!(a.rendered_indices(), vec![0, 1, 2, 3, 4]);
    for index in 0..5 {
        assert_eq!(a.item_height(index), Some(100.0), "item {index}");
    }
    assert_gate_sound(a.list(), "A shown");
}

#[test]
fn returning_list_lays_out_with_cached_sizes() {
    let mut stack = ScreenStack::new();
    stack
        .push("A", screen(vec![0, 1, 2, 3, 4], 50.0))
        .expect("A settles");
    assert_eq!(
        stack.screen("A").expect("A mounted").item_height(4),
        Some(100.0)
    );

    stack
        .push("B", screen(vec![0, 1, 2], 100.0))
        .expect("B settles");

    // The recreated view cannot measure items; only the cache knows them.
    stack
        .screen("A")
        .expect("A still mounted")
        .host()
        .set_item_size(None);
    stack.pop().expect("pop succeeds");

    let a = stack.top().expect("A on top again");
    assert_eq!(a.opacity(), Opacity::Opaque);
    assert_eq!(a.rendered_indices(), vec![0, 1, 2, 3, 4]);
    for index in 0..5 {
        assert_eq!(a.item_height(index), Some(100.0), "item {index}");
    }
    let last = a.list().item_layout(4).expect("item 4 exists");
    assert_eq!(last.y, 400.0);
}

#[test]
fn popping_the_last_screen_empties_the_stack() {
    let mut stack = ScreenStack::new();
    stack
        .push("A", screen(vec![0, 1], 100.0))
        .expect("A settles");

    assert_eq!(stack.pop().expect("pop succeeds").as_deref(), Some("A"));
    assert!(stack.is_empty());
    assert_eq!(stack.pop().expect("pop succeeds"), None);
}

#[test]
fn hidden_list_ignores_layout_from_before_it_was_hidden() {
    let mut stack = ScreenStack::new();
    stack
        .push("A", screen(vec![0, 1, 2], 100.0))
        .expect("A settles");
    let ticket = stack.screen("A").expect("A mounted").list().request_layout();

    stack
        .push("B", screen(vec![0], 100.0))
        .expect("B settles");

    let a = stack.screen_mut("A").expect("A still mounted");
    let delivery = a
        .list_mut()
        .deliver_layout(&ticket, Some(Rect::new(0.0, 0.0, 399.0, 899.0)))
        .expect("delivery handled");
    assert_eq!(delivery, Delivery::Stale);
    assert_eq!(a.opacity(), Opacity::Transparent);
}
