use scene::Scene;
use slots_layout::{SlotPosition, SlotsLayout};

fn slot(s: &mut Scene, layout: &mut SlotsLayout, width: f32) -> scene::ItemKey {
    let item = s.create_item(None);
    s.set_size(item, width, 20.0);
    layout.insert_slot(s, item).unwrap();
    layout.set_slot_position(item, SlotPosition::Trailing);
    item
}

/// A hidden slot contributes zero width, is excluded from the chain, and
/// does not count toward the side's capacity; re-showing it restores its
/// prior contribution.
#[test]
fn hidden_slots_are_excluded_and_restored() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    s.set_size(layout.item(), 400.0, 60.0);

    let first = slot(&mut s, &mut layout, 40.0);
    let second = slot(&mut s, &mut layout, 40.0);

    layout.complete(&mut s);
    layout.settle(&mut s);
    let full_width = layout.slots_width();
    assert_eq!(full_width, 2.0 * (40.0 + 8.0 + 8.0));

    s.set_visible(first, false);
    layout.settle(&mut s);
    assert_eq!(layout.trailing_slots(), &[second]);
    assert_eq!(layout.slots_width(), full_width - 56.0);
    // the remaining slot now leads the row: container padding + own padding
    assert_eq!(s.rect(second).x, 16.0);

    s.set_visible(first, true);
    layout.settle(&mut s);
    assert_eq!(layout.trailing_slots(), &[first, second]);
    assert_eq!(layout.slots_width(), full_width);
}

/// A hidden slot does not occupy a place in a full bucket.
#[test]
fn hidden_slots_do_not_count_toward_the_cap() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    s.set_size(layout.item(), 400.0, 60.0);

    let a = slot(&mut s, &mut layout, 30.0);
    let b = slot(&mut s, &mut layout, 30.0);
    let c = slot(&mut s, &mut layout, 30.0);

    layout.complete(&mut s);
    layout.settle(&mut s);
    assert_eq!(layout.trailing_slots(), &[a, b]);

    s.set_visible(a, false);
    layout.settle(&mut s);
    assert_eq!(layout.trailing_slots(), &[b, c]);
}

/// Removing a slot changes the accumulated width by exactly its
/// contribution.
#[test]
fn removal_round_trips_the_bucket_width() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    s.set_size(layout.item(), 400.0, 60.0);

    let keep = slot(&mut s, &mut layout, 40.0);
    let gone = slot(&mut s, &mut layout, 25.0);
    layout.set_slot_leading_padding(gone, 3.0);
    layout.set_slot_trailing_padding(gone, 5.0);

    layout.complete(&mut s);
    layout.settle(&mut s);
    let before = layout.slots_width();

    s.remove_item(gone).unwrap();
    layout.remove_slot(gone);
    layout.settle(&mut s);

    assert_eq!(layout.slots_width(), before - (25.0 + 3.0 + 5.0));
    assert_eq!(layout.trailing_slots(), &[keep]);
}
