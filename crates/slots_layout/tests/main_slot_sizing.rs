use scene::Scene;
use slots_layout::SlotsLayout;

/// The main slot's implicit width is whatever the container width leaves
/// after the auxiliary slots, their paddings, its own paddings and the
/// container's side paddings.
#[test]
fn main_slot_width_is_the_remaining_width() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    s.set_size(layout.item(), 400.0, 60.0);

    let main = s.create_item(None);
    s.set_height(main, 30.0);
    layout.set_main_slot(&mut s, main).unwrap();
    layout.set_slot_leading_padding(main, 0.0);
    layout.set_slot_trailing_padding(main, 0.0);

    let trailing = s.create_item(None);
    s.set_size(trailing, 40.0, 20.0);
    layout.insert_slot(&mut s, trailing).unwrap();
    layout.set_slot_leading_padding(trailing, 8.0);
    layout.set_slot_trailing_padding(trailing, 8.0);

    layout.set_padding_leading(0.0);
    layout.set_padding_trailing(16.0);

    layout.complete(&mut s);
    layout.settle(&mut s);

    // 400 - (40 + 8 + 8) - 16
    assert_eq!(s.width(main), 328.0);
    assert_eq!(layout.slots_width(), 56.0);

    // the main slot leads the chain, the trailing slot follows it
    let rm = s.rect(main);
    let rt = s.rect(trailing);
    assert_eq!(rm.x, 0.0);
    assert_eq!(rt.x, rm.right() + 8.0);
}

/// Shrinking the container propagates to the main slot width; the sum of the
/// parts spans the full container width.
#[test]
fn container_resize_resizes_the_main_slot() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    s.set_size(layout.item(), 400.0, 60.0);

    let main = s.create_item(None);
    s.set_height(main, 30.0);
    layout.set_main_slot(&mut s, main).unwrap();
    layout.set_slot_leading_padding(main, 0.0);
    layout.set_slot_trailing_padding(main, 0.0);
    layout.set_padding_leading(0.0);
    layout.set_padding_trailing(0.0);

    layout.complete(&mut s);
    layout.settle(&mut s);
    assert_eq!(s.width(main), 400.0);

    s.set_width(layout.item(), 250.0);
    layout.settle(&mut s);
    assert_eq!(s.width(main), 250.0);
}

/// Overflow is not clamped: a main slot can be asked for a negative width.
#[test]
fn overflowing_slots_drive_the_main_slot_width_negative() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    s.set_size(layout.item(), 100.0, 60.0);

    let main = s.create_item(None);
    s.set_height(main, 30.0);
    layout.set_main_slot(&mut s, main).unwrap();
    layout.set_slot_leading_padding(main, 0.0);
    layout.set_slot_trailing_padding(main, 0.0);
    layout.set_padding_leading(0.0);
    layout.set_padding_trailing(0.0);

    let wide = s.create_item(None);
    s.set_size(wide, 150.0, 20.0);
    layout.insert_slot(&mut s, wide).unwrap();
    layout.set_slot_leading_padding(wide, 0.0);
    layout.set_slot_trailing_padding(wide, 0.0);

    layout.complete(&mut s);
    layout.settle(&mut s);
    assert_eq!(s.width(main), -50.0);
}

/// Without a parent the container falls back to its grid-unit-derived
/// implicit width; with a parent it tracks the parent's width.
#[test]
fn implicit_container_width_follows_the_parent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let mut layout = SlotsLayout::new(&mut s, None);
    layout.complete(&mut s);
    layout.settle(&mut s);
    // 40 gu at 8 px/gu
    assert_eq!(s.width(layout.item()), 320.0);

    let parent = s.create_item(None);
    s.set_width(parent, 500.0);
    s.reparent(layout.item(), Some(parent)).unwrap();
    layout.settle(&mut s);
    assert_eq!(s.width(layout.item()), 500.0);

    s.set_width(parent, 480.0);
    layout.settle(&mut s);
    assert_eq!(s.width(layout.item()), 480.0);
}
