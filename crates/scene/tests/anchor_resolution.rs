use scene::{AnchorEdge, AnchorLine, Scene};

/// Chaining left anchors to the previous item's right edge lays a row out
/// left to right with the margins applied between items.
#[test]
fn chained_left_anchors_resolve_left_to_right() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let container = s.create_item(None);
    s.set_size(container, 300.0, 50.0);

    let a = s.create_item(Some(container));
    s.set_size(a, 40.0, 20.0);
    let b = s.create_item(Some(container));
    s.set_size(b, 60.0, 20.0);

    s.anchor_left(a, AnchorLine::new(container, AnchorEdge::Left), 10.0);
    s.anchor_left(b, AnchorLine::new(a, AnchorEdge::Right), 5.0);

    let ra = s.rect(a);
    let rb = s.rect(b);
    assert_eq!(ra.x, 10.0);
    assert_eq!(rb.x, ra.right() + 5.0);
}

#[test]
fn left_and_right_anchors_derive_width() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let container = s.create_item(None);
    s.set_size(container, 200.0, 40.0);

    let fill = s.create_item(Some(container));
    s.anchor_left(fill, AnchorLine::new(container, AnchorEdge::Left), 8.0);
    s.anchor_right(fill, AnchorLine::new(container, AnchorEdge::Right), 8.0);

    let r = s.rect(fill);
    assert_eq!(r.x, 8.0);
    assert_eq!(r.width, 184.0);
}

#[test]
fn vertical_center_anchor_takes_precedence_over_top() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let container = s.create_item(None);
    s.set_size(container, 100.0, 100.0);

    let child = s.create_item(Some(container));
    s.set_size(child, 10.0, 20.0);
    s.anchor_top(child, AnchorLine::new(container, AnchorEdge::Top), 3.0);
    s.anchor_vertical_center(
        child,
        AnchorLine::new(container, AnchorEdge::VerticalCenter),
        4.0,
    );

    // center = 50, offset 4, half height 10
    assert_eq!(s.rect(child).y, 44.0);

    s.reset_vertical_center(child);
    assert_eq!(s.rect(child).y, 3.0);
}

#[test]
fn baseline_line_uses_the_item_baseline_offset() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let block = s.create_item(None);
    let title = s.create_item(Some(block));
    s.set_size(title, 50.0, 18.0);
    s.set_baseline_offset(title, 14.0);
    s.anchor_top(title, AnchorLine::new(block, AnchorEdge::Top), 0.0);

    let below = s.create_item(Some(block));
    s.anchor_top(below, AnchorLine::new(title, AnchorEdge::Baseline), 2.0);

    assert_eq!(s.rect(below).y, 16.0);
}

/// Implicit sizes stop applying once an explicit size was set.
#[test]
fn explicit_size_wins_over_implicit() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let item = s.create_item(None);
    s.set_implicit_width(item, 120.0);
    assert_eq!(s.width(item), 120.0);

    s.set_width(item, 80.0);
    s.set_implicit_width(item, 300.0);
    assert_eq!(s.width(item), 80.0);
}

#[test]
fn events_record_mutations_in_order() {
    use scene::PropertyChange;

    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let item = s.create_item(None);
    s.set_width(item, 10.0);
    s.set_width(item, 10.0); // no-op, no event
    s.set_visible(item, false);

    let events: Vec<_> = s.take_events().into_iter().map(|e| e.change).collect();
    assert_eq!(events, vec![PropertyChange::Width, PropertyChange::Visible]);
    assert!(!s.has_pending_events());
}

#[test]
fn anchor_state_is_inspectable() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let container = s.create_item(None);
    let child = s.create_item(Some(container));
    let left = AnchorLine::new(container, AnchorEdge::Left);
    s.anchor_left(child, left, 10.0);

    let anchors = s.anchors(child);
    assert_eq!(anchors.left(), Some((left, 10.0)));
    assert!(anchors.right().is_none());
    assert!(anchors.top().is_none());
    assert!(anchors.vertical_center().is_none());
}

#[test]
fn removing_a_subtree_detaches_it_from_the_parent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut s = Scene::new();
    let root = s.create_item(None);
    let child = s.create_item(Some(root));
    let grandchild = s.create_item(Some(child));

    s.remove_item(child).unwrap();
    assert!(s.children(root).is_empty());
    assert!(!s.contains(child));
    assert!(!s.contains(grandchild));
    assert!(s.remove_item(child).is_err());
}
