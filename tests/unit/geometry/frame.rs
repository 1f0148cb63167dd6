use super::*;
use crate::model::layer::LayerKind;
use proptest::prelude::*;

fn layer(x: f64, y: f64, w: f64, h: f64) -> Layer {
    Layer::new("l", "L", LayerKind::Shape)
        .with_position(x, y)
        .with_size(w, h)
}

#[test]
fn anchor_defaults_to_center() {
    let mut l = layer(0.0, 0.0, 10.0, 10.0);
    assert_eq!(anchor_of(&l), Point::new(0.5, 0.5));
    l.anchor_point = Some(Point::new(0.0, 1.0));
    assert_eq!(anchor_of(&l), Point::new(0.0, 1.0));
}

#[test]
fn to_box_y_down_subtracts_anchor_offset() {
    let l = layer(50.0, 40.0, 100.0, 20.0);
    assert_eq!(to_box(&l, 500.0, false), BoxOrigin { left: 0.0, top: 30.0 });
}

#[test]
fn to_box_y_up_measures_from_bottom() {
    let l = layer(50.0, 40.0, 100.0, 20.0);
    // top edge sits at y + h/2 = 50 above the bottom of a 500pt container.
    assert_eq!(to_box(&l, 500.0, true), BoxOrigin { left: 0.0, top: 450.0 });
}

#[test]
fn non_finite_inputs_degrade_to_zero() {
    let mut l = layer(f64::NAN, f64::INFINITY, 10.0, f64::NAN);
    l.anchor_point = Some(Point::new(f64::NAN, 0.5));
    let b = to_box(&l, f64::NAN, true);
    assert!(b.left.is_finite() && b.top.is_finite());
    let p = to_position(f64::NAN, 3.0, &l, 100.0, false);
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn absolute_box_switches_frames_per_ancestor() {
    let mut root = layer(200.0, 400.0, 400.0, 800.0);
    root.id = "root".to_owned();
    root.geometry_flipped = Some(true);

    let mut group = layer(100.0, 100.0, 200.0, 200.0);
    group.id = "group".to_owned();
    group.geometry_flipped = Some(false);

    let mut leaf = layer(20.0, 20.0, 40.0, 40.0);
    leaf.id = "leaf".to_owned();

    let tree = root.with_child(group.with_child(leaf));

    let b = absolute_box("leaf", &tree, 800.0, false);
    // root: y-up frame of 800 -> top = 800 - (400 + 400) = 0
    // group: y-down inside root -> left 0, top 0
    // leaf: y-up inside group (height 200) -> top = 200 - (20 + 20) = 160
    assert_eq!(b.left, 0.0);
    assert_eq!(b.top, 160.0);
    assert!(b.y_up);
    assert_eq!(b.container_height, 200.0);
}

#[test]
fn absolute_box_inherits_unset_flip() {
    let mut root = layer(50.0, 50.0, 100.0, 100.0);
    root.id = "root".to_owned();
    root.geometry_flipped = Some(true);
    let mut mid = layer(50.0, 50.0, 100.0, 100.0);
    mid.id = "mid".to_owned();
    let mut leaf = layer(10.0, 10.0, 20.0, 20.0);
    leaf.id = "leaf".to_owned();
    let tree = root.with_child(mid.with_child(leaf));

    let b = absolute_box("leaf", &tree, 100.0, true);
    assert!(!b.y_up);
    assert_eq!((b.left, b.top), (0.0, 0.0));
}

#[test]
fn absolute_box_of_unknown_id_is_zero_in_root_frame() {
    let tree = layer(1.0, 1.0, 2.0, 2.0);
    let b = absolute_box("missing", &tree, 640.0, true);
    assert_eq!(
        b,
        AbsoluteBox {
            left: 0.0,
            top: 0.0,
            y_up: false,
            container_height: 640.0,
        }
    );
}

proptest! {
    #[test]
    fn to_position_inverts_to_box(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
        w in 0.0f64..1000.0,
        h in 0.0f64..1000.0,
        ax in 0.0f64..=1.0,
        ay in 0.0f64..=1.0,
        container in 0.0f64..3000.0,
        y_up in any::<bool>(),
    ) {
        let mut l = layer(x, y, w, h);
        l.anchor_point = Some(Point::new(ax, ay));
        let b = to_box(&l, container, y_up);
        let p = to_position(b.left, b.top, &l, container, y_up);
        prop_assert!((p.x - x).abs() < 1e-6, "x: {} vs {}", p.x, x);
        prop_assert!((p.y - y).abs() < 1e-6, "y: {} vs {}", p.y, y);
    }
}
