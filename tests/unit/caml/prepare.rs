use super::*;
use crate::model::document::ProjectMeta;
use crate::model::layer::VideoLayer;
use crate::model::states::{STATE_LOCKED, STATE_SLEEP, STATE_UNLOCK};
use proptest::prelude::*;

fn gyro_states() -> Vec<String> {
    GYRO_STATES.iter().map(|s| (*s).to_owned()).collect()
}

fn tree() -> Layer {
    let mut glass = Layer::new("glass", "Glass", LayerKind::LiquidGlass)
        .with_position(50.0, 50.0)
        .with_size(100.0, 100.0);
    glass.corner_radius = 20.0;
    let mut card = Layer::new("card", "Card", LayerKind::Shape)
        .with_position(10.0, 20.0)
        .with_size(100.0, 50.0);
    card.opacity = 0.75;
    Layer::new("root", "Root", LayerKind::Transform)
        .with_size(390.0, 844.0)
        .with_child(card)
        .with_child(glass)
}

fn value_of(table: &StateOverrides, state: &str, id: &str, key: &str) -> Option<f64> {
    find_override(table.get(state)?, id, key)?.value.as_number()
}

#[test]
fn single_state_override_is_filled_into_all_states() {
    let mut overrides = StateOverrides::new();
    overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![StateOverride::new("card", KEY_OPACITY, 0.2)],
    );
    let table = repair_overrides(&gyro_states(), &overrides, &tree());
    assert_eq!(value_of(&table, STATE_LOCKED, "card", KEY_OPACITY), Some(0.2));
    assert_eq!(value_of(&table, STATE_UNLOCK, "card", KEY_OPACITY), Some(0.75));
    assert_eq!(value_of(&table, STATE_SLEEP, "card", KEY_OPACITY), Some(0.75));
}

#[test]
fn repair_skips_unknown_targets_and_key_paths() {
    let mut overrides = StateOverrides::new();
    overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![
            StateOverride::new("ghost", KEY_OPACITY, 0.2),
            StateOverride::new("card", "backgroundColor", "#ff0000"),
        ],
    );
    let table = repair_overrides(&gyro_states(), &overrides, &tree());
    assert!(table[STATE_UNLOCK].is_empty());
    assert_eq!(table[STATE_LOCKED].len(), 2);
}

#[test]
fn repair_drops_the_base_state() {
    let mut overrides = StateOverrides::new();
    overrides.insert(BASE_STATE.to_owned(), vec![StateOverride::new("card", KEY_OPACITY, 0.1)]);
    let table = repair_overrides(&gyro_states(), &overrides, &tree());
    assert!(!table.contains_key(BASE_STATE));
    assert!(table.values().all(Vec::is_empty));
}

#[test]
fn glass_width_override_reaches_synthetic_layers() {
    let mut overrides = StateOverrides::new();
    overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![StateOverride::new("glass", KEY_WIDTH, 120.0)],
    );
    let table = propagate_liquid_glass(&overrides, &tree());
    for id in ["glass_sdfLayer", "glass_elementLayer"] {
        assert_eq!(value_of(&table, STATE_LOCKED, id, KEY_WIDTH), Some(120.0));
        assert_eq!(value_of(&table, STATE_LOCKED, id, KEY_POSITION_X), Some(60.0));
    }
}

#[test]
fn glass_corner_radius_reaches_the_element_only() {
    let mut overrides = StateOverrides::new();
    overrides.insert(
        STATE_SLEEP.to_owned(),
        vec![StateOverride::new("glass", KEY_CORNER_RADIUS, 30.0)],
    );
    let table = propagate_liquid_glass(&overrides, &tree());
    assert_eq!(
        value_of(&table, STATE_SLEEP, "glass_elementLayer", KEY_CORNER_RADIUS),
        Some(30.0)
    );
    assert_eq!(
        value_of(&table, STATE_SLEEP, "glass_sdfLayer", KEY_CORNER_RADIUS),
        None
    );
}

#[test]
fn corner_radius_is_clamped_per_state_size() {
    let mut overrides = StateOverrides::new();
    overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![
            StateOverride::new("card", KEY_CORNER_RADIUS, 40.0),
            StateOverride::new("card", KEY_HEIGHT, 30.0),
        ],
    );
    overrides.insert(
        STATE_UNLOCK.to_owned(),
        vec![StateOverride::new("card", KEY_CORNER_RADIUS, 40.0)],
    );
    let table = clamp_state_corner_radii(&overrides, &tree());
    assert_eq!(value_of(&table, STATE_LOCKED, "card", KEY_CORNER_RADIUS), Some(15.0));
    assert_eq!(value_of(&table, STATE_UNLOCK, "card", KEY_CORNER_RADIUS), Some(25.0));
}

#[test]
fn synced_video_gets_per_state_frames() {
    let video = VideoLayer {
        frame_count: 10,
        frame_prefix: "clip_".to_owned(),
        sync_with_state: true,
        state_frame_modes: [(STATE_SLEEP.to_owned(), crate::model::layer::FrameMode::End)]
            .into_iter()
            .collect(),
        ..VideoLayer::default()
    };
    let root = Layer::new("root", "Root", LayerKind::Transform)
        .with_child(Layer::new("v", "Video", LayerKind::Video(video)));
    let table = sync_video_contents(&gyro_states(), &StateOverrides::new(), &root);
    let contents = |state: &str| {
        find_override(&table[state], "v", KEY_CONTENTS).map(|o| o.value.clone())
    };
    assert_eq!(contents(STATE_LOCKED), Some(OverrideValue::from("assets/clip_0.png")));
    assert_eq!(contents(STATE_SLEEP), Some(OverrideValue::from("assets/clip_9.png")));
}

#[test]
fn effective_states_fall_back_to_gyro_set_and_append_extra_keys() {
    let mut doc = CamlDocument::new(tree(), ProjectMeta { gyro: true, ..ProjectMeta::default() });
    doc.states.clear();
    doc.overrides.insert("Custom".to_owned(), Vec::new());
    assert_eq!(
        effective_states(&doc),
        vec!["Locked", "Unlock", "Sleep", "Custom"]
    );
}

#[test]
fn pipeline_repairs_derived_glass_entries() {
    let mut doc = CamlDocument::new(tree(), ProjectMeta { gyro: true, ..ProjectMeta::default() });
    doc.overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![StateOverride::new("glass", KEY_WIDTH, 120.0)],
    );
    let (states, table) = prepare_overrides(&doc);
    assert_eq!(states.len(), 3);
    assert_eq!(
        value_of(&table, STATE_UNLOCK, "glass_sdfLayer", KEY_WIDTH),
        Some(100.0)
    );
    assert_eq!(
        value_of(&table, STATE_UNLOCK, "glass_elementLayer", KEY_POSITION_X),
        Some(50.0)
    );
    assert_eq!(value_of(&table, STATE_SLEEP, "glass", KEY_WIDTH), Some(100.0));
}

#[test]
fn shrinking_a_rounded_layer_adds_a_clamped_radius_to_that_state() {
    let mut tile = Layer::new("tile", "Tile", LayerKind::Shape).with_size(100.0, 100.0);
    tile.corner_radius = 40.0;
    let root = Layer::new("root", "Root", LayerKind::Transform).with_child(tile);
    let mut doc = CamlDocument::new(root, ProjectMeta { gyro: true, ..ProjectMeta::default() });
    doc.overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![StateOverride::new("tile", KEY_WIDTH, 20.0)],
    );
    let (_, table) = prepare_overrides(&doc);
    assert_eq!(value_of(&table, STATE_LOCKED, "tile", KEY_CORNER_RADIUS), Some(10.0));
    assert_eq!(value_of(&table, STATE_UNLOCK, "tile", KEY_CORNER_RADIUS), Some(40.0));
    assert_eq!(value_of(&table, STATE_SLEEP, "tile", KEY_CORNER_RADIUS), Some(40.0));
}

#[test]
fn radius_is_left_alone_when_the_state_size_still_fits_it() {
    let mut overrides = StateOverrides::new();
    overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![StateOverride::new("glass", KEY_WIDTH, 60.0)],
    );
    overrides.insert(
        STATE_SLEEP.to_owned(),
        vec![
            StateOverride::new("glass", KEY_WIDTH, 10.0),
            StateOverride::new("glass", KEY_CORNER_RADIUS, 3.0),
        ],
    );
    let table = add_state_corner_radii(&overrides, &tree());
    assert_eq!(value_of(&table, STATE_LOCKED, "glass", KEY_CORNER_RADIUS), None);
    assert_eq!(table[STATE_SLEEP].len(), 2);
}

fn arb_overrides() -> impl Strategy<Value = StateOverrides> {
    let entry = (
        prop::sample::select(vec!["card", "glass", "root", "ghost"]),
        prop::sample::select(vec![KEY_OPACITY, KEY_WIDTH, KEY_POSITION_X, KEY_ROTATION_Z]),
        -100.0f64..100.0,
    )
        .prop_map(|(id, key, v)| StateOverride::new(id, key, v));
    prop::collection::btree_map(
        prop::sample::select(vec![STATE_LOCKED, STATE_UNLOCK, STATE_SLEEP]).prop_map(str::to_owned),
        prop::collection::vec(entry, 0..5),
        0..3,
    )
}

proptest! {
    #[test]
    fn repair_is_idempotent(overrides in arb_overrides()) {
        let states = gyro_states();
        let root = tree();
        let once = repair_overrides(&states, &overrides, &root);
        let twice = repair_overrides(&states, &once, &root);
        prop_assert_eq!(once, twice);
    }
}
