use super::*;
use crate::model::layer::{Layer, LayerKind, VideoLayer};
use crate::model::states::{
    KEY_OPACITY, KEY_POSITION_X, KEY_ROTATION_Z, KEY_WIDTH, ParallaxAxis, ParallaxDict, ParallaxKeyPath,
    STATE_LOCKED, StateOverride,
};

fn parse(xml: &str) -> roxmltree::Document<'_> {
    roxmltree::Document::parse(xml).unwrap()
}

fn element<'a, 'i>(doc: &'a roxmltree::Document<'i>, id: &str) -> roxmltree::Node<'a, 'i> {
    doc.descendants()
        .find(|n| n.attribute("id") == Some(id))
        .unwrap()
}

fn plain_doc(children: Vec<Layer>) -> CamlDocument {
    let mut root = Layer::new("root", "Root", LayerKind::Transform)
        .with_position(195.0, 422.0)
        .with_size(390.0, 844.0);
    root.children = children;
    CamlDocument::new(root, ProjectMeta::default())
}

fn gyro_doc(children: Vec<Layer>) -> CamlDocument {
    let mut doc = plain_doc(children);
    doc.project.gyro = true;
    doc.states = crate::model::states::GYRO_STATES
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    doc
}

#[test]
fn corner_radius_is_clamped_to_half_the_short_side() {
    let mut card = Layer::new("card", "Card", LayerKind::Shape).with_size(100.0, 50.0);
    card.corner_radius = 40.0;
    let xml = encode(&plain_doc(vec![card])).unwrap();
    let doc = parse(&xml);
    assert_eq!(element(&doc, "card").attribute("cornerRadius"), Some("25"));
}

#[test]
fn state_sizes_clamp_the_base_corner_radius() {
    let mut tile = Layer::new("tile", "Tile", LayerKind::Shape).with_size(100.0, 100.0);
    tile.corner_radius = 40.0;
    let mut doc = gyro_doc(vec![tile]);
    doc.overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![StateOverride::new("tile", KEY_WIDTH, 20.0)],
    );
    let xml = encode(&doc).unwrap();
    let parsed = parse(&xml);
    let radius_in = |state: &str| {
        parsed
            .descendants()
            .find(|n| n.has_tag_name("LKState") && n.attribute("name") == Some(state))
            .and_then(|s| {
                s.descendants().find(|n| {
                    n.attribute("targetId") == Some("tile")
                        && n.attribute("keyPath") == Some("cornerRadius")
                })
            })
            .and_then(|set| set.descendants().find(|n| n.has_tag_name("value")))
            .and_then(|v| v.attribute("value"))
            .map(str::to_owned)
    };
    assert_eq!(radius_in(STATE_LOCKED).as_deref(), Some("10"));
    assert_eq!(radius_in("Unlock").as_deref(), Some("40"));
}

#[test]
fn non_gyro_documents_are_wrapped() {
    let xml = encode(&plain_doc(Vec::new())).unwrap();
    let doc = parse(&xml);
    let caml = doc.root_element();
    assert_eq!(caml.tag_name().name(), "caml");
    assert_eq!(caml.tag_name().namespace(), Some(CAML_NAMESPACE));

    let top = caml.first_element_child().unwrap();
    assert_eq!(top.attribute("id"), Some(WRAPPER_ROOT_ID));
    assert_eq!(top.attribute("bounds"), Some("0 0 390 844"));
    assert_eq!(top.attribute("position"), Some("195 422"));
    assert_eq!(top.attribute("geometryFlipped"), Some("0"));
    assert_eq!(element(&doc, "root").tag_name().name(), "CATransformLayer");
}

#[test]
fn gyro_documents_are_not_wrapped_and_carry_parallax() {
    let mut doc = gyro_doc(Vec::new());
    doc.parallax.push(ParallaxDict {
        axis: ParallaxAxis::Y,
        image: String::new(),
        key_path: ParallaxKeyPath::PositionY,
        layer_name: "Root".to_owned(),
        map_min_to: -12.5,
        map_max_to: 12.5,
        title: String::new(),
        view: String::new(),
    });
    let xml = encode(&doc).unwrap();
    let parsed = parse(&xml);
    let top = parsed.root_element().first_element_child().unwrap();
    assert_eq!(top.attribute("id"), Some("root"));
    assert!(xml.contains(r#"<mapMinTo type="real" value="-12.5"/>"#));
    let states: Vec<_> = parsed
        .descendants()
        .filter(|n| n.has_tag_name("LKState"))
        .filter_map(|n| n.attribute("name"))
        .collect();
    assert_eq!(states, vec!["Locked", "Unlock", "Sleep"]);
}

#[test]
fn default_transitions_fill_an_empty_table() {
    let xml = encode(&gyro_doc(Vec::new())).unwrap();
    let parsed = parse(&xml);
    let count = parsed
        .descendants()
        .filter(|n| n.has_tag_name("LKStateTransition"))
        .count();
    assert_eq!(count, 6);
}

#[test]
fn duplicate_ids_are_rejected_unless_validation_is_off() {
    let doc = plain_doc(vec![
        Layer::new("dup", "A", LayerKind::Shape),
        Layer::new("dup", "B", LayerKind::Shape),
    ]);
    let err = encode(&doc).unwrap_err();
    assert!(matches!(err, CamlError::Validation(_)));

    let opts = EncodeOptions {
        validate: false,
        ..EncodeOptions::default()
    };
    assert!(encode_with(&doc, &opts).is_ok());
}

#[test]
fn out_of_range_opacity_only_warns() {
    let mut layer = Layer::new("a", "A", LayerKind::Shape);
    layer.opacity = 2.0;
    assert!(encode(&plain_doc(vec![layer])).is_ok());
}

#[test]
fn banner_and_indent_are_applied() {
    let opts = EncodeOptions {
        indent: 4,
        banner: Some("generated".to_owned()),
        validate: true,
    };
    let xml = encode_with(&plain_doc(Vec::new()), &opts).unwrap();
    assert!(xml.contains("<!-- generated -->"));
    assert!(xml.contains("\n    <CALayer id=\"__capRootLayer__\""));
}

#[test]
fn state_values_are_written_in_wire_units() {
    let a = Layer::new("a", "A", LayerKind::Shape).with_position(10.0, 10.0);
    let mut doc = gyro_doc(vec![a]);
    doc.overrides.insert(
        STATE_LOCKED.to_owned(),
        vec![
            StateOverride::new("a", KEY_ROTATION_Z, 90.0),
            StateOverride::new("a", KEY_POSITION_X, 12.6),
            StateOverride::new("a", KEY_OPACITY, 0.5),
        ],
    );
    let xml = encode(&doc).unwrap();
    let parsed = parse(&xml);
    let locked = parsed
        .descendants()
        .find(|n| n.has_tag_name("LKState") && n.attribute("name") == Some("Locked"))
        .unwrap();
    let value_of = |key: &str| {
        let set = locked
            .descendants()
            .find(|n| n.has_tag_name("LKStateSetValue") && n.attribute("keyPath") == Some(key))
            .unwrap();
        let value = set.first_element_child().unwrap();
        (
            value.attribute("type").unwrap().to_owned(),
            value.attribute("value").unwrap().to_owned(),
        )
    };
    assert_eq!(value_of(KEY_ROTATION_Z), ("real".to_owned(), "1.5707963268".to_owned()));
    assert_eq!(value_of(KEY_POSITION_X), ("integer".to_owned(), "13".to_owned()));
    assert_eq!(value_of(KEY_OPACITY), ("real".to_owned(), "0.5".to_owned()));

    // Repaired into the other states from the live layer.
    let sleep_pairs = parsed
        .descendants()
        .find(|n| n.has_tag_name("LKState") && n.attribute("name") == Some("Sleep"))
        .unwrap()
        .descendants()
        .filter(|n| n.has_tag_name("LKStateSetValue"))
        .count();
    assert_eq!(sleep_pairs, 3);
}

#[test]
fn liquid_glass_gets_synthetic_sublayers_only() {
    let mut glass = Layer::new("g", "Glass", LayerKind::LiquidGlass)
        .with_position(60.0, 30.0)
        .with_size(120.0, 60.0)
        .with_child(Layer::new("stray", "Stray", LayerKind::Shape));
    glass.corner_radius = 100.0;
    let xml = encode(&plain_doc(vec![glass])).unwrap();
    let parsed = parse(&xml);

    let g = element(&parsed, "g");
    assert_eq!(g.tag_name().name(), "CABackdropLayer");
    assert_eq!(g.attribute("liquidGlass"), Some("1"));
    assert!(parsed.descendants().all(|n| n.attribute("id") != Some("stray")));

    let sdf = element(&parsed, "g_sdfLayer");
    assert_eq!(sdf.tag_name().name(), "CASDFLayer");
    assert_eq!(sdf.attribute("position"), Some("60 30"));
    let el = element(&parsed, "g_elementLayer");
    assert_eq!(el.attribute("cornerRadius"), Some("30"));
}

#[test]
fn unsynced_video_cycles_frames_and_synced_video_uses_states() {
    let video = VideoLayer {
        frame_count: 2,
        fps: 10.0,
        frame_prefix: "f".to_owned(),
        ..VideoLayer::default()
    };
    let layer = Layer::new("v", "Video", LayerKind::Video(video.clone()));
    let xml = encode(&plain_doc(vec![layer])).unwrap();
    assert!(xml.contains(r#"keyPath="contents""#));
    assert!(xml.contains(r#"<CGImage src="assets/f1.png"/>"#));
    assert!(xml.contains(r#"duration="0.2""#));

    let synced = VideoLayer {
        sync_with_state: true,
        ..video
    };
    let layer = Layer::new("v", "Video", LayerKind::Video(synced));
    let xml = encode(&gyro_doc(vec![layer])).unwrap();
    assert!(!xml.contains(r#"keyPath="contents" calculationMode"#));
    let parsed = parse(&xml);
    let contents = parsed
        .descendants()
        .filter(|n| n.has_tag_name("LKStateSetValue") && n.attribute("keyPath") == Some("contents"))
        .count();
    assert_eq!(contents, 3);
}
