use ludo_api_core::{color_property, scale_property, Rgba, Scale, Value};
use ludo_runtime_core::model::AttributeSchema;
use ludo_runtime_core::registry::ModelType;

fn label_type() -> ModelType {
    ModelType::new(
        "label",
        AttributeSchema::new()
            .property(scale_property("scale"))
            .property(color_property("color")),
    )
}

fn pairs(kv: &[(&str, Value)]) -> Vec<(String, Value)> {
    kv.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
}

/// it should reproduce loaded keys in insertion order, excluding name, with colors stringified
#[test]
fn export_reproduces_loaded_keys_in_order() {
    let mut m = label_type().instantiate();
    m.load(&pairs(&[
        ("name", Value::text("title")),
        ("X", Value::f(120.0)),
        ("color", Value::text("rgba(10,20,30,0.5)")),
        ("scale", Value::text("2.0,3.5")),
    ]))
    .unwrap();

    let (name, attrs) = m.export();
    assert_eq!(name, "title");

    let keys: Vec<&str> = attrs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["x", "color", "scale"]);

    assert_eq!(attrs[0].1, Value::f(120.0));
    assert_eq!(attrs[1].1, Value::text("rgba(10,20,30,0.5)"));
    assert_eq!(attrs[2].1, Value::Scale(Scale::new(2.0, 3.5)));
}

/// it should reconstruct an equivalent model from its own export
#[test]
fn export_then_load_round_trips() {
    let mut m = label_type().instantiate();
    m.load(&pairs(&[
        ("name", Value::text("title")),
        ("x", Value::f(7.0)),
        ("color", Value::text("rgba(10,20,30,0.5)")),
        ("scale", Value::text("2.0,3.5")),
    ]))
    .unwrap();

    let (_, attrs) = m.export();
    let mut m2 = label_type().instantiate();
    m2.load(&attrs).unwrap();

    assert_eq!(m2.get("x"), Some(&Value::f(7.0)));
    assert_eq!(
        m2.get("color"),
        Some(&Value::Color(Rgba::new(10.0, 20.0, 30.0, 0.5)))
    );
    assert_eq!(m2.get("scale"), m.get("scale"));
}

/// it should keep a re-loaded key at its original position with the new value
#[test]
fn duplicate_key_overwrites_without_reordering() {
    let mut m = label_type().instantiate();
    m.load(&pairs(&[
        ("x", Value::f(1.0)),
        ("y", Value::f(2.0)),
        ("x", Value::f(9.0)),
    ]))
    .unwrap();

    assert_eq!(m.loaded_keys(), ["x", "y"]);
    assert_eq!(m.get("x"), Some(&Value::f(9.0)));
}

/// it should normalize hyphenated and cased keys to snake_case
#[test]
fn keys_are_normalized_on_load() {
    let mut m = label_type().instantiate();
    m.load(&pairs(&[("Image-Path", Value::text("logo.png"))]))
        .unwrap();

    assert_eq!(m.loaded_keys(), ["image_path"]);
    assert_eq!(m.get("image_path"), Some(&Value::text("logo.png")));
    // lookup normalizes too
    assert_eq!(m.get("Image-Path"), Some(&Value::text("logo.png")));
}

/// it should transfer state between instances of a compatible shape via save
#[test]
fn save_transfers_state() {
    let mut a = label_type().instantiate();
    a.load(&pairs(&[
        ("name", Value::text("a")),
        ("x", Value::f(3.0)),
        ("scale", Value::text("2.0,2.0")),
    ]))
    .unwrap();

    let mut b = label_type().instantiate();
    b.load(&a.save()).unwrap();
    assert_eq!(b.save(), a.save());
}

/// it should fill an absent mandatory attribute from its default
#[test]
fn mandatory_attribute_defaults_when_absent() {
    let ty = ModelType::new(
        "label",
        AttributeSchema::new()
            .property(scale_property("scale"))
            .mandatory("scale"),
    );
    let mut m = ty.instantiate();
    m.load(&pairs(&[("x", Value::f(0.0))])).unwrap();
    assert_eq!(m.get("scale"), Some(&Value::Scale(Scale::default())));
}

/// it should abort the load when a mandatory attribute fails coercion
#[test]
fn mandatory_attribute_failure_is_fatal() {
    let ty = ModelType::new(
        "label",
        AttributeSchema::new()
            .property(scale_property("scale"))
            .mandatory("scale"),
    );
    let mut m = ty.instantiate();
    let err = m.load(&pairs(&[("scale", Value::text("not-a-scale"))]));
    assert!(err.is_err());
}

/// it should skip an optional attribute that fails coercion instead of aborting
#[test]
fn optional_attribute_failure_is_skipped() {
    let mut m = label_type().instantiate();
    m.load(&pairs(&[
        ("scale", Value::text("not-a-scale")),
        ("x", Value::f(5.0)),
    ]))
    .unwrap();
    assert_eq!(m.get("scale"), None);
    assert_eq!(m.get("x"), Some(&Value::f(5.0)));
}

/// it should fall back to the type name when no name attribute is loaded
#[test]
fn name_falls_back_to_type_name() {
    let m = label_type().instantiate();
    assert_eq!(m.name(), "label");
}
