use form::{ElementKind, ElementTree, ObjError};
use form_test_support::{assert_links_consistent, obj, sample_form};
use serde_json::{Value, json};

#[test]
fn to_obj_writes_name_and_class() {
    let mut tree = ElementTree::new();
    let element = tree.create_named("testName");

    assert_eq!(
        Value::Object(tree.to_obj(element, &[]).unwrap()),
        json!({"@class": "FormElement", "name": "testName"})
    );
}

#[test]
fn to_obj_nests_prototype_and_extensions() {
    let mut tree = ElementTree::new();
    let element = tree.create_named("testName");
    let proto = tree.create_named("testSubName");
    tree.set_prototype(element, Some(proto)).unwrap();

    assert_eq!(
        Value::Object(tree.to_obj(element, &[]).unwrap()),
        json!({
            "@class": "FormElement",
            "name": "testName",
            "prototype": {"@class": "FormElement", "name": "testSubName"}
        })
    );

    let more = tree.more_mut(element).unwrap();
    more.insert("attribute1".into(), json!("attribute1"));
    more.insert("attribute2".into(), json!("attribute2"));

    assert_eq!(
        Value::Object(tree.to_obj(element, &[]).unwrap()),
        json!({
            "@class": "FormElement",
            "name": "testName",
            "prototype": {"@class": "FormElement", "name": "testSubName"},
            "more": {"attribute1": "attribute1", "attribute2": "attribute2"}
        })
    );
}

#[test]
fn to_obj_omits_excluded_keys() {
    let mut tree = ElementTree::new();
    let element = tree.create_gap();
    tree.set_widget(element, Some(json!({"a": "a"}))).unwrap();

    let with_widget = tree.to_obj(element, &[]).unwrap();
    assert_eq!(with_widget.get("widget"), Some(&json!({"a": "a"})));

    let without = tree.to_obj(element, &["widget"]).unwrap();
    assert!(without.get("widget").is_none());
    assert_eq!(Value::Object(without), json!({"@class": "FormElement"}));
}

#[test]
fn to_obj_writes_field_value_kind_and_form_class() {
    let mut tree = ElementTree::new();
    let f = sample_form(&mut tree);

    assert_eq!(
        Value::Object(tree.to_obj(f.field1, &[]).unwrap()),
        json!({"@class": "Field", "name": "field1", "valueType": "string"})
    );
    assert_eq!(
        Value::Object(tree.to_obj(f.form, &[]).unwrap()),
        json!({"@class": "Form"})
    );
}

#[test]
fn to_obj_never_writes_links() {
    let mut tree = ElementTree::new();
    let f = sample_form(&mut tree);

    let form = tree.to_obj(f.form, &[]).unwrap();
    let nested = tree.to_obj(f.form_element1, &[]).unwrap();

    for o in [&form, &nested] {
        assert!(o.get("children").is_none());
        assert!(o.get("parent").is_none());
    }
}

#[test]
fn from_obj_transfers_all_properties() {
    let mut tree = ElementTree::new();
    let input = obj(json!({
        "@class": "FormElement",
        "name": "testName",
        "prototype": {"@class": "FormElement", "name": "testSubName"},
        "widget": {"@class": "Widget", "invisible": true},
        "more": {"attribute1": "attribute1", "attribute2": "attribute2"}
    }));

    let element = tree.from_obj(&input).unwrap();

    assert_eq!(tree.kind(element), Some(&ElementKind::Element));
    assert_eq!(tree.name(element), Some("testName"));
    let proto = tree.prototype(element).unwrap();
    assert_eq!(tree.kind(proto), Some(&ElementKind::Element));
    assert_eq!(tree.name(proto), Some("testSubName"));
    assert_eq!(tree.widget(element).unwrap()["invisible"], json!(true));
    let more = tree.more(element).unwrap();
    assert_eq!(more["attribute1"], json!("attribute1"));
    assert_eq!(more["attribute2"], json!("attribute2"));
    assert_eq!(tree.parent(element), None);
    assert_eq!(tree.parent(proto), None);
}

#[test]
fn round_trip_reproduces_element() {
    let mut tree = ElementTree::new();
    let field = tree.create_field("number", "age");
    let proto = tree.create_form();
    tree.set_name(proto, Some("template")).unwrap();
    tree.set_prototype(field, Some(proto)).unwrap();
    tree.set_widget(field, Some(json!({"kind": "slider", "max": 120})))
        .unwrap();
    tree.more_mut(field)
        .unwrap()
        .insert("validators".into(), json!(["min:0"]));

    let first = tree.to_obj(field, &[]).unwrap();
    let copy = tree.from_obj(&first).unwrap();

    assert_ne!(copy, field);
    assert_eq!(tree.kind(copy), Some(&ElementKind::field("number")));
    assert_eq!(tree.name(copy), Some("age"));
    let copy_proto = tree.prototype(copy).unwrap();
    assert_ne!(copy_proto, proto);
    assert_eq!(tree.kind(copy_proto), Some(&ElementKind::Form));
    assert_eq!(tree.name(copy_proto), Some("template"));
    assert_eq!(tree.widget(copy), tree.widget(field));
    assert_eq!(tree.more(copy), tree.more(field));
    assert_eq!(tree.to_obj(copy, &[]).unwrap(), first);
}

#[test]
fn rebuilt_extensions_are_a_copy() {
    let mut tree = ElementTree::new();
    let source = obj(json!({"@class": "FormElement", "more": {"k": "v"}}));
    let a = tree.from_obj(&source).unwrap();
    let b = tree.from_obj(&source).unwrap();

    tree.more_mut(a).unwrap().insert("k".into(), json!("changed"));

    assert_eq!(tree.more(b).unwrap()["k"], json!("v"));
    assert_eq!(source["more"]["k"], json!("v"));
}

#[test]
fn tree_obj_round_trips_whole_subtree() {
    let mut tree = ElementTree::new();
    let f = sample_form(&mut tree);
    let gap = tree.create_gap();
    tree.add(f.form_element2, &[gap]).unwrap();

    let saved = tree.to_tree_obj(f.form, &[]).unwrap();
    assert_eq!(
        Value::Object(saved.clone()),
        json!({
            "@class": "Form",
            "children": [
                {"@class": "Field", "name": "field1", "valueType": "string"},
                {"@class": "FormElement", "name": "formElement1", "children": [
                    {"@class": "Field", "name": "field2", "valueType": "string"}
                ]},
                {"@class": "FormElement", "name": "formElement2", "children": [
                    {"@class": "FormElement"}
                ]}
            ]
        })
    );

    let copy = tree.from_obj(&saved).unwrap();
    assert_eq!(tree.parent(copy), None);
    assert_eq!(tree.children(copy).len(), 3);
    let field2 = tree.find(copy, "formElement1.field2").unwrap();
    assert_eq!(tree.path(field2), "formElement1.field2");
    assert_eq!(tree.to_tree_obj(copy, &[]).unwrap(), saved);
    assert_links_consistent(&tree);
}

#[test]
fn unknown_class_is_reported() {
    let mut tree = ElementTree::new();
    let before = tree.len();

    assert_eq!(
        tree.from_obj(&obj(json!({"@class": "Widget", "name": "x"}))),
        Err(ObjError::UnknownClass("Widget".into()))
    );
    assert_eq!(
        tree.from_obj(&obj(json!({"name": "x"}))),
        Err(ObjError::MissingClass)
    );
    assert_eq!(tree.len(), before);
}

#[test]
fn malformed_fields_are_reported() {
    let mut tree = ElementTree::new();

    assert_eq!(
        tree.from_obj(&obj(json!({"@class": "FormElement", "name": 3}))),
        Err(ObjError::InvalidField {
            key: "name",
            expected: "a string"
        })
    );
    assert_eq!(
        tree.from_obj(&obj(json!({"@class": "FormElement", "more": [1]}))),
        Err(ObjError::InvalidField {
            key: "more",
            expected: "an object"
        })
    );
    assert_eq!(
        tree.from_obj(&obj(json!({"@class": "FormElement", "prototype": "p"}))),
        Err(ObjError::InvalidField {
            key: "prototype",
            expected: "an object"
        })
    );
    assert!(tree.is_empty());
}

#[test]
fn prototype_cycles_are_reported() {
    let mut tree = ElementTree::new();
    let a = tree.create_named("a");
    let b = tree.create_named("b");
    tree.set_prototype(a, Some(b)).unwrap();
    tree.set_prototype(b, Some(a)).unwrap();

    assert_eq!(tree.to_obj(a, &[]), Err(ObjError::PrototypeCycle(a)));
    assert_eq!(
        Value::Object(tree.to_obj(a, &["prototype"]).unwrap()),
        json!({"@class": "FormElement", "name": "a"})
    );
}

#[test]
fn serialized_form_survives_json_text() {
    let mut tree = ElementTree::new();
    let f = sample_form(&mut tree);

    let text = serde_json::to_string(&tree.to_tree_obj(f.form, &[]).unwrap()).unwrap();
    assert!(text.starts_with(r#"{"@class":"Form","children":[{"@class":"Field""#));

    let parsed: form::Obj = serde_json::from_str(&text).unwrap();
    let copy = tree.from_obj(&parsed).unwrap();
    assert!(tree.find(copy, "formElement2").is_some());
}

#[test]
fn null_widget_survives_round_trip() {
    let mut tree = ElementTree::new();
    let element = tree.create_named("a");
    tree.set_widget(element, Some(Value::Null)).unwrap();

    let first = tree.to_obj(element, &[]).unwrap();
    assert_eq!(
        Value::Object(first.clone()),
        json!({"@class": "FormElement", "name": "a", "widget": null})
    );

    let copy = tree.from_obj(&first).unwrap();
    assert_eq!(tree.widget(copy), Some(&Value::Null));
    assert_eq!(tree.to_obj(copy, &[]).unwrap(), first);
}

#[test]
fn shared_prototype_is_not_a_cycle() {
    let mut tree = ElementTree::new();
    let root = tree.create_form();
    let proto = tree.create_named("template");
    let a = tree.create_named("a");
    let b = tree.create_named("b");
    tree.set_prototype(a, Some(proto)).unwrap();
    tree.set_prototype(b, Some(proto)).unwrap();
    tree.add(root, &[a, b]).unwrap();

    let saved = tree.to_tree_obj(root, &[]).unwrap();
    assert_eq!(saved["children"][1]["prototype"]["name"], json!("template"));
}

#[test]
fn ancestor_as_prototype_is_a_cycle_in_tree_form() {
    let mut tree = ElementTree::new();
    let root = tree.create_named("root");
    let child = tree.create_named("child");
    tree.add(root, &[child]).unwrap();
    tree.set_prototype(child, Some(root)).unwrap();

    assert_eq!(tree.to_tree_obj(root, &[]), Err(ObjError::PrototypeCycle(root)));
    assert!(tree.to_obj(root, &[]).is_ok());
}

#[test]
fn deep_chain_serializes_in_tree_form() {
    let mut tree = ElementTree::new();
    let root = tree.create_named("n0");
    let mut tip = root;
    for depth in 1..500 {
        let next = tree.create_named(&format!("n{depth}"));
        tree.add(tip, &[next]).unwrap();
        tip = next;
    }

    let saved = tree.to_tree_obj(root, &[]).unwrap();
    assert_eq!(saved["name"], json!("n0"));
    assert_eq!(saved["children"][0]["children"][0]["name"], json!("n2"));
}
