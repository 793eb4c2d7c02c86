use quilt_graph::Properties;
use serde_json::json;

#[test]
fn repeated_keys_get_numbered_slots() {
    let mut props = Properties::new();
    assert_eq!(props.append("NAME", "John /Smith/"), "NAME");
    assert_eq!(props.append("NAME", "Johnny"), "NAME.2");
    assert_eq!(props.append("NAME", "Jack"), "NAME.3");

    assert_eq!(props.get_str("NAME.2"), Some("Johnny"));
    let all: Vec<_> = props.all("NAME").into_iter().cloned().collect();
    assert_eq!(all, vec![json!("John /Smith/"), json!("Johnny"), json!("Jack")]);
}

#[test]
fn set_nth_addresses_the_bare_key_for_zero_and_one() {
    let mut props = Properties::new();
    props.set_nth("BIRT", "1901", 0);
    assert_eq!(props.get_str("BIRT"), Some("1901"));
    props.set_nth("BIRT", "1902", 1);
    assert_eq!(props.get_str("BIRT"), Some("1902"));
    props.set_nth("BIRT", "1903", 2);
    assert_eq!(props.get_str("BIRT.2"), Some("1903"));
    assert_eq!(props.len(), 2);
}

#[test]
fn remove_drops_every_repetition() {
    let mut props = Properties::new();
    props.append("NOTE", "a");
    props.append("NOTE", "b");
    props.append("SEX", "M");
    assert_eq!(props.remove("NOTE"), Some(json!("a")));
    assert!(props.get("NOTE.2").is_none());
    assert_eq!(props.len(), 1);
    assert_eq!(props.remove("NOTE"), None);
}

#[test]
fn serializes_as_a_plain_object() {
    let mut props = Properties::new();
    props.append("SEX", "F");
    props.append("BIRT", json!({ "DATE": "1 JAN 1900" }));
    let value = serde_json::to_value(&props).unwrap();
    assert_eq!(value, json!({ "BIRT": { "DATE": "1 JAN 1900" }, "SEX": "F" }));

    let back: Properties = serde_json::from_value(value).unwrap();
    assert_eq!(back, props);
}

#[test]
fn iter_is_lexical_while_all_keeps_slot_order() {
    let mut props = Properties::new();
    for i in 1..=11 {
        props.append("NAME", format!("name {i}"));
    }

    let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
    assert_eq!(&keys[..4], ["NAME", "NAME.10", "NAME.11", "NAME.2"]);
    assert_eq!(keys.last(), Some(&"NAME.9"));

    let all: Vec<_> = props.all("NAME").into_iter().cloned().collect();
    let expected: Vec<_> = (1..=11).map(|i| json!(format!("name {i}"))).collect();
    assert_eq!(all, expected);
}
