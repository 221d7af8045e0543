//! Dump Round-Trip Tests
//!
//! The dump format doubles as a valid YAML input. Feeding a dump back
//! through resolution must reproduce the same configuration tree.

use okvm_config::{make_config_dump, resolve};
use okvmd::app::scheme;
use serde_json::json;

#[test]
fn test_dump_reparses_to_equal_config() {
    let scheme = scheme::base_scheme(&["okvmd"]);
    let first = resolve(&json!({}), &scheme).unwrap();

    let dump = make_config_dump(&first);
    let reparsed: serde_json::Value = serde_yaml::from_str(&dump).unwrap();
    let second = resolve(&reparsed, &scheme).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_dump_reparses_after_overrides() {
    let scheme = scheme::base_scheme(&["okvmd"]);
    let raw = json!({
        "okvmd": {
            "streamer": {"quality": 25, "desired_fps": 30},
        },
    });
    let first = resolve(&raw, &scheme).unwrap();

    let dump = make_config_dump(&first);
    let reparsed: serde_json::Value = serde_yaml::from_str(&dump).unwrap();
    let second = resolve(&reparsed, &scheme).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_dump_annotates_changed_and_documented_values() {
    let scheme = scheme::base_scheme(&["okvmd"]);
    let raw = json!({
        "okvmd": {
            "streamer": {"quality": 25},
        },
    });
    let config = resolve(&raw, &scheme).unwrap();
    let dump = make_config_dump(&config);

    // Changed values keep the declared default in a comment line above.
    assert!(dump.contains("# quality: 80  # JPEG quality percent"));
    assert!(dump.contains("quality: 25"));
    // Untouched documented values carry only the help suffix.
    assert!(dump.contains("desired_fps: 0  # 0 means unlimited"));
}
