//! Integration tests for Settings layered loading.
//!
//! Env overrides are tested with explicit variable maps, the process environment
//! is never modified.

use std::fs;

use config::Map;
use tempfile::TempDir;

use bintree::config::{RawSettings, Settings};
use bintree::domain::PrintStyle;

fn env_map(vars: &[(&str, &str)]) -> Map<String, String> {
    let mut map = Map::new();
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    map
}

// ============================================================
// File layer
// ============================================================

#[test]
fn given_config_file_when_load_then_overrides_only_specified_keys() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bintree.toml");
    fs::write(
        &path,
        r#"
max_nodes = 40
seed = 7

[render]
placeholder = "_"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.max_nodes, 40);
    assert_eq!(settings.seed, Some(7));
    assert_eq!(settings.render.placeholder, "_");
    assert_eq!(settings.render.indent, "  ");
    assert_eq!(settings.render.sequence_separator, ", ");
}

#[test]
fn given_missing_config_file_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(&dir.path().join("missing.toml")));

    let err = result.expect_err("missing explicit config must fail");
    assert!(err.to_string().contains("read"), "{err}");
}

#[test]
fn given_malformed_config_file_when_load_then_errors_with_parse_message() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "max_nodes = \"many\"\n").unwrap();

    let err = Settings::load(Some(&path)).expect_err("malformed config must fail");
    assert!(err.to_string().contains("parse"), "{err}");
}

#[test]
fn given_raw_overlay_when_merging_then_overlay_wins_where_set() {
    let raw: RawSettings = toml::from_str("max_levels = 3\ncount = 5\n").unwrap();
    let merged = Settings::default().merge_with(&raw);

    assert_eq!(merged.max_levels, 3);
    assert_eq!(merged.count, 5);
    assert_eq!(merged.max_nodes, Settings::default().max_nodes);
    assert_eq!(merged.seed, None);
}

// ============================================================
// Env layer
// ============================================================

#[test]
fn given_env_vars_when_applying_overrides_then_replaces_values() {
    let vars = env_map(&[
        ("BINTREE_MAX_LEVELS", "9"),
        ("BINTREE_SEED", "99"),
        ("BINTREE_RENDER__PLACEHOLDER", "x"),
        ("OTHER_MAX_NODES", "1"),
    ]);

    let settings = Settings::default()
        .apply_env_overrides(Some(vars))
        .expect("apply env");

    assert_eq!(settings.max_levels, 9);
    assert_eq!(settings.seed, Some(99));
    assert_eq!(settings.render.placeholder, "x");
    assert_eq!(settings.max_nodes, 15, "unprefixed variables are ignored");
}

#[test]
fn given_invalid_env_value_when_applying_overrides_then_errors() {
    let vars = env_map(&[("BINTREE_COUNT", "many")]);
    let result = Settings::default().apply_env_overrides(Some(vars));
    assert!(result.is_err());
}

#[test]
fn given_no_env_vars_when_applying_overrides_then_unchanged() {
    let settings = Settings::default()
        .apply_env_overrides(Some(Map::new()))
        .unwrap();
    assert_eq!(settings, Settings::default());
}

// ============================================================
// Presentation
// ============================================================

#[test]
fn given_settings_when_to_toml_then_contains_keys_and_render_table() {
    let toml = Settings::default().to_toml().unwrap();
    assert!(toml.contains("max_nodes = 15"), "{toml}");
    assert!(toml.contains("[render]"), "{toml}");
    assert!(!toml.contains("seed"), "unset seed is omitted: {toml}");
}

#[test]
fn given_render_config_when_converting_then_print_style_fields_match() {
    let mut settings = Settings::default();
    settings.render.separator = "|".into();
    assert_eq!(
        settings.render.print_style(),
        PrintStyle {
            separator: "|".into(),
            ..PrintStyle::default()
        }
    );
}
