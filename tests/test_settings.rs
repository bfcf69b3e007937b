//! Settings persistence.

use std::fs;

use gw2tp_addon::config::DEV_API_URL;
use gw2tp_addon::Settings;

#[test]
fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = Settings::load(&tmp.path().join("settings.json"));
    assert_eq!(settings, Settings::default());
    assert!(!settings.show_window);
    assert!(settings.is_visible);
    assert!(settings.base_url.is_none());
}

#[test]
fn corrupt_file_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    fs::write(&path, "{ this is not json").unwrap();
    assert_eq!(Settings::load(&path), Settings::default());
}

#[test]
fn save_then_load_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("settings.json");
    let settings = Settings {
        show_window: true,
        is_visible: false,
        base_url: Some(DEV_API_URL.into()),
    };

    settings.save(&path).unwrap();

    assert_eq!(Settings::load(&path), settings);
}

#[test]
fn saved_file_uses_host_key_names() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    Settings::default().save(&path).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["IsVisible"], true);
    assert_eq!(raw["ShowWindow"], false);
    assert!(raw.get("BaseUrl").is_none());
}

#[test]
fn partial_file_fills_in_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    fs::write(&path, r#"{"ShowWindow": true}"#).unwrap();

    let settings = Settings::load(&path);
    assert!(settings.show_window);
    assert!(settings.is_visible);
}

#[test]
fn toggle_flips_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("settings.json");
    let mut settings = Settings::default();

    settings.toggle_show_window(&path).unwrap();
    assert!(settings.show_window);
    assert!(Settings::load(&path).show_window);

    settings.toggle_show_window(&path).unwrap();
    assert!(!Settings::load(&path).show_window);
}
