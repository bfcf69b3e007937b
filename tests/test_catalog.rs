//! Command catalog: built-in table, endpoint remaps and validation.

use gw2tp_addon::models::items::{self, price_endpoint};
use gw2tp_addon::{Catalog, CommandSpec, Gw2tpError};

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

#[test]
fn default_catalog_lists_backend_commands() {
    let catalog = Catalog::default();
    assert_eq!(catalog.len(), 17);
    for name in [
        "scholar_rune",
        "relic_of_thief",
        "ecto",
        "rare_gear",
        "t5_mats_buy",
        "loadstone_forge",
        "thesis_on_masterful_malice",
    ] {
        assert!(catalog.contains(name), "missing {name}");
    }
}

#[test]
fn default_catalog_keeps_declaration_order() {
    let catalog = Catalog::default();
    let names: Vec<&str> = catalog.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(&names[..3], ["scholar_rune", "dragonhunter_rune", "guardian_rune"]);
    assert_eq!(names.last(), Some(&"thesis_on_masterful_malice"));

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_ne!(names, sorted);
}

#[test]
fn price_endpoint_formats_item_lookup() {
    assert_eq!(price_endpoint(items::ECTOPLASM), "price?item_id=19721");
    assert_eq!(price_endpoint(items::RARE_UNID_GEAR), "price?item_id=83008");
}

#[test]
fn single_item_commands_are_remapped() {
    let catalog = Catalog::default();
    assert_eq!(catalog.endpoint_path("ecto"), Some("price?item_id=19721"));
    assert_eq!(catalog.endpoint_path("rare_gear"), Some("price?item_id=83008"));
    assert_eq!(catalog.command_for_endpoint("price?item_id=19721"), Some("ecto"));
    assert_eq!(catalog.command_for_endpoint("price?item_id=83008"), Some("rare_gear"));
}

#[test]
fn unmapped_commands_use_their_name_as_endpoint() {
    let catalog = Catalog::default();
    assert_eq!(catalog.endpoint_path("scholar_rune"), Some("scholar_rune"));
    assert_eq!(catalog.command_for_endpoint("scholar_rune"), Some("scholar_rune"));
    assert_eq!(catalog.endpoint_path("nope"), None);
    assert_eq!(catalog.command_for_endpoint("nope"), None);
}

#[test]
fn remap_round_trips_for_every_command() {
    let catalog = Catalog::default();
    for spec in &catalog {
        let endpoint = catalog.endpoint_path(&spec.name).unwrap();
        assert_eq!(catalog.command_for_endpoint(endpoint), Some(spec.name.as_str()));
    }
}

#[test]
fn declared_orderings_match_backend_fields() {
    let catalog = Catalog::default();
    let fields = catalog.get("rare_weapon_craft").unwrap().fields.clone().unwrap();
    assert_eq!(fields, vec!["crafting_cost", "ecto_sell_after_tax", "profit"]);
    assert!(catalog.get("ecto").unwrap().fields.is_none());
    assert!(catalog.iter().all(|s| !s.unit_price));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn duplicate_names_are_rejected() {
    let err = Catalog::new(vec![CommandSpec::new("a"), CommandSpec::new("a")]).unwrap_err();
    assert!(matches!(err, Gw2tpError::InvalidArgument(_)));
}

#[test]
fn duplicate_endpoints_are_rejected() {
    let err = Catalog::new(vec![
        CommandSpec::new("a").endpoint("price?item_id=1"),
        CommandSpec::new("b").endpoint("price?item_id=1"),
    ])
    .unwrap_err();
    assert!(matches!(err, Gw2tpError::InvalidArgument(_)));
}

#[test]
fn endpoint_colliding_with_another_name_is_rejected() {
    let err = Catalog::new(vec![
        CommandSpec::new("a"),
        CommandSpec::new("b").endpoint("a"),
    ])
    .unwrap_err();
    assert!(matches!(err, Gw2tpError::InvalidArgument(_)));
}

#[test]
fn empty_name_is_rejected() {
    assert!(Catalog::new(vec![CommandSpec::new("")]).is_err());
}

// ---------------------------------------------------------------------------
// from_json
// ---------------------------------------------------------------------------

#[test]
fn from_json_reads_descriptors() {
    let catalog = Catalog::from_json(
        r#"[
            {"name": "ecto", "endpoint": "price?item_id=19721"},
            {"name": "scholar_rune", "fields": ["crafting_cost", "sell", "profit"]},
            {"name": "unit", "unit_price": true}
        ]"#,
    )
    .unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.command_for_endpoint("price?item_id=19721"), Some("ecto"));
    assert!(catalog.get("unit").unwrap().unit_price);
    let names: Vec<_> = catalog.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["ecto", "scholar_rune", "unit"]);
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(matches!(
        Catalog::from_json("{not json"),
        Err(Gw2tpError::Json(_))
    ));
}
