//! Command catalog: which backend endpoints exist and how their rows are laid out.
//!
//! Each command is described by a [`CommandSpec`] record instead of a branch
//! per command, so adding a command is a data change. The catalog also owns
//! the endpoint remap used for single-item price lookups, where the request
//! path (`price?item_id=19721`) differs from the name results are stored
//! under (`ecto`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Gw2tpError, Result};
use crate::models::items;

// ---------------------------------------------------------------------------
// CommandSpec
// ---------------------------------------------------------------------------

/// Descriptor for a single backend command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name; also the key its result is stored under.
    pub name: String,
    /// Request path when it differs from `name`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Logical row names in display order. `None` keeps build order.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    /// Response is a flat `{name: value}` map, one row per field.
    #[serde(default)]
    pub unit_price: bool,
}

impl CommandSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            endpoint: None,
            fields: None,
            unit_price: false,
        }
    }

    pub fn endpoint(mut self, path: &str) -> Self {
        self.endpoint = Some(path.to_string());
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn unit_price(mut self, unit_price: bool) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// The path requested from the backend for this command.
    pub fn endpoint_path(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const RUNE_FIELDS: &[&str] = &["crafting_cost", "sell", "profit"];
const RELIC_FIELDS: &[&str] = &["crafting_cost", "sell", "flip", "profit"];
const SALVAGE_FIELDS: &[&str] = &[
    "stack_buy",
    "salvage_costs",
    "mats_value_after_tax",
    "profit_stack",
];

/// Ordered set of commands requested on every refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    specs: Vec<CommandSpec>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names or endpoint paths.
    ///
    /// Endpoint paths must be unique so that a completed request maps back
    /// to exactly one command.
    pub fn new(specs: Vec<CommandSpec>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut endpoints = HashSet::new();
        for spec in &specs {
            if spec.name.is_empty() {
                return Err(Gw2tpError::InvalidArgument(
                    "Command name must not be empty".into(),
                ));
            }
            if !names.insert(spec.name.as_str()) {
                return Err(Gw2tpError::InvalidArgument(format!(
                    "Duplicate command: {}",
                    spec.name
                )));
            }
            if !endpoints.insert(spec.endpoint_path()) {
                return Err(Gw2tpError::InvalidArgument(format!(
                    "Duplicate endpoint path: {}",
                    spec.endpoint_path()
                )));
            }
        }
        Ok(Self { specs })
    }

    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// Parse a catalog from a JSON array of command descriptors.
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: Vec<CommandSpec> = serde_json::from_str(json)?;
        Self::new(specs)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Request remap: command name to backend path.
    pub fn endpoint_path(&self, name: &str) -> Option<&str> {
        self.get(name).map(CommandSpec::endpoint_path)
    }

    /// Response remap: backend path back to the command name.
    pub fn command_for_endpoint(&self, path: &str) -> Option<&str> {
        self.specs
            .iter()
            .find(|s| s.endpoint_path() == path)
            .map(|s| s.name.as_str())
    }
}

impl Default for Catalog {
    /// The commands served by the GW2TP backend.
    ///
    /// Commands keep the declaration order below, grouped by category, not
    /// alphabetical order. Requests and tables follow the same order.
    fn default() -> Self {
        let specs = vec![
            // runes
            CommandSpec::new("scholar_rune").fields(RUNE_FIELDS),
            CommandSpec::new("dragonhunter_rune").fields(RUNE_FIELDS),
            CommandSpec::new("guardian_rune").fields(RUNE_FIELDS),
            // relics
            CommandSpec::new("relic_of_fireworks").fields(RELIC_FIELDS),
            CommandSpec::new("relic_of_aristocracy").fields(RELIC_FIELDS),
            CommandSpec::new("relic_of_thief").fields(RELIC_FIELDS),
            // rare / ecto
            CommandSpec::new("rare_weapon_craft").fields(&[
                "crafting_cost",
                "ecto_sell_after_tax",
                "profit",
            ]),
            CommandSpec::new("rare_gear_salvage").fields(SALVAGE_FIELDS),
            CommandSpec::new("ecto").endpoint(&items::price_endpoint(items::ECTOPLASM)),
            CommandSpec::new("rare_gear").endpoint(&items::price_endpoint(items::RARE_UNID_GEAR)),
            // gear
            CommandSpec::new("gear_salvage").fields(SALVAGE_FIELDS),
            CommandSpec::new("common_gear_salvage").fields(SALVAGE_FIELDS),
            // t5
            CommandSpec::new("t5_mats_buy").fields(&[
                "large_claw",
                "potent_blood",
                "large_bone",
                "intricate_totem",
                "large_fang",
                "potent_venom",
                "large_scale",
            ]),
            CommandSpec::new("mats_crafting_compare").fields(&[
                "mithril_ore_to_ingot",
                "mithril_ingot_buy",
                "elder_wood_log_to_plank",
                "elder_wood_plank_buy",
                "lucent_mote_to_crystal",
                "lucent_crystal_buy",
            ]),
            // forge
            CommandSpec::new("symbol_enh_forge").fields(&[
                "cost",
                "profit_per_try",
                "profit_per_shard",
            ]),
            CommandSpec::new("loadstone_forge").fields(&[
                "onyx",
                "charged",
                "corrupted",
                "destroyer",
            ]),
            // other
            CommandSpec::new("thesis_on_masterful_malice").fields(RELIC_FIELDS),
        ];
        Self { specs }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CommandSpec;
    type IntoIter = std::slice::Iter<'a, CommandSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
