//! Row building: turn a flattened response into ordered, labelled table rows.

use std::collections::HashMap;

use crate::catalog::CommandSpec;
use crate::error::{Gw2tpError, Result};
use crate::flatten::FlatResult;
use crate::format::display_label;
use crate::models::Price;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowValue {
    /// A gold/silver/copper triple.
    Price(Price),
    /// A single undecomposed value from a unit-price command.
    Unit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Logical name, e.g. `stack_buy`.
    pub name: String,
    /// Display label, e.g. `Stack Buy`.
    pub label: String,
    pub value: RowValue,
}

impl Row {
    pub fn price(name: &str, price: Price) -> Self {
        Self {
            name: name.to_string(),
            label: display_label(name),
            value: RowValue::Price(price),
        }
    }

    pub fn unit(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            label: display_label(name),
            value: RowValue::Unit(value),
        }
    }

    pub fn as_price(&self) -> Option<Price> {
        match self.value {
            RowValue::Price(p) => Some(p),
            RowValue::Unit(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Triple grouping
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Component {
    Gold,
    Silver,
    Copper,
}

fn split_component(key: &str) -> Option<(&str, Component)> {
    let component = if key.ends_with("_g") {
        Component::Gold
    } else if key.ends_with("_s") {
        Component::Silver
    } else if key.ends_with("_c") {
        Component::Copper
    } else {
        return None;
    };
    let prefix = &key[..key.len() - 2];
    if prefix.is_empty() {
        return None;
    }
    Some((prefix, component))
}

#[derive(Default)]
struct Partial {
    gold: Option<i64>,
    silver: Option<i64>,
    copper: Option<i64>,
}

/// Group `_g`/`_s`/`_c` keys sharing a prefix into one price row each.
///
/// Components are matched by suffix, not position. Rows come out in order
/// of each prefix's first appearance. Keys without a component suffix are
/// ignored; groups missing a component are dropped.
pub fn group_triples(flat: &FlatResult) -> Vec<Row> {
    let mut order: Vec<&str> = Vec::new();
    let mut partials: HashMap<&str, Partial> = HashMap::new();

    for (key, &value) in flat {
        let Some((prefix, component)) = split_component(key) else {
            continue;
        };
        let partial = partials.entry(prefix).or_insert_with(|| {
            order.push(prefix);
            Partial::default()
        });
        match component {
            Component::Gold => partial.gold = Some(value),
            Component::Silver => partial.silver = Some(value),
            Component::Copper => partial.copper = Some(value),
        }
    }

    let mut rows = Vec::with_capacity(order.len());
    for prefix in order {
        let partial = &partials[prefix];
        match (partial.gold, partial.silver, partial.copper) {
            (Some(g), Some(s), Some(c)) => rows.push(Row::price(prefix, Price::new(g, s, c))),
            _ => tracing::warn!(row = prefix, "Dropping incomplete price triple"),
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// build_rows
// ---------------------------------------------------------------------------

/// Build the display rows for one command's flattened result.
///
/// Unit-price commands get one row per field, other commands one row per
/// price triple. When the command declares a field order, exactly the
/// declared rows are emitted in that order, whichever kind they are. A
/// declared field with no matching row is a
/// [`Gw2tpError::ContractViolation`].
pub fn build_rows(spec: &CommandSpec, flat: &FlatResult) -> Result<Vec<Row>> {
    let rows: Vec<Row> = if spec.unit_price {
        flat.iter().map(|(k, &v)| Row::unit(k, v)).collect()
    } else {
        group_triples(flat)
    };

    let Some(fields) = &spec.fields else {
        return Ok(rows);
    };

    let by_name: HashMap<&str, &Row> = rows.iter().map(|r| (r.name.as_str(), r)).collect();

    fields
        .iter()
        .map(|field| {
            by_name
                .get(field.as_str())
                .map(|row| (*row).clone())
                .ok_or_else(|| Gw2tpError::ContractViolation {
                    command: spec.name.clone(),
                    field: field.clone(),
                })
        })
        .collect()
}
