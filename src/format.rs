//! Display text for row labels and prices.

use crate::models::Price;

/// Turn a snake_case identifier into a title-cased label.
///
/// `"rare_gear_salvage"` becomes `"Rare Gear Salvage"`.
pub fn display_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut new_word = true;
    for c in name.chars() {
        if c == '_' || c == ' ' {
            out.push(' ');
            new_word = true;
        } else if new_word {
            out.extend(c.to_uppercase());
            new_word = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Like [`display_label`], minus the final two characters.
///
/// For names carrying a trailing tag such as `_g` that should not show up
/// in the label.
pub fn display_label_trimmed(name: &str) -> String {
    let label = display_label(name);
    let keep = label.chars().count().saturating_sub(2);
    label.chars().take(keep).collect()
}

/// The three table cells for a price: gold, silver, copper.
pub fn price_cells(price: &Price) -> Vec<String> {
    vec![
        price.gold.to_string(),
        price.silver.to_string(),
        price.copper.to_string(),
    ]
}
