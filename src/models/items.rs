//! Trading-post item IDs referenced by the GW2TP backend endpoints.

pub const RARE_UNID_GEAR: u32 = 83008;
pub const ECTOPLASM: u32 = 19721;

/// Backend path for a single-item price lookup, e.g. `price?item_id=19721`.
pub fn price_endpoint(item_id: u32) -> String {
    format!("price?item_id={item_id}")
}
