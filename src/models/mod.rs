pub mod items;
pub mod price;

pub use price::*;
