pub mod align;
pub mod dedup;
