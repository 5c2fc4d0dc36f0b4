pub mod pain_entry;
pub mod pain_map;
