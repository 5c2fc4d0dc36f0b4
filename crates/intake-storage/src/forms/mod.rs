//! [`FormRecord`](crate::record::FormRecord) implementations for each form type.

pub mod inventory;
pub mod pain_map;
