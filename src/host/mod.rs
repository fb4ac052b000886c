pub mod entity;
pub mod entry;
pub mod registry;
