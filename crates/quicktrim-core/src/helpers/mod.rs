// crates/quicktrim-core/src/helpers/mod.rs

pub mod geometry;
pub mod time;
pub mod timeline;
