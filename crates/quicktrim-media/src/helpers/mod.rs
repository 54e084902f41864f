// crates/quicktrim-media/src/helpers/mod.rs
//
// Internal helpers for quicktrim-media. Not re-exported from lib.rs.

pub mod frame;
pub mod seek;
