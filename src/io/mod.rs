//! Input/output helpers.
//!
//! - payload normalization + wire shape (`payload`)
//! - file-backed forecast storage (`store`)
//! - CSV export of displayed series (`export`)

pub mod export;
pub mod payload;
pub mod store;

pub use export::*;
pub use payload::*;
pub use store::*;
