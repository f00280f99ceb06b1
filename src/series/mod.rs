//! Pure transformations of a canonical series.
//!
//! - `resample`: daily → weekly/monthly buckets by summation
//! - `band`: trailing moving average and normal-approximation band

pub mod band;
pub mod resample;

pub use band::*;
pub use resample::*;
