//! Rolling-window statistics consumed by the detectors.

pub mod rolling;
pub mod trend;
