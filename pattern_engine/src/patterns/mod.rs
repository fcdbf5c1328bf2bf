pub mod annotated;
pub mod index;
pub mod label;
