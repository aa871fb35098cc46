//! Text utilities shared by the pipeline.

pub mod duration;
pub mod personalization;
