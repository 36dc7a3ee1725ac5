//! Nutrition analysis request construction.
//!
//! - `prompt`: the fixed instruction text.
//! - `request`: pairs the instruction with one validated image.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod prompt;
pub mod request;

pub use prompt::NUTRITION_INSTRUCTION;
pub use request::{build_request, build_request_with, InferenceRequest};
