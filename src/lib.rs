// calorie-advisor - Food photo to calorie and nutrition breakdown via Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod analysis;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod utils;
pub mod vision;
