//! Image intake for the nutrition analysis.
//!
//! This module validates uploaded food photos before anything is sent to
//! Gemini: presence, supported format (JPEG or PNG, declared or detected
//! from magic bytes) and size.
//!
//! # Submodules
//!
//! - `models`: Image types and validation constraints.
//! - `intake`: The upload validation itself.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod intake;
pub mod models;

pub use intake::{accept_upload, accept_upload_with_limit};
pub use models::{ImageFormat, RawUpload, UploadedImage};
