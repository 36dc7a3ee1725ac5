// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::{classify_status, extract_answer, wire_request, GeminiClient};
