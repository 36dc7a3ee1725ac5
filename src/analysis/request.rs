// Request builder: pair the instruction with the validated image
// Author: kelexine (https://github.com/kelexine)

use super::prompt::NUTRITION_INSTRUCTION;
use crate::vision::UploadedImage;
use std::borrow::Cow;

/// One inference call's worth of input: an instruction and exactly one image.
///
/// Consumed by value by [`crate::gemini::GeminiClient::infer`], so a request
/// can be sent at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    instruction: Cow<'static, str>,
    image: UploadedImage,
}

impl InferenceRequest {
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn image(&self) -> &UploadedImage {
        &self.image
    }

    pub fn into_parts(self) -> (Cow<'static, str>, UploadedImage) {
        (self.instruction, self.image)
    }
}

/// Build the nutrition-analysis request for `image`.
pub fn build_request(image: UploadedImage) -> InferenceRequest {
    build_request_with(NUTRITION_INSTRUCTION, image)
}

/// Build a request with a substitute instruction (e.g. a localized prompt).
pub fn build_request_with(
    instruction: impl Into<Cow<'static, str>>,
    image: UploadedImage,
) -> InferenceRequest {
    InferenceRequest {
        instruction: instruction.into(),
        image,
    }
}
