//! The submission pipeline: Intake -> Request Builder -> Inference Client.
//!
//! Every submission is an independent round trip that walks
//! `Idle -> Validating -> Requesting -> AwaitingResponse -> Done | Failed`.
//! Nothing is kept between submissions.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::analysis::build_request;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::metrics;
use crate::vision::{accept_upload_with_limit, RawUpload};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Idle,
    Validating,
    Requesting,
    AwaitingResponse,
    Done,
    Failed,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStage::Idle => "idle",
            SubmissionStage::Validating => "validating",
            SubmissionStage::Requesting => "requesting",
            SubmissionStage::AwaitingResponse => "awaiting_response",
            SubmissionStage::Done => "done",
            SubmissionStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks one submission's progress for logging.
#[derive(Debug)]
pub struct Submission {
    id: Uuid,
    stage: SubmissionStage,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: SubmissionStage::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> SubmissionStage {
        self.stage
    }

    fn advance(&mut self, next: SubmissionStage) {
        debug!("Submission {}: {} -> {}", self.id, self.stage, next);
        self.stage = next;
    }

    /// Run the pipeline for `raw` and return the model's text unmodified.
    ///
    /// Validation failures return before the client is touched, so an invalid
    /// upload never costs a network call.
    pub async fn run(
        mut self,
        client: &GeminiClient,
        raw: Option<RawUpload>,
        max_image_bytes: usize,
    ) -> Result<String> {
        let result = self.drive(client, raw, max_image_bytes).await;

        match &result {
            Ok(text) => {
                self.advance(SubmissionStage::Done);
                info!("Submission {} done ({} chars)", self.id, text.len());
                metrics::record_submission("done");
            }
            Err(e) => {
                self.advance(SubmissionStage::Failed);
                warn!("Submission {} failed: {}", self.id, e);
                metrics::record_submission(e.kind());
            }
        }

        result
    }

    async fn drive(
        &mut self,
        client: &GeminiClient,
        raw: Option<RawUpload>,
        max_image_bytes: usize,
    ) -> Result<String> {
        self.advance(SubmissionStage::Validating);
        let image = accept_upload_with_limit(raw, max_image_bytes)?;
        metrics::record_upload(image.content_type(), image.len());

        self.advance(SubmissionStage::Requesting);
        let request = build_request(image);

        self.advance(SubmissionStage::AwaitingResponse);
        client.infer(request).await
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one submission end to end.
pub async fn analyze(
    client: &GeminiClient,
    raw: Option<RawUpload>,
    max_image_bytes: usize,
) -> Result<String> {
    Submission::new().run(client, raw, max_image_bytes).await
}
