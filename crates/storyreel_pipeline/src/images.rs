//! Scene image generation over a submit/poll backend.

use crate::prompts::{NEGATIVE_PROMPT, scene_prompt};
use futures::future::try_join_all;
use std::sync::Arc;
use storyreel_core::{AspectRatio, GenerationJob, JobStatus, SceneImage, Script, Style};
use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind, StoryreelResult};
use storyreel_interface::{ImageGenerator, ImageRequest};
use storyreel_retry::{RetryPolicy, retry};
use storyreel_storage::RunWorkspace;
use tracing::{debug, info, instrument};

const SERVICE: &str = "image";

/// Produces one image per scene sentence.
pub struct SceneImageGenerator {
    images: Arc<dyn ImageGenerator>,
    submit_policy: RetryPolicy,
    poll_policy: RetryPolicy,
    fetch_policy: RetryPolicy,
}

impl SceneImageGenerator {
    /// Generator with separate submit, poll and download policies.
    pub fn new(
        images: Arc<dyn ImageGenerator>,
        submit_policy: RetryPolicy,
        poll_policy: RetryPolicy,
        fetch_policy: RetryPolicy,
    ) -> Self {
        Self {
            images,
            submit_policy,
            poll_policy,
            fetch_policy,
        }
    }

    fn requests(
        script: &Script,
        style: Style,
        aspect_ratio: AspectRatio,
    ) -> StoryreelResult<Vec<ImageRequest>> {
        let profile = style.profile();
        let (width, height) = aspect_ratio.dimensions();
        script
            .sentences()
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                ImageRequest::builder()
                    .index(i)
                    .prompt(scene_prompt(sentence, profile))
                    .negative_prompt(NEGATIVE_PROMPT)
                    .width(width)
                    .height(height)
                    .enhance_style(profile.enhance_style.map(str::to_string))
                    .build()
                    .map_err(|e| {
                        ExternalServiceError::new(ExternalServiceErrorKind::RequestConversion {
                            service: SERVICE,
                            message: e.to_string(),
                        })
                        .into()
                    })
            })
            .collect()
    }

    /// Submit every scene, wait for every job, then download every image.
    ///
    /// Each stage runs concurrently across scenes. The result is ordered by
    /// scene index.
    #[instrument(skip_all, fields(scenes = script.len(), style = %style, aspect_ratio = %aspect_ratio))]
    pub async fn generate_all(
        &self,
        script: &Script,
        style: Style,
        aspect_ratio: AspectRatio,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<Vec<SceneImage>> {
        let requests = Self::requests(script, style, aspect_ratio)?;

        let jobs = try_join_all(requests.iter().map(|req| self.submit(req))).await?;
        info!(jobs = jobs.len(), "Submitted image jobs");

        let ready = try_join_all(jobs.into_iter().map(|job| self.await_ready(job))).await?;

        let mut images =
            try_join_all(ready.iter().map(|job| self.download(job, workspace))).await?;
        images.sort_by_key(|image| *image.index());
        info!(images = images.len(), "Scene images ready");
        Ok(images)
    }

    async fn submit(&self, req: &ImageRequest) -> StoryreelResult<GenerationJob> {
        let images = &self.images;
        let operation = format!("image submit {}", req.index());
        let id = retry(&self.submit_policy, &operation, move || images.submit(req)).await?;
        debug!(index = *req.index(), job_id = %id, "Image job submitted");
        Ok(GenerationJob::submitted(*req.index(), id))
    }

    async fn await_ready(&self, mut job: GenerationJob) -> StoryreelResult<GenerationJob> {
        let images = &self.images;
        let job_id = job.id().to_string();
        let id = job_id.as_str();
        let operation = format!("image poll {}", job.index());

        let status = retry(&self.poll_policy, &operation, move || async move {
            match images.poll(id).await? {
                JobStatus::Pending => Err(ExternalServiceError::new(ExternalServiceErrorKind::NotReady {
                    service: SERVICE,
                    job_id: id.to_string(),
                })
                .into()),
                finished => Ok(finished),
            }
        })
        .await?;

        job.observe(&status);
        match status {
            JobStatus::Failed { reason } => Err(ExternalServiceError::new(
                ExternalServiceErrorKind::JobFailed {
                    service: SERVICE,
                    job_id,
                    message: reason,
                },
            )
            .into()),
            _ => Ok(job),
        }
    }

    async fn download(
        &self,
        job: &GenerationJob,
        workspace: &RunWorkspace,
    ) -> StoryreelResult<SceneImage> {
        let url = job.result_url().ok_or_else(|| {
            ExternalServiceError::new(ExternalServiceErrorKind::InvalidResponse {
                service: SERVICE,
                message: format!("job {} finished without a result URL", job.id()),
            })
        })?;
        let images = &self.images;
        let operation = format!("image fetch {}", job.index());
        let bytes = retry(&self.fetch_policy, &operation, move || images.fetch(url)).await?;
        let path = workspace.image_path(job.index());
        workspace.write_atomic(&path, &bytes).await?;
        debug!(index = job.index(), path = %path.display(), "Stored scene image");
        Ok(SceneImage::new(job.index(), path))
    }
}
