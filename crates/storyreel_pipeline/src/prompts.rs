//! Prompt text for scripts and scene images.

use storyreel_core::{ContentStyle, StyleProfile};
use storyreel_error::{ExternalServiceError, ExternalServiceErrorKind, StoryreelResult};
use storyreel_interface::TextRequest;

/// Things scene images must avoid.
pub const NEGATIVE_PROMPT: &str = "((blurry, low quality, low resolution, disfigured, deformed)), (extra limbs, extra fingers, extra arms, extra legs), bad anatomy, bad proportions, (unrealistic proportions), watermark, signature, cropped image";

/// Full image prompt for one scene sentence.
///
/// # Examples
///
/// ```
/// use storyreel_core::Style;
/// use storyreel_pipeline::scene_prompt;
///
/// let p = scene_prompt("A fox crosses a frozen river.", Style::Anime.profile());
/// assert!(p.starts_with("((masterpiece, best quality, highly detailed, sharp focus)), (portrait:1.4), A fox"));
/// assert!(p.ends_with(Style::Anime.profile().prompt_suffix));
/// ```
pub fn scene_prompt(sentence: &str, profile: &StyleProfile) -> String {
    format!(
        "((masterpiece, best quality, highly detailed, sharp focus)), (portrait:1.4), {}{}",
        sentence.trim(),
        profile.prompt_suffix
    )
}

fn build(
    system_role: &str,
    instructions: String,
    sentences: usize,
    topic: &str,
) -> StoryreelResult<TextRequest> {
    TextRequest::builder()
        .system_role(system_role)
        .instructions(instructions)
        .target_sentence_count(sentences)
        .topic(topic)
        .build()
        .map_err(|e| {
            ExternalServiceError::new(ExternalServiceErrorKind::RequestConversion {
                service: "text",
                message: e.to_string(),
            })
            .into()
        })
}

pub(crate) fn narration_request(topic: &str, sentences: usize) -> StoryreelResult<TextRequest> {
    build(
        "You are a short storyteller.",
        format!(
            "Write a compelling story in exactly {sentences} sentences, each about 11 words long. \
             Every sentence ends with a full stop. Keep the language concise yet engaging, with a \
             clear narrative flow and emotional depth, and let each sentence follow naturally \
             from the previous one."
        ),
        sentences,
        topic,
    )
}

pub(crate) fn scene_request(topic: &str, sentences: usize) -> StoryreelResult<TextRequest> {
    build(
        "You are a storyteller.",
        format!(
            "Create a visually rich story of exactly {sentences} sentences. Each sentence should be \
             around 50 words and describe one scene through colors, textures, light, motion and \
             atmosphere. Alternate between wide, sweeping views and close-up details. Every \
             sentence ends with a full stop. Just write the sentences."
        ),
        sentences,
        topic,
    )
}

pub(crate) fn styled_request(
    topic: &str,
    sentences: usize,
    style: ContentStyle,
) -> StoryreelResult<TextRequest> {
    build(
        "You are a short storyteller.",
        format!(
            "{} Use exactly {sentences} sentences, each ending with a full stop.",
            style.instruction()
        ),
        sentences,
        topic,
    )
}
