//! Request shapes and response interpretation for the HTTP backends.

use serde_json::json;
use storyreel_core::JobStatus;
use storyreel_interface::{ImageRequest, SpeechRequest, TextRequest};
use storyreel_models::{
    ChatCompletionResponse, ElevenLabsClient, FetchResponse, ModelsLabClient, OpenAiClient,
    Text2ImgResponse, TranscriptionResponse,
};
use storyreel_retry::{ElevenLabsConfig, ModelsLabConfig, OpenAiConfig};

fn text_request() -> TextRequest {
    TextRequest::builder()
        .system_role("You are a short storyteller.")
        .instructions("Write 7 short sentences.")
        .target_sentence_count(7usize)
        .topic("a lighthouse keeper")
        .build()
        .unwrap()
}

#[test]
fn test_chat_request_shape() {
    let client = OpenAiClient::with_api_key("sk-test", &OpenAiConfig::default());
    let body = serde_json::to_value(client.chat_request(&text_request()).unwrap()).unwrap();

    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "You are a short storyteller.");
    assert_eq!(body["messages"][1]["role"], "user");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("a lighthouse keeper"));
    assert!(body.get("temperature").is_none());
}

#[test]
fn test_chat_response_first_content() {
    let response: ChatCompletionResponse = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "One. Two."}, "finish_reason": "stop"}
        ]
    }))
    .unwrap();
    assert_eq!(response.first_content(), Some("One. Two."));

    let empty: ChatCompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
    assert_eq!(empty.first_content(), None);
}

#[test]
fn test_transcription_words() {
    let response: TranscriptionResponse = serde_json::from_value(json!({
        "text": "Once upon",
        "duration": 1.2,
        "words": [
            {"word": "Once", "start": 0.0, "end": 0.4},
            {"word": "upon", "start": 0.5, "end": 1.1}
        ]
    }))
    .unwrap();
    let words = response.into_word_timings();
    assert_eq!(words.len(), 2);
    assert_eq!(words[1].word, "upon");
    assert_eq!(words[1].start, 0.5);
}

#[test]
fn test_transcription_without_words() {
    let response: TranscriptionResponse =
        serde_json::from_value(json!({"text": "silence"})).unwrap();
    assert!(response.into_word_timings().is_empty());
}

#[test]
fn test_speech_url_requests_raw_pcm() {
    let client = ElevenLabsClient::with_api_key("xi-test", &ElevenLabsConfig::default());
    assert_eq!(
        client.speech_url("voice123"),
        "https://api.elevenlabs.io/v1/text-to-speech/voice123?output_format=pcm_44100"
    );
}

#[test]
fn test_speech_body_omits_missing_context() {
    let client = ElevenLabsClient::with_api_key("xi-test", &ElevenLabsConfig::default());
    let first = SpeechRequest::builder()
        .index(0usize)
        .text("It began at dusk.")
        .voice_id("v")
        .next_text(Some("Then the storm came.".to_string()))
        .build()
        .unwrap();

    let body = serde_json::to_value(client.speech_body(&first).unwrap()).unwrap();
    assert_eq!(body["model_id"], "eleven_multilingual_v2");
    assert_eq!(body["next_text"], "Then the storm came.");
    assert!(body.get("previous_text").is_none());
}

#[test]
fn test_submit_body_shape() {
    let client = ModelsLabClient::with_api_key("ml-test", &ModelsLabConfig::default());
    let req = ImageRequest::builder()
        .index(2usize)
        .prompt("a castle")
        .negative_prompt("blurry")
        .width(576u32)
        .height(1024u32)
        .enhance_style(Some("anime".to_string()))
        .build()
        .unwrap();

    let body = serde_json::to_value(client.submit_body(&req).unwrap()).unwrap();
    assert_eq!(body["key"], "ml-test");
    assert_eq!(body["width"], "576");
    assert_eq!(body["height"], "1024");
    assert_eq!(body["samples"], 1);
    assert_eq!(body["safety_checker"], false);
    assert_eq!(body["enhance_prompt"], true);
    assert_eq!(body["enhance_style"], "anime");
}

#[test]
fn test_submit_body_without_style_preset() {
    let client = ModelsLabClient::with_api_key("ml-test", &ModelsLabConfig::default());
    let req = ImageRequest::builder()
        .index(0usize)
        .prompt("a river")
        .negative_prompt("blurry")
        .width(1024u32)
        .height(1024u32)
        .build()
        .unwrap();

    let body = serde_json::to_value(client.submit_body(&req).unwrap()).unwrap();
    assert!(body.get("enhance_style").is_none());
}

#[test]
fn test_submit_response_job_id() {
    let numeric: Text2ImgResponse =
        serde_json::from_value(json!({"status": "processing", "id": 98765, "eta": 10})).unwrap();
    assert_eq!(numeric.job_id().as_deref(), Some("98765"));

    let text: Text2ImgResponse =
        serde_json::from_value(json!({"status": "success", "id": "abc", "output": ["u"]})).unwrap();
    assert_eq!(text.job_id().as_deref(), Some("abc"));

    let rejected: Text2ImgResponse =
        serde_json::from_value(json!({"status": "error", "message": "Server busy"})).unwrap();
    assert_eq!(rejected.job_id(), None);
    assert_eq!(rejected.error_message(), "Server busy");
}

#[test]
fn test_fetch_response_status() {
    let ready: FetchResponse = serde_json::from_value(json!({
        "status": "success",
        "output": ["https://cdn.example/img.png"]
    }))
    .unwrap();
    assert_eq!(
        ready.job_status(),
        Some(JobStatus::Ready {
            url: "https://cdn.example/img.png".to_string()
        })
    );

    let pending: FetchResponse =
        serde_json::from_value(json!({"status": "processing"})).unwrap();
    assert_eq!(pending.job_status(), Some(JobStatus::Pending));

    let failed: FetchResponse =
        serde_json::from_value(json!({"status": "failed", "message": "nsfw"})).unwrap();
    assert_eq!(
        failed.job_status(),
        Some(JobStatus::Failed {
            reason: "nsfw".to_string()
        })
    );

    let hollow: FetchResponse =
        serde_json::from_value(json!({"status": "success", "output": []})).unwrap();
    assert_eq!(hollow.job_status(), None);
}
