//! Live backend checks. Run with `--features api` and real keys in `.env`.

#![cfg(feature = "api")]

use storyreel_interface::{TextGenerator, TextRequest};
use storyreel_models::OpenAiClient;
use storyreel_retry::OpenAiConfig;

#[tokio::test]
async fn test_openai_generates_text() {
    let _ = dotenvy::dotenv();
    let client = OpenAiClient::new(&OpenAiConfig::default()).expect("OPENAI_API_KEY");
    let req = TextRequest::builder()
        .system_role("You are a short storyteller.")
        .instructions("Write exactly 2 short sentences.")
        .target_sentence_count(2usize)
        .topic("a cat")
        .build()
        .unwrap();

    let text = client.generate(&req).await.unwrap();
    assert!(!text.is_empty());
}
