// crates/aura-server/src/classifier/prompt.rs
// Fixed system instructions and user message for classification calls

use super::schema::{Emotion, OutputMode};
use crate::llm::Message;
use strum::IntoEnumIterator;

const JSON_ONLY: &str = "Return ONLY valid JSON with no additional text or markdown.";

const SENTIMENT_CONTRACT: &str = r#"The JSON must have this exact structure:
{
  "sentiment": <float between -1.0 (very negative) and 1.0 (very positive)>,
  "intensity": <float between 0.0 (calm/neutral) and 1.0 (very intense/emotional)>,
  "keywords": [<array of 2-5 most important words or short phrases that drive the sentiment>]
}"#;

/// System instructions for the given contract.
///
/// The text depends only on `mode`, so repeated calls produce the same prompt.
pub fn system_prompt(mode: OutputMode) -> String {
    match mode {
        OutputMode::Emotion => emotion_prompt(),
        OutputMode::Sentiment => format!("You are a sentiment analyzer. {JSON_ONLY}\n{SENTIMENT_CONTRACT}"),
    }
}

fn emotion_prompt() -> String {
    let labels: Vec<String> = Emotion::iter().map(|e| e.to_string()).collect();
    let glossary: Vec<String> = Emotion::iter()
        .map(|e| format!("- {} ({})", e, e.synonyms().join(", ")))
        .collect();

    format!(
        r#"You are an emotion classifier. {JSON_ONLY}
Pick the single dominant emotion of the transcript from exactly these labels:
{glossary}

The JSON must have exactly these three keys:
{{
  "emotion": <one of: {labels}>,
  "intensity": <float between 0.0 (barely present) and 1.0 (overwhelming)>,
  "keywords": [<array of 3-5 words or short phrases from the transcript that carry the emotion>]
}}"#,
        glossary = glossary.join("\n"),
        labels = labels.join(", "),
    )
}

/// User turn carrying the caller's text verbatim. No escaping is applied;
/// the model is trusted to treat the quoted text as data.
pub fn user_message(text: &str) -> String {
    format!("Analyze this transcript: \"{}\"", text)
}

/// `[system, user]` message pair for one classification
pub fn build_messages(mode: OutputMode, text: &str) -> Vec<Message> {
    vec![Message::system(system_prompt(mode)), Message::user(user_message(text))]
}
