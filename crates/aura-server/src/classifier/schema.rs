// crates/aura-server/src/classifier/schema.rs
// Request, result and fallback shapes for the classification contract

use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Intensity reported by every fallback payload
pub const FALLBACK_INTENSITY: f64 = 0.5;

/// Sentiment score reported by fallbacks in sentiment mode
pub const FALLBACK_SENTIMENT: f64 = 0.0;

/// The nine labels the model is asked to choose from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Emotion {
    Sad,
    Happy,
    Angry,
    Calm,
    Confused,
    Confident,
    Love,
    Surprise,
    Fear,
}

impl Emotion {
    /// Illustrative synonyms shown to the model next to each label
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::Sad => &["sorrow", "grief", "disappointment", "loneliness"],
            Self::Happy => &["joy", "delight", "excitement", "gratitude"],
            Self::Angry => &["frustration", "irritation", "rage", "resentment"],
            Self::Calm => &["peaceful", "relaxed", "content", "neutral"],
            Self::Confused => &["uncertain", "puzzled", "lost", "unsure"],
            Self::Confident => &["determined", "assured", "proud", "motivated"],
            Self::Love => &["affection", "warmth", "admiration", "care"],
            Self::Surprise => &["astonishment", "shock", "amazement", "disbelief"],
            Self::Fear => &["anxiety", "worry", "nervousness", "dread"],
        }
    }
}

/// Which response contract the gateway asks for and enforces.
///
/// `Emotion` is the system of record. `Sentiment` is the earlier
/// continuous-score contract, kept as a deployment option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputMode {
    #[default]
    Emotion,
    Sentiment,
}

impl OutputMode {
    /// Keys that must all be present for a reply to be accepted
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Emotion => &["emotion", "intensity", "keywords"],
            Self::Sentiment => &["sentiment", "intensity", "keywords"],
        }
    }

    /// Key holding the label or score
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Emotion => "emotion",
            Self::Sentiment => "sentiment",
        }
    }

    /// Whether every required key is present
    pub fn has_required_keys(&self, obj: &Map<String, Value>) -> bool {
        self.required_keys().iter().all(|k| obj.contains_key(*k))
    }

    /// Whether the values also honor the ranges the prompt asks for.
    ///
    /// Informational only: replies that fail this check are still passed
    /// through unchanged.
    pub fn conforms(&self, obj: &Map<String, Value>) -> bool {
        let intensity_ok = obj
            .get("intensity")
            .and_then(Value::as_f64)
            .is_some_and(|v| (0.0..=1.0).contains(&v));
        let keyword_count = obj
            .get("keywords")
            .and_then(Value::as_array)
            .filter(|kw| kw.iter().all(Value::is_string))
            .map(Vec::len);

        let (label_ok, keywords_ok) = match self {
            Self::Emotion => (
                obj.get("emotion")
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.parse::<Emotion>().is_ok()),
                keyword_count.is_some_and(|n| (3..=5).contains(&n)),
            ),
            Self::Sentiment => (
                obj.get("sentiment")
                    .and_then(Value::as_f64)
                    .is_some_and(|v| (-1.0..=1.0).contains(&v)),
                keyword_count.is_some_and(|n| (2..=5).contains(&n)),
            ),
        };

        label_ok && intensity_ok && keywords_ok
    }
}

/// Inbound `POST /process_text` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub text: String,
}

/// Safe default returned whenever the primary path fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
    pub intensity: f64,
    pub keywords: Vec<String>,
    pub error: String,
}

impl FallbackResult {
    pub fn new(mode: OutputMode, err: &ClassifyError) -> Self {
        let (emotion, sentiment) = match mode {
            OutputMode::Emotion => (Some(Emotion::Calm), None),
            OutputMode::Sentiment => (None, Some(FALLBACK_SENTIMENT)),
        };
        Self {
            emotion,
            sentiment,
            intensity: FALLBACK_INTENSITY,
            keywords: vec![err.sentinel().to_string()],
            error: err.to_string(),
        }
    }
}

/// What the gateway hands back to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The upstream JSON object, verbatim
    Classified(Map<String, Value>),
    Fallback(FallbackResult),
}

impl Outcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Classified(_) => None,
            Self::Fallback(f) => Some(&f.error),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Classified(obj) => Value::Object(obj.clone()),
            Self::Fallback(f) => serde_json::to_value(f).unwrap_or(Value::Null),
        }
    }
}
