//! Narrative registers for standalone script generation.

use serde::{Deserialize, Serialize};
use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};

/// Register of a standalone script.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentStyle {
    /// Third-person story with an unlikely hero
    #[default]
    Custom,
    /// A surprising fact, explained
    FunFacts,
    /// A philosophical idea applied to modern life
    Philosophy,
    /// Actionable steps toward a goal
    HowTo,
    /// Quick tips in a list
    Listicle,
    /// Uplifting third-person story
    Motivational,
    /// Business lesson or insight
    Business,
    /// Short horror story
    Horror,
    /// Short fantasy story
    Fantasy,
    /// Practical life hacks
    LifeHack,
    /// Personal reflective story
    Personal,
    /// Stoic take on a modern problem
    Stoic,
}

impl ContentStyle {
    /// Parse a content style name.
    #[track_caller]
    pub fn parse(value: &str) -> StoryreelResult<Self> {
        value.trim().parse().map_err(|_| {
            ValidationError::new(ValidationErrorKind::ContentStyle(value.to_string())).into()
        })
    }

    /// Writing instruction sent ahead of the topic.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Custom => {
                "Write a short, engaging story in a single paragraph with no dialogue or spoken lines. Use third-person narration. Begin with a dramatic or whimsical setup, show how an unlikely hero solves the problem creatively, and end with a satisfying resolution that highlights the lesson."
            }
            Self::FunFacts => {
                "Write a short and engaging paragraph that presents a surprising or little-known fact. Hook the audience with an attention-grabbing statement, explain the fact in simple terms, and leave them thinking differently."
            }
            Self::Philosophy => {
                "Write a short, thought-provoking paragraph that connects a philosophical idea to modern life, using relatable examples and closing with a memorable takeaway."
            }
            Self::HowTo => {
                "Write a concise and engaging paragraph that gives actionable steps to achieve the goal, in a conversational and motivating tone."
            }
            Self::Listicle => {
                "Write a short listicle in a single paragraph with several quick, practical tips related to the topic, opening with a surprising statement."
            }
            Self::Motivational => {
                "Write a short, motivational story in a single paragraph with no dialogue, using third-person narration and simple language."
            }
            Self::Business => {
                "Write a concise, professional business insight in a single paragraph, opening with a striking statistic or anecdote and explaining one key lesson."
            }
            Self::Horror => {
                "Write a short, chilling horror story in a single paragraph that builds suspense through eerie details."
            }
            Self::Fantasy => {
                "Write a short, imaginative fantasy story in a single paragraph that opens in a dramatic or whimsical moment."
            }
            Self::LifeHack => {
                "Write a short paragraph that shares several practical, easy-to-implement life hacks related to the topic."
            }
            Self::Personal => {
                "Write a short, personal and reflective story in a single paragraph about a relatable challenge or pivotal moment."
            }
            Self::Stoic => {
                "Write a short, reflective paragraph that draws on Stoic philosophy to address a modern challenge."
            }
        }
    }
}
