//! Visual styles and their image-generation parameters.

use serde::{Deserialize, Serialize};
use storyreel_error::{StoryreelResult, ValidationError, ValidationErrorKind};

/// Illustration style requested for scene images.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Style {
    /// Modern anime illustration
    Anime,
    /// Photographic
    Realistic,
    /// Painterly fantasy art
    Fantasy,
    /// Soft watercolor
    Watercolor,
    /// Neon cyberpunk
    Cyberpunk,
    /// Monochrome ink drawing
    Ink,
    /// Flat cartoon
    Cartoon,
}

/// Generation parameters derived from a [`Style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleProfile {
    /// Style this row describes
    pub style: Style,
    /// Text appended to every scene prompt
    pub prompt_suffix: &'static str,
    /// Backend style preset, if the backend has one for this style
    pub enhance_style: Option<&'static str>,
}

// Indexed by `Style as usize`; order must match the enum.
static STYLE_TABLE: [StyleProfile; 7] = [
    StyleProfile {
        style: Style::Anime,
        prompt_suffix: ", vibrant modern anime portrait, expressive characters, bold outlines, detailed features, vivid colors, and energetic composition",
        enhance_style: Some("anime"),
    },
    StyleProfile {
        style: Style::Realistic,
        prompt_suffix: ", hyper-realistic portrait, sharp focus, cinematic composition, dramatic lighting, and high-level photographic details",
        enhance_style: Some("photograph"),
    },
    StyleProfile {
        style: Style::Fantasy,
        prompt_suffix: ", ethereal fantasy portrait, magical atmosphere, intricate details, dreamlike scenery, and glowing elements",
        enhance_style: Some("fantasy-art"),
    },
    StyleProfile {
        style: Style::Watercolor,
        prompt_suffix: ", delicate watercolor painting, soft bleeding edges, translucent washes of color, visible paper texture",
        enhance_style: None,
    },
    StyleProfile {
        style: Style::Cyberpunk,
        prompt_suffix: ", futuristic cyberpunk portrait, neon lights, gritty urban background, high-tech elements, and edgy styling",
        enhance_style: Some("futuristic-cyberpunk-cityscape"),
    },
    StyleProfile {
        style: Style::Ink,
        prompt_suffix: ", intricate ink portrait, bold precise lines, sharp contrast between light and shadow, monochromatic, detailed cross-hatching and stippling",
        enhance_style: Some("japanese-ink-drawing"),
    },
    StyleProfile {
        style: Style::Cartoon,
        prompt_suffix: ", playful cartoon illustration, clean outlines, flat bright colors, exaggerated expressions",
        enhance_style: None,
    },
];

impl Style {
    /// Parse a style name, rejecting unknown values.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyreel_core::Style;
    ///
    /// assert_eq!(Style::parse("anime").unwrap(), Style::Anime);
    /// assert!(Style::parse("pastel").is_err());
    /// ```
    #[track_caller]
    pub fn parse(value: &str) -> StoryreelResult<Self> {
        value.trim().to_ascii_lowercase().parse().map_err(|_| {
            ValidationError::new(ValidationErrorKind::Style(value.to_string())).into()
        })
    }

    /// Look up the generation parameters for this style.
    pub fn profile(&self) -> &'static StyleProfile {
        &STYLE_TABLE[*self as usize]
    }
}
