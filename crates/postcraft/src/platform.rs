//! Target platforms and post tones offered by the form.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;

/// A social network a post can be generated for.
///
/// The serialized names are the exact checkbox values of the form.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Linkedin,
    Instagram,
    Twitter,
}

impl Platform {
    /// Every platform, in checkbox order.
    pub const ALL: [Platform; 3] = [Platform::Linkedin, Platform::Instagram, Platform::Twitter];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linkedin => "Linkedin",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseError::UnknownPlatform(s.to_string()))
    }
}

/// The voice the generated posts should take.
///
/// "No tone" is represented as `Option::<Tone>::None`, which the prompt
/// renders as `neutral`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Professional,
    Casual,
    Funny,
    Inspirational,
}

impl Tone {
    /// Every tone, in selector order (after the blank option).
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Funny, Tone::Inspirational];

    /// Label of the blank selector option.
    pub const PLACEHOLDER: &'static str = "-- Choose Tone --";

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Funny => "Funny",
            Tone::Inspirational => "Inspirational",
        }
    }

    /// Parse a selector value. The blank option (`""`) means no tone.
    pub fn from_form_value(value: &str) -> Result<Option<Tone>, ParseError> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }

    /// Text of the badge shown under the selector.
    pub fn badge_label(self) -> String {
        format!("{} Tone Selected", self.as_str())
    }

    /// Style variant for the badge (e.g., "info", "success").
    pub fn variant(self) -> &'static str {
        match self {
            Tone::Professional => "info",
            Tone::Casual => "muted",
            Tone::Funny => "warning",
            Tone::Inspirational => "success",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseError::UnknownTone(s.to_string()))
    }
}
