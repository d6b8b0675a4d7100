//! The user's form submission.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};
use crate::platform::{Platform, Tone};

/// One generate action: raw text, target platforms, and an optional tone.
///
/// Built fresh for every submission and never persisted. Construction does
/// not validate; call [`validate`](Self::validate) before issuing a call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostRequest {
    pub raw_text: String,
    pub platforms: Vec<Platform>,
    pub tone: Option<Tone>,
}

impl PostRequest {
    /// Create a request. Duplicate platforms are dropped, first occurrence wins.
    pub fn new(
        raw_text: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
        tone: Option<Tone>,
    ) -> Self {
        let mut unique = Vec::new();
        for p in platforms {
            if !unique.contains(&p) {
                unique.push(p);
            }
        }
        Self {
            raw_text: raw_text.into(),
            platforms: unique,
            tone,
        }
    }

    /// Build a request from raw form values (checkbox values and the tone
    /// selector value, where `""` means no tone).
    pub fn from_form<S: AsRef<str>>(
        raw_text: impl Into<String>,
        platforms: &[S],
        tone: &str,
    ) -> Result<Self, ParseError> {
        let platforms = platforms
            .iter()
            .map(|p| p.as_ref().parse::<Platform>())
            .collect::<Result<Vec<_>, _>>()?;
        let tone = Tone::from_form_value(tone)?;
        Ok(Self::new(raw_text, platforms, tone))
    }

    /// Check that there is text to work from and at least one platform.
    ///
    /// Only the empty string counts as missing text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.raw_text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if self.platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }
        Ok(())
    }

    /// The tone name used in the prompt.
    pub fn tone_name(&self) -> &'static str {
        self.tone.map_or("neutral", Tone::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_invalid() {
        let req = PostRequest::new("", [Platform::Twitter], None);
        assert_eq!(req.validate(), Err(ValidationError::EmptyText));
    }

    #[test]
    fn no_platforms_is_invalid() {
        let req = PostRequest::new("launch day", [], Some(Tone::Funny));
        assert_eq!(req.validate(), Err(ValidationError::NoPlatforms));
    }

    #[test]
    fn whitespace_text_is_accepted() {
        let req = PostRequest::new("  ", [Platform::Linkedin], None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn duplicate_platforms_are_dropped() {
        let req = PostRequest::new(
            "x",
            [Platform::Twitter, Platform::Linkedin, Platform::Twitter],
            None,
        );
        assert_eq!(req.platforms, vec![Platform::Twitter, Platform::Linkedin]);
    }

    #[test]
    fn from_form_parses_values() {
        let req = PostRequest::from_form("hi", &["Instagram", "Linkedin"], "").unwrap();
        assert_eq!(req.platforms, vec![Platform::Instagram, Platform::Linkedin]);
        assert_eq!(req.tone, None);
        assert_eq!(req.tone_name(), "neutral");

        let err = PostRequest::from_form("hi", &["Myspace"], "").unwrap_err();
        assert_eq!(err, ParseError::UnknownPlatform("Myspace".into()));
    }
}
