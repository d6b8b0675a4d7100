//! Instruction text sent to the generation service.

use crate::request::PostRequest;

/// Build the generation prompt for a request.
///
/// The raw text is embedded verbatim between double quotes. The output
/// format lines are what [`segment`](crate::segment::segment) later splits
/// on, so the `Platform:` label must stay literal.
pub fn compose_prompt(request: &PostRequest) -> String {
    let platforms = request
        .platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate creative social media posts from this raw text:\n\
         \"{raw}\" for these platforms: {platforms} with a {tone} tone.\n\
         Format the output as:\n\
         Platform: [Platform Name]\n\
         Post: [Generated post content]",
        raw = request.raw_text,
        tone = request.tone_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Platform, Tone};

    #[test]
    fn embeds_text_platforms_and_tone() {
        let req = PostRequest::new(
            "We shipped v2!",
            [Platform::Linkedin, Platform::Twitter],
            Some(Tone::Professional),
        );
        let prompt = compose_prompt(&req);
        assert!(prompt.contains("\"We shipped v2!\""));
        assert!(prompt.contains("for these platforms: Linkedin, Twitter with"));
        assert!(prompt.contains("with a Professional tone."));
        assert!(prompt.contains("Platform: [Platform Name]\nPost: [Generated post content]"));
    }

    #[test]
    fn missing_tone_is_neutral() {
        let req = PostRequest::new("hello", [Platform::Instagram], None);
        assert!(compose_prompt(&req).contains("with a neutral tone."));
    }

    #[test]
    fn raw_text_is_not_escaped() {
        let req = PostRequest::new("line one\n\"quoted\"", [Platform::Twitter], None);
        assert!(compose_prompt(&req).contains("\"line one\n\"quoted\"\""));
    }
}
