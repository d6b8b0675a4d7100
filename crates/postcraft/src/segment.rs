//! Split generated text into per-platform display blocks.
//!
//! The service is asked to label each post with `Platform:`. Segmentation
//! splits on that literal token and nothing else: the platform name and the
//! post body stay together in one block, and the label is added back when
//! the block is rendered.

use serde::Serialize;

/// The delimiter the prompt asks the service to emit before each post.
pub const PLATFORM_LABEL: &str = "Platform:";

/// One trimmed, non-empty fragment of generated text.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DisplayBlock {
    pub body: String,
}

/// The block as shown to the user: label, a space, then the body.
impl std::fmt::Display for DisplayBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PLATFORM_LABEL} {}", self.body)
    }
}

/// Split `text` on [`PLATFORM_LABEL`], trim each fragment, and drop the
/// ones that are empty after trimming. Order is preserved.
pub fn segment(text: &str) -> Vec<DisplayBlock> {
    text.split(PLATFORM_LABEL)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| DisplayBlock {
            body: fragment.to_string(),
        })
        .collect()
}

/// Join blocks back into labeled text. `segment(&rejoin(&segment(t)))`
/// equals `segment(t)`.
pub fn rejoin(blocks: &[DisplayBlock]) -> String {
    blocks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(text: &str) -> Vec<String> {
        segment(text).into_iter().map(|b| b.body).collect()
    }

    #[test]
    fn single_block() {
        assert_eq!(
            bodies("Platform: Linkedin\nPost: Hello world"),
            ["Linkedin\nPost: Hello world"]
        );
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn whitespace_only_input_has_no_blocks() {
        assert!(segment("   ").is_empty());
        assert!(segment("\n\t Platform: \n Platform:").is_empty());
    }

    #[test]
    fn preamble_before_first_label_is_kept() {
        let text = "Here are your posts:\n\nPlatform: Twitter\nPost: hi\n\nPlatform: Instagram\nPost: yo";
        assert_eq!(
            bodies(text),
            [
                "Here are your posts:",
                "Twitter\nPost: hi",
                "Instagram\nPost: yo"
            ]
        );
    }

    #[test]
    fn text_without_label_is_one_block() {
        assert_eq!(bodies("  just a post  "), ["just a post"]);
    }

    #[test]
    fn rejoin_then_segment_is_stable() {
        let text = "**Platform:** Linkedin\nPost: A\nPlatform:Twitter\nPost: B\n\nPlatform:   ";
        let first = segment(text);
        let second = segment(&rejoin(&first));
        assert_eq!(first, second);
        assert_eq!(segment(&rejoin(&second)), second);
    }

    #[test]
    fn segment_is_repeatable() {
        let text = "Platform: Linkedin\nPost: one\nPlatform: Twitter\nPost: two";
        assert_eq!(segment(text), segment(text));
    }

    #[test]
    fn display_prefixes_label() {
        let block = DisplayBlock {
            body: "Twitter\nPost: hi".into(),
        };
        assert_eq!(block.to_string(), "Platform: Twitter\nPost: hi");
    }
}
