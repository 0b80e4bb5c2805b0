//! Markdown fence stripping
//!
//! Models often wrap their JSON in a fenced block, sometimes with prose
//! around it. This picks the most likely payload; it is a heuristic and the
//! decoder must tolerate whatever comes out.

use once_cell::sync::Lazy;
use regex::Regex;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```json(.*?)```").expect("json fence pattern is valid"));

static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.*?)```").expect("fence pattern is valid"));

/// Extract the fenced payload from `raw`, or return it trimmed
///
/// A block tagged `json` (any case) wins over an untagged block. Only the
/// first match of each pattern is considered.
#[must_use]
pub fn strip_fences(raw: &str) -> &str {
    let interior = JSON_FENCE
        .captures(raw)
        .or_else(|| ANY_FENCE.captures(raw))
        .and_then(|caps| caps.get(1));

    match interior {
        Some(body) => body.as_str().trim(),
        None => raw.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fence() {
        let raw = "Here you go:\n```json\n{\"operations\": []}\n```\nEnjoy!";
        assert_eq!(strip_fences(raw), "{\"operations\": []}");
    }

    #[test]
    fn json_tag_is_case_insensitive() {
        let raw = "```JSON\n[1, 2]\n```";
        assert_eq!(strip_fences(raw), "[1, 2]");
    }

    #[test]
    fn json_fence_preferred_over_earlier_plain_fence() {
        let raw = "```\nnot this\n```\ntext\n```json\n{\"ops\": []}\n```";
        assert_eq!(strip_fences(raw), "{\"ops\": []}");
    }

    #[test]
    fn untagged_fence() {
        let raw = "```\n{\"operations\": []}\n```";
        assert_eq!(strip_fences(raw), "{\"operations\": []}");
    }

    #[test]
    fn no_fence_trims() {
        assert_eq!(strip_fences("  \n{\"a\": 1}\n  "), "{\"a\": 1}");
        assert_eq!(strip_fences("just prose"), "just prose");
    }

    #[test]
    fn unterminated_fence_is_left_alone() {
        let raw = "```json\n{\"operations\": []}";
        assert_eq!(strip_fences(raw), raw);
    }
}
