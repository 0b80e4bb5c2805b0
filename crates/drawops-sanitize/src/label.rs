//! Label normalization
//!
//! Turns whatever the model put in a `label` field into a short, single-line
//! display string bounded by [`Limits::max_label_words`] and
//! [`Limits::max_label_chars`].

use drawops_model::Limits;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const ELLIPSIS: char = '\u{2026}';

/// Normalize an arbitrary JSON value into a label
///
/// Anything other than a string yields an empty label.
#[must_use]
pub fn normalize_label(value: Option<&Value>, limits: &Limits) -> String {
    match value {
        Some(Value::String(text)) => normalize_label_text(text, limits),
        _ => String::new(),
    }
}

/// Normalize label text
///
/// Runs the cleanup pass until it reaches a fixed point, so normalizing an
/// already normalized label returns it unchanged. Only the first pass can
/// truncate; later passes only remove characters, which bounds the loop.
#[must_use]
pub fn normalize_label_text(raw: &str, limits: &Limits) -> String {
    let mut current = cleanup_pass(raw, limits);
    loop {
        let next = cleanup_pass(&current, limits);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn cleanup_pass(raw: &str, limits: &Limits) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut label = WHITESPACE_RUN.replace_all(trimmed, " ").into_owned();

    if let Some(inner) = strip_wrapping_quotes(&label) {
        label = inner.trim().to_string();
    }

    // `!` and `?` carry tone; other trailing punctuation is noise
    if !label.ends_with(['!', '?']) {
        let kept = label.trim_end_matches(['.', ',', ';', ':']).trim_end().len();
        label.truncate(kept);
    }

    let words: Vec<&str> = label.split(' ').collect();
    if words.len() > limits.max_label_words {
        label = words[..limits.max_label_words].join(" ");
    }

    if label.chars().count() > limits.max_label_chars {
        let mut cut: String = label
            .chars()
            .take(limits.max_label_chars.saturating_sub(1))
            .collect();
        cut.push(ELLIPSIS);
        label = cut;
    }

    label
}

/// Interior of a label wrapped in one matching pair of straight quotes
fn strip_wrapping_quotes(label: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        let rest = label.strip_prefix(quote)?;
        // a lone quote wraps nothing
        if rest.is_empty() {
            return Some(rest);
        }
        rest.strip_suffix(quote)
    })
}
