//! Subcommand bodies

use anyhow::{Context, Result};
use drawops_model::Limits;
use drawops_prompt::PromptBuilder;
use drawops_sanitize::Sanitizer;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Limits from `config`, or the defaults when no file is given
///
/// # Errors
/// Returns error if the file cannot be read or holds invalid limits
pub fn load_limits(config: Option<&Path>) -> Result<Limits> {
    match config {
        Some(path) => Limits::load(path)
            .with_context(|| format!("failed to load limits from {}", path.display())),
        None => Ok(Limits::default()),
    }
}

/// Raw model response from `file`, or stdin for `None` and `-`
///
/// # Errors
/// Returns error if the input cannot be read as UTF-8 text
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Output options for `drawops sanitize`
#[derive(Debug, Clone, Copy, Default)]
pub struct SanitizeOptions {
    /// Print the full report instead of the operations envelope
    pub report: bool,
    /// Indent the JSON output
    pub pretty: bool,
}

/// JSON text printed by `drawops sanitize`
///
/// # Errors
/// Returns error if the output cannot be serialized
pub fn sanitize(raw: &str, limits: Limits, options: SanitizeOptions) -> Result<String> {
    let report = Sanitizer::new(limits).sanitize_with_report(raw);
    info!(
        accepted = report.operations.len(),
        dropped = report.dropped.len(),
        decoded = report.decode_error.is_none(),
        "sanitized model response"
    );

    if options.report {
        to_json(&report, options.pretty)
    } else {
        to_json(&report.into_response(), options.pretty)
    }
}

/// Instruction text printed by `drawops prompt`
#[must_use]
pub fn prompt(user_prompt: &str, limits: &Limits) -> String {
    PromptBuilder::new(limits).build(user_prompt)
}

/// TOML printed by `drawops limits`
///
/// # Errors
/// Returns error if the limits cannot be rendered
pub fn limits(limits: &Limits) -> Result<String> {
    limits.to_toml_string().context("failed to render limits")
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("failed to serialize output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawops_model::{BlockRefPolicy, OpKind};
    use drawops_test_utils::{arrow, block, fenced, payload, stroke_path};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::io::Write;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn sanitize_prints_envelope() {
        let raw = fenced(&payload(&[block("Hello"), stroke_path(2)]));
        let out = sanitize(&raw, Limits::default(), SanitizeOptions::default()).unwrap();

        assert_eq!(
            parse(&out),
            json!({"operations": [{"op": "add_block", "blockType": "text", "label": "Hello"}]})
        );
        assert!(!out.contains('\n'));
    }

    #[test]
    fn sanitize_prose_prints_empty_list() {
        let out = sanitize("no drawing today", Limits::default(), SanitizeOptions::default())
            .unwrap();
        assert_eq!(out, r#"{"operations":[]}"#);
    }

    #[test]
    fn sanitize_report_lists_drops() {
        let raw = payload(&[block("A"), arrow(0, -1)]);
        let options = SanitizeOptions {
            report: true,
            pretty: true,
        };
        let out = sanitize(&raw, Limits::default(), options).unwrap();
        let value = parse(&out);

        assert!(out.contains('\n'));
        assert_eq!(value["counts"]["blocks"], 1);
        assert_eq!(value["dropped"][0]["index"], 1);
        assert_eq!(value["dropped"][0]["reason"], "invalid_index");
    }

    #[test]
    fn load_limits_defaults_without_config() {
        assert_eq!(load_limits(None).unwrap(), Limits::default());
    }

    #[test]
    fn load_limits_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_arrows = 3\nblock_refs = \"accepted_blocks\"").unwrap();

        let limits = load_limits(Some(file.path())).unwrap();
        assert_eq!(limits.cap_for(OpKind::AddArrow), 3);
        assert_eq!(limits.block_refs, BlockRefPolicy::AcceptedBlocks);
    }

    #[test]
    fn load_limits_reports_path() {
        let err = load_limits(Some(Path::new("/nonexistent/drawops.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/drawops.toml"));
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_label_chars = 0").unwrap();

        let err = load_limits(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("max_label_chars"));
    }

    #[test]
    fn read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", payload(&[block("From file")])).unwrap();

        let raw = read_input(Some(file.path())).unwrap();
        assert!(raw.contains("From file"));
    }

    #[test]
    fn limits_render_as_toml() {
        let text = limits(&Limits::default().with_cap(OpKind::AddShape, 2)).unwrap();
        assert!(text.contains("max_shapes = 2"));
        assert!(text.contains("block_refs = \"permissive\""));
    }

    #[test]
    fn prompt_uses_limits() {
        let text = prompt("a rocket", &Limits::default().with_cap(OpKind::AddBlock, 3));
        assert!(text.contains("a rocket"));
        assert!(text.contains("AT MOST 3 add_block operations"));
    }
}
