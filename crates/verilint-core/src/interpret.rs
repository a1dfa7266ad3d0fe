//! Response interpretation.
//!
//! The model's reply is free text that is *supposed* to follow the output
//! contract in the prompt. Each field is pulled out by its own rule and each
//! rule has a default, so a drifting reply degrades field by field instead of
//! failing the whole record:
//!
//! | Rule | Source | Default |
//! |------|--------|---------|
//! | no defect | `RESULT: [NO]` | - |
//! | lines | `ALL DEFECT LINES: [a-b]` (multi) or `DEFECT LINE: [n]` | none |
//! | main line | `MAIN DEFECT LINE: [n]` (multi) or the single line | none |
//! | category | `DEFECT CATEGORY: [TAG]` | `UNKNOWN` |
//! | description | `DESCRIPTION: ...` first sentence | cleaned raw text |

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::AnalysisError;
use crate::model::DefectRecord;
use crate::taxonomy::{DefectCategory, CATEGORY_UNKNOWN};

const NO_DEFECT_MARKER: &str = "RESULT: [NO]";
const DEFECT_MARKER: &str = "RESULT: [YES]";
const MULTIPLE_MARKER: &str = "MULTIPLE DEFECTS: [YES]";

/// Longest description written to the report, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

macro_rules! static_regex {
    ($pat:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pat).expect("static regex must compile"))
    }};
}

fn all_lines_re() -> &'static Regex {
    static_regex!(r"ALL DEFECT LINES:\s*\[([0-9\-]+)\]")
}

fn main_line_re() -> &'static Regex {
    static_regex!(r"MAIN DEFECT LINE:\s*\[(\d+)\]")
}

fn single_line_re() -> &'static Regex {
    static_regex!(r"DEFECT LINE:\s*\[(\d+)\]")
}

fn category_re() -> &'static Regex {
    static_regex!(r"DEFECT CATEGORY:\s*\[?([A-Za-z_]+)\]?")
}

fn description_re() -> &'static Regex {
    static_regex!(r"DESCRIPTION:\s*([^\n]+)")
}

/// Marker lines removed when falling back to the raw text as description.
fn marker_line_res() -> &'static [Regex; 5] {
    static RES: OnceLock<[Regex; 5]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"MULTIPLE DEFECTS:[^\n]*",
            r"ALL DEFECT LINES:[^\n]*",
            r"MAIN DEFECT LINE:[^\n]*",
            r"DEFECT LINE:[^\n]*",
            r"DEFECT CATEGORY:[^\n]*",
        ]
        .map(|p| Regex::new(p).expect("static regex must compile"))
    })
}

/// Interpret the outcome of one module's analysis.
pub fn interpret(outcome: &Result<serde_json::Value, AnalysisError>) -> DefectRecord {
    match outcome {
        Err(e) => record_for_error(e),
        Ok(body) => match message_content(body) {
            Ok(content) => interpret_text(content),
            Err(e) => record_for_error(&e),
        },
    }
}

pub fn record_for_error(err: &AnalysisError) -> DefectRecord {
    match err {
        AnalysisError::UnknownFormat => DefectRecord::unknown_format(),
        other => DefectRecord::error(other.to_string()),
    }
}

/// Locate the reply text: `message.content` (Ollama chat) or
/// `choices[0].message.content` (OpenAI-compatible).
pub fn message_content(body: &serde_json::Value) -> Result<&str, AnalysisError> {
    body.pointer("/message/content")
        .or_else(|| body.pointer("/choices/0/message/content"))
        .and_then(|v| v.as_str())
        .ok_or(AnalysisError::UnknownFormat)
}

/// Interpret reply text that follows (or approximately follows) the output contract.
pub fn interpret_text(content: &str) -> DefectRecord {
    if content.contains(NO_DEFECT_MARKER) {
        return DefectRecord::no_defects();
    }

    let (defect_line, main_line) = if content.contains(MULTIPLE_MARKER) {
        (
            capture(all_lines_re(), content),
            capture(main_line_re(), content),
        )
    } else {
        let line = capture(single_line_re(), content);
        (line.clone(), line)
    };

    let category = capture(category_re(), content).unwrap_or_else(|| CATEGORY_UNKNOWN.into());
    if category != CATEGORY_UNKNOWN && category.parse::<DefectCategory>().is_err() {
        debug!(category = %category, "reply uses a category outside the taxonomy");
    }

    let description = capture(description_re(), content)
        .map(|d| first_sentence(&d))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| fallback_description(content));

    DefectRecord {
        defect_line,
        category,
        description,
        main_line,
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Keep the first sentence (through the first `.`), then cap the length.
fn first_sentence(raw: &str) -> String {
    let mut text = raw.trim();
    if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
        text = text[1..text.len() - 1].trim();
    }
    let sentence = match text.find('.') {
        Some(idx) => &text[..=idx],
        None => text,
    };
    truncate_chars(sentence, MAX_DESCRIPTION_CHARS)
}

/// Raw text minus result markers and marker lines, whitespace collapsed.
fn fallback_description(content: &str) -> String {
    let mut text = content
        .replace(DEFECT_MARKER, "")
        .replace(NO_DEFECT_MARKER, "");
    for re in marker_line_res() {
        text = re.replace_all(&text, "").into_owned();
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, MAX_DESCRIPTION_CHARS)
}

/// Truncate to `max` characters, replacing the tail with `...` when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
