//! Line splitting and file-level text checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record terminator required by the format.
pub const TERMINATOR: &str = "\r\n";

/// Line terminator convention observed in a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Every terminator is CR+LF.
    CrLf,
    /// Every terminator is a bare LF.
    Lf,
    /// Every terminator is a bare CR.
    Cr,
    /// More than one convention.
    Mixed,
    /// No terminator at all (single unterminated line or empty input).
    None,
}

impl LineEnding {
    /// Whether the convention satisfies the format.
    pub fn is_valid(&self) -> bool {
        matches!(self, LineEnding::CrLf | LineEnding::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "CRLF",
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
            LineEnding::Mixed => "mixed",
            LineEnding::None => "none",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify the terminators used in `text`.
pub fn detect_line_ending(text: &str) -> LineEnding {
    let bytes = text.as_bytes();
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                crlf += 1;
                i += 1;
            }
            b'\r' => cr += 1,
            b'\n' => lf += 1,
            _ => {}
        }
        i += 1;
    }

    match (crlf > 0, lf > 0, cr > 0) {
        (false, false, false) => LineEnding::None,
        (true, false, false) => LineEnding::CrLf,
        (false, true, false) => LineEnding::Lf,
        (false, false, true) => LineEnding::Cr,
        _ => LineEnding::Mixed,
    }
}

/// Split a text block into record lines.
///
/// Lines are separated by LF with an optional preceding CR. Lines that are
/// empty or whitespace only are dropped; order is preserved and content is
/// not trimmed.
pub fn parse(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Whether every character is 7-bit ASCII.
pub fn is_ascii_only(text: &str) -> bool {
    text.is_ascii()
}
