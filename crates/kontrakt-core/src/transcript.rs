//! OCR transcript text as seen by the extractors, and the writer that
//! produces transcripts in the shape the upstream OCR stage uses.
//!
//! A transcript is plain UTF-8 text. The OCR stage writes one recognized
//! span per line and appends `  (conf=0.97)` when it has a score, or
//! `  (low_conf=0.41)` when the score is below a configured threshold.
//! Pages are introduced by `--- Страница N ---` and followed by a blank line.

use std::fmt::Write as _;

/// Marker written for a page without any recognized text.
pub const EMPTY_PAGE_MARKER: &str = "[Пусто или нераспознано]";

/// Immutable view of one document's transcript.
#[derive(Debug, Clone)]
pub struct DocumentText<'a> {
    raw: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> DocumentText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lines: document_lines(raw),
        }
    }

    /// The full transcript.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Trimmed, non-blank lines in reading order.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// The transcript with line breaks folded into spaces.
    pub fn folded(&self) -> String {
        self.raw.replace(['\r', '\n'], " ")
    }

    /// First `n` raw lines, for previews.
    pub fn preview(&self, n: usize) -> String {
        self.raw.lines().take(n).collect::<Vec<_>>().join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split text into trimmed lines, dropping blank ones.
pub fn document_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// One recognized text span with its optional recognition score.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub text: String,
    pub score: Option<f32>,
}

impl TranscriptLine {
    pub fn new(text: impl Into<String>, score: Option<f32>) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Builds transcript text page by page.
#[derive(Debug, Default)]
pub struct TranscriptWriter {
    conf_threshold: Option<f32>,
    buf: String,
}

impl TranscriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark lines scoring below `threshold` as `low_conf` instead of `conf`.
    pub fn with_conf_threshold(mut self, threshold: Option<f32>) -> Self {
        self.conf_threshold = threshold;
        self
    }

    /// Append one page. Pages are numbered from 1.
    pub fn push_page(&mut self, page: usize, lines: &[TranscriptLine]) {
        let _ = writeln!(self.buf, "--- Страница {} ---", page);

        let lines: Vec<&TranscriptLine> = lines.iter().filter(|l| !l.text.trim().is_empty()).collect();
        if lines.is_empty() {
            let _ = writeln!(self.buf, "{}", EMPTY_PAGE_MARKER);
            self.buf.push('\n');
            return;
        }

        for line in lines {
            let text = line.text.trim();
            match (line.score, self.conf_threshold) {
                (Some(score), Some(threshold)) if score < threshold => {
                    let _ = writeln!(self.buf, "{}  (low_conf={:.2})", text, score);
                }
                (Some(score), _) => {
                    let _ = writeln!(self.buf, "{}  (conf={:.2})", text, score);
                }
                (None, _) => {
                    let _ = writeln!(self.buf, "{}", text);
                }
            }
        }
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
