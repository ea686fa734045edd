//! Flat-text form of a record's notes and comment thread.
//!
//! Each comment is written as a block
//!
//! ```text
//! ---
//! 📝 Comment by <author>
//! 📅 <timestamp>
//!
//! <text>
//! ```
//!
//! and blocks are joined by a blank line. Lines of user text that would be
//! mistaken for a delimiter or a header are prefixed with `\` on the way out
//! and unescaped on the way back in.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use shared::domain::Comment;

use crate::{Commented, TableError};

pub const DELIMITER: &str = "---";
pub const AUTHOR_MARKER: &str = "📝 Comment by ";
pub const DATE_MARKER: &str = "📅 ";
pub const ANONYMOUS: &str = "Anonymous";

/// Date format written by older exports, e.g. `Jan 5, 2024 at 03:07 PM`.
const LEGACY_DATE_FORMAT: &str = "%b %d, %Y at %I:%M %p";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedNotes {
    pub notes: Vec<String>,
    pub comments: Vec<Comment>,
}

pub fn encode_comment(comment: &Comment) -> String {
    format!(
        "{DELIMITER}\n{AUTHOR_MARKER}{}\n{DATE_MARKER}{}\n\n{}\n",
        author_line(&comment.author),
        comment.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        escape(&comment.text),
    )
}

pub fn encode_notes(notes: Option<&str>, comments: &[Comment]) -> String {
    let mut blocks = Vec::with_capacity(comments.len() + 1);
    if let Some(notes) = notes.map(str::trim).filter(|notes| !notes.is_empty()) {
        blocks.push(escape(notes));
    }
    blocks.extend(comments.iter().map(encode_comment));
    blocks.join("\n\n")
}

pub fn decode_notes(text: &str) -> DecodedNotes {
    let mut decoded = DecodedNotes::default();
    for section in sections(text) {
        match parse_comment(&section) {
            Some(comment) => decoded.comments.push(comment),
            None => {
                let note = unescape(section.join("\n").trim());
                if !note.is_empty() {
                    decoded.notes.push(note);
                }
            }
        }
    }
    decoded
}

/// Export of a record's notes and comments in the flat-text format.
pub fn export<R: Commented>(record: &R) -> String {
    encode_notes(record.notes(), record.comments())
}

/// Appends a comment to the end of the record's thread.
pub fn append_comment<'r, R: Commented>(
    record: &'r mut R,
    author: Option<&str>,
    text: &str,
    at: DateTime<Utc>,
) -> Result<&'r Comment, TableError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TableError::EmptyComment);
    }
    let author = author
        .map(author_line)
        .filter(|author| !author.is_empty())
        .unwrap_or_else(|| ANONYMOUS.to_string());
    let thread = record.comments_mut();
    thread.push(Comment {
        author,
        timestamp: at,
        text: text.to_string(),
    });
    Ok(&thread[thread.len() - 1])
}

/// Author names occupy exactly one header line: whitespace runs collapse to a
/// single space and control characters are dropped.
fn author_line(author: &str) -> String {
    author
        .split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, LEGACY_DATE_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = vec![Vec::new()];
    for line in text.lines() {
        if line.trim_end() == DELIMITER {
            sections.push(Vec::new());
        } else if let Some(current) = sections.last_mut() {
            current.push(line);
        }
    }
    sections.retain(|lines| lines.iter().any(|line| !line.trim().is_empty()));
    sections
}

fn parse_comment(lines: &[&str]) -> Option<Comment> {
    let mut body = lines.iter().skip_while(|line| line.trim().is_empty());
    let author = body.next()?.strip_prefix(AUTHOR_MARKER)?;
    let timestamp = parse_timestamp(body.next()?.strip_prefix(DATE_MARKER)?)?;
    let text: Vec<&str> = body.copied().collect();
    Some(Comment {
        author: author.trim().to_string(),
        timestamp,
        text: unescape(text.join("\n").trim()),
    })
}

fn needs_escape(line: &str) -> bool {
    line.starts_with(DELIMITER)
        || line.starts_with(AUTHOR_MARKER.trim_end())
        || line.starts_with(DATE_MARKER.trim_end())
        || line.starts_with('\\')
}

fn escape(text: &str) -> String {
    text.lines()
        .map(|line| {
            if needs_escape(line) {
                format!("\\{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape(text: &str) -> String {
    text.lines()
        .map(|line| line.strip_prefix('\\').unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/comments_tests.rs"]
mod tests;
