//! CSV score file: one `player,score` row per finished session.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub player: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(player: impl Into<String>, score: u32) -> Self {
        Self {
            player: player.into(),
            score,
        }
    }

    /// The record as one CSV line, without the line terminator.
    pub fn to_csv_line(&self) -> String {
        format!("{},{}", quote_field(&self.player), self.score)
    }
}

/// Append one record, creating the file if needed.
pub fn append_score(path: &Path, record: &ScoreRecord) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open score file {}", path.display()))?;
    writeln!(file, "{}", record.to_csv_line())
        .with_context(|| format!("write score file {}", path.display()))?;
    Ok(())
}

/// Read every well-formed record. A missing file has no records.
pub fn load_scores(path: &Path) -> Result<Vec<ScoreRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("read score file {}", path.display()))
        }
    };
    Ok(parse_records(&text))
}

pub fn best_score(records: &[ScoreRecord]) -> Option<u32> {
    records.iter().map(|r| r.score).max()
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse CSV text, skipping rows that are not `player,score`.
pub fn parse_records(text: &str) -> Vec<ScoreRecord> {
    split_rows(text)
        .into_iter()
        .filter_map(|fields| match fields.as_slice() {
            [player, score] => score
                .trim()
                .parse()
                .ok()
                .map(|score| ScoreRecord::new(player.clone(), score)),
            _ => None,
        })
        .collect()
}

// Quoted fields may span lines, so rows are split while scanning.
fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match (in_quotes, ch) {
            (true, '"') if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            (true, '"') => in_quotes = false,
            (true, _) => field.push(ch),
            (false, '"') if field.is_empty() => in_quotes = true,
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (false, '\r') => {}
            (false, '\n') => {
                fields.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut fields));
            }
            (false, _) => field.push(ch),
        }
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }
    rows
}
