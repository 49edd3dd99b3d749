//! Word bank parsers.
//!
//! # JSON format
//! ```json
//! [
//!   {
//!     "word": "Laconic",
//!     "definition": "Using very few words.",
//!     "example": "His laconic reply suggested a lack of interest.",
//!     "difficulty": "common"
//!   }
//! ]
//! ```
//!
//! # CSV format
//! ```text
//! word,definition,sentence
//! Laconic,Using very few words.,His laconic reply suggested a lack of interest.
//! ```
//!
//! Rows with an empty word are skipped. Words are unique, ignoring case.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{ParseError, ParseResult};
use crate::types::{Difficulty, RawTerm};

#[derive(Debug, Deserialize)]
struct JsonEntry {
    #[serde(default)]
    word: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    word: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    sentence: Option<String>,
}

/// Parse a JSON array of word entries.
///
/// Error positions are 1-based entry indexes.
pub fn parse_json(content: &str) -> ParseResult<Vec<RawTerm>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let entries: Vec<JsonEntry> = serde_json::from_str(content)?;
    let mut collector = Collector::default();
    for (idx, entry) in entries.into_iter().enumerate() {
        collector.push(
            entry.word,
            entry.definition,
            entry.example,
            entry.difficulty.as_deref(),
            idx + 1,
        )?;
    }
    Ok(collector.finish())
}

/// Parse CSV with `word`, `definition` and `sentence` header columns.
///
/// Error positions are file line numbers. Extra columns are ignored.
pub fn parse_csv(content: &str) -> ParseResult<Vec<RawTerm>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut collector = Collector::default();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let row: CsvRow = record.deserialize(Some(&headers))?;
        collector.push(row.word, row.definition, row.sentence, None, line)?;
    }
    Ok(collector.finish())
}

#[derive(Default)]
struct Collector {
    terms: Vec<RawTerm>,
    seen: HashSet<String>,
}

impl Collector {
    fn push(
        &mut self,
        word: String,
        definition: String,
        example: Option<String>,
        difficulty: Option<&str>,
        line: usize,
    ) -> ParseResult<()> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(());
        }

        let definition = definition.trim();
        if definition.is_empty() {
            return Err(ParseError::MissingDefinition {
                word: word.to_string(),
                line,
            });
        }

        if !self.seen.insert(word.to_lowercase()) {
            return Err(ParseError::DuplicateTerm {
                word: word.to_string(),
                line,
            });
        }

        let example = example
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let difficulty = difficulty
            .and_then(Difficulty::from_str)
            .unwrap_or_default();

        self.terms.push(RawTerm {
            text: word.to_string(),
            definition: definition.to_string(),
            example,
            difficulty,
        });
        Ok(())
    }

    fn finish(self) -> Vec<RawTerm> {
        self.terms
    }
}
