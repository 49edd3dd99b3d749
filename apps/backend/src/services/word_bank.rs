//! Word bank sources.

use std::path::Path;

use anyhow::{bail, Context};

use crate::models::{Difficulty, RawTerm};

/// Read terms from a `.json` or `.csv` file.
pub fn read_terms(path: &Path) -> anyhow::Result<Vec<RawTerm>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word bank {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let terms = match extension.as_deref() {
        Some("json") => vocab_core::parse_json(&content),
        Some("csv") => vocab_core::parse_csv(&content),
        _ => bail!(
            "unsupported word bank format for {} (expected .json or .csv)",
            path.display()
        ),
    }
    .with_context(|| format!("failed to parse word bank {}", path.display()))?;

    Ok(terms)
}

/// Starter list used when no word bank file is configured.
pub fn builtin_terms() -> Vec<RawTerm> {
    const STARTER: [(&str, &str, &str, Difficulty); 8] = [
        (
            "Aberration",
            "A departure from what is normal, usual, or expected, typically unwelcome.",
            "The single poor grade on his report card was an aberration.",
            Difficulty::Uncommon,
        ),
        (
            "Ephemeral",
            "Lasting for a very short time.",
            "The beauty of the cherry blossoms is ephemeral.",
            Difficulty::Common,
        ),
        (
            "Garrulous",
            "Excessively talkative, especially on trivial matters.",
            "He was so garrulous that he could barely let anyone else get a word in.",
            Difficulty::Uncommon,
        ),
        (
            "Pusillanimous",
            "Showing a lack of courage or determination; timid.",
            "The pusillanimous leader was afraid to make any difficult decisions.",
            Difficulty::Rare,
        ),
        (
            "Laconic",
            "Using very few words.",
            "His laconic reply suggested a lack of interest in the topic.",
            Difficulty::Common,
        ),
        (
            "Iconoclast",
            "A person who attacks cherished beliefs or institutions.",
            "As an iconoclast, the artist was not afraid to mock the conventions of the art world.",
            Difficulty::Uncommon,
        ),
        (
            "Erudite",
            "Having or showing great knowledge or learning.",
            "The erudite professor could answer any question on ancient history.",
            Difficulty::Common,
        ),
        (
            "Profligate",
            "Recklessly extravagant or wasteful in the use of resources.",
            "The profligate monarch quickly depleted the kingdom's treasury.",
            Difficulty::Rare,
        ),
    ];

    STARTER
        .iter()
        .map(|&(text, definition, example, difficulty)| RawTerm {
            text: text.to_string(),
            definition: definition.to_string(),
            example: Some(example.to_string()),
            difficulty,
        })
        .collect()
}
