//! Multiple-choice question construction.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::types::{Term, TermId, WordBank};

/// Options per question: one correct answer plus three distractors.
pub const OPTION_COUNT: usize = 4;

const BLANK: &str = "_____";

/// "Pick the definition" question.
///
/// Serialize-only. The answer position is not part of the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub term_id: TermId,
    pub text: String,
    pub options: Vec<String>,
    #[serde(skip)]
    correct_index: usize,
}

impl Question {
    /// Position of the correct definition in `options`.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// "Pick the word that fills the blank" question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClozeQuestion {
    pub term_id: TermId,
    pub sentence: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Build a definition question for `term` with three random distractors.
pub fn build_question<R: Rng + ?Sized>(
    bank: &WordBank,
    term: &Term,
    rng: &mut R,
) -> Result<Question, QuizError> {
    ensure_enough_terms(bank)?;

    let pool = distinct_others(bank, term, |t| t.definition.as_str());
    let (options, correct_index) = assemble(&term.definition, &pool, rng)?;

    Ok(Question {
        term_id: term.id,
        text: term.text.clone(),
        options,
        correct_index,
    })
}

/// Build a fill-in-the-blank question from a random term whose example
/// sentence contains the term itself.
pub fn build_cloze<R: Rng + ?Sized>(bank: &WordBank, rng: &mut R) -> Result<ClozeQuestion, QuizError> {
    if bank.is_empty() {
        return Err(QuizError::NoTermsAvailable);
    }
    ensure_enough_terms(bank)?;

    let eligible: Vec<(&Term, String)> = bank
        .iter()
        .filter_map(|t| {
            let example = t.example.as_deref()?;
            blank_out(example, &t.text).map(|sentence| (t, sentence))
        })
        .collect();
    let (term, sentence) = eligible.choose(rng).ok_or(QuizError::NoTermsAvailable)?;

    let pool = distinct_others(bank, term, |t| t.text.as_str());
    let (options, _) = assemble(&term.text, &pool, rng)?;

    Ok(ClozeQuestion {
        term_id: term.id,
        sentence: sentence.clone(),
        options,
        correct_answer: term.text.clone(),
    })
}

/// Replace every whole-word, ASCII case-insensitive occurrence of `word`
/// with a blank. Occurrences inside a longer word ("ephemerality") are kept.
///
/// Returns `None` when the word does not occur on its own.
pub fn blank_out(sentence: &str, word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        return None;
    }

    // ASCII lowercasing keeps byte offsets aligned with the original.
    let haystack = sentence.to_ascii_lowercase();
    let needle = word.to_ascii_lowercase();

    let mut out = String::with_capacity(sentence.len());
    let mut last = 0;
    let mut found = false;
    let bytes = haystack.as_bytes();
    for (start, _) in haystack.match_indices(&needle) {
        let end = start + needle.len();
        let glued_before = start > 0 && is_word_byte(bytes[start - 1]);
        let glued_after = end < bytes.len() && is_word_byte(bytes[end]);
        if glued_before || glued_after {
            continue;
        }
        out.push_str(&sentence[last..start]);
        out.push_str(BLANK);
        last = end;
        found = true;
    }
    if !found {
        return None;
    }
    out.push_str(&sentence[last..]);
    Some(out)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn ensure_enough_terms(bank: &WordBank) -> Result<(), QuizError> {
    if bank.len() < OPTION_COUNT {
        return Err(QuizError::InsufficientWordBank {
            required: OPTION_COUNT,
            available: bank.len(),
        });
    }
    Ok(())
}

/// Field values of every other term, without repeats or copies of the answer.
fn distinct_others<'a>(bank: &'a WordBank, term: &'a Term, field: fn(&Term) -> &str) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(field(term));
    bank.iter()
        .filter(|t| t.id != term.id)
        .map(field)
        .filter(|value| seen.insert(*value))
        .collect()
}

/// Draw distractors without replacement and drop the answer at a random slot.
fn assemble<R: Rng + ?Sized>(
    correct: &str,
    pool: &[&str],
    rng: &mut R,
) -> Result<(Vec<String>, usize), QuizError> {
    let wanted = OPTION_COUNT - 1;
    if pool.len() < wanted {
        return Err(QuizError::InsufficientWordBank {
            required: OPTION_COUNT,
            available: pool.len() + 1,
        });
    }

    let mut options: Vec<String> = pool
        .choose_multiple(rng, wanted)
        .map(|value| value.to_string())
        .collect();
    options.shuffle(rng);
    let correct_index = rng.gen_range(0..=options.len());
    options.insert(correct_index, correct.to_string());

    Ok((options, correct_index))
}
