//! Example sentence providers.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Term;

/// Source of example sentences for a term.
#[async_trait]
pub trait ExampleGenerator: Send + Sync {
    async fn generate_examples(&self, term: &Term) -> Result<Vec<String>>;
}

/// Serves the example sentence stored with the term, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredExamples;

#[async_trait]
impl ExampleGenerator for StoredExamples {
    async fn generate_examples(&self, term: &Term) -> Result<Vec<String>> {
        Ok(term.example.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[tokio::test]
    async fn test_stored_examples() {
        let mut term = Term {
            id: 1,
            text: "Laconic".to_string(),
            definition: "Using very few words.".to_string(),
            example: Some("His laconic reply said it all.".to_string()),
            difficulty: Difficulty::Common,
        };
        let examples = StoredExamples.generate_examples(&term).await.unwrap();
        assert_eq!(examples, vec!["His laconic reply said it all.".to_string()]);

        term.example = None;
        assert!(StoredExamples.generate_examples(&term).await.unwrap().is_empty());
    }
}
