use std::sync::Arc;

use regex::Regex;
use tracing::{error, info, warn};

use canard_common::{CanardError, Fact};

use crate::pool::{FactPool, REQUIRED_FALSE, REQUIRED_TRUE};
use crate::traits::FactSource;

/// Max attempts per category before the shortfall is handed to the caller.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

pub const TRUE_FACTS_PROMPT: &str = "Give me 20 unique fun facts, each of which is accurate. \
These fun facts can be about anything. Make sure they are concise, accurate, and 20 unique facts. \
Do not give me any additional text in the response. Just the facts as requested.";

pub const FALSE_FACTS_PROMPT: &str = "Give me 10 unique fun facts, each of which sounds accurate \
and credible, but is in fact false and inaccurate. Make sure they are concise, inaccurate, and \
unique. . Do not give me any additional text in the response. Just the facts as requested.";

/// Fetches the two fact categories from the completion collaborator and
/// assembles the initial pool.
pub struct FactAcquirer {
    source: Arc<dyn FactSource>,
}

impl FactAcquirer {
    pub fn new(source: Arc<dyn FactSource>) -> Self {
        Self { source }
    }

    /// Fetch one category of facts, retrying while the non-blank line count
    /// falls short of `required_count`.
    ///
    /// Each attempt replaces the previous one wholesale: lines are never
    /// accumulated across attempts, and the last attempt's lines are
    /// returned even when an earlier attempt produced more. A transport
    /// failure counts as an empty attempt; the shortfall itself is judged
    /// by the caller, not here.
    pub async fn fetch_category(
        &self,
        prompt: &str,
        required_count: usize,
        max_attempts: u32,
    ) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut attempts = 0;

        while lines.len() < required_count && attempts < max_attempts {
            attempts += 1;
            lines = match self.source.complete(prompt).await {
                Ok(text) => text
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect(),
                Err(e) => {
                    warn!(attempt = attempts, error = %e, "Fact fetch failed, treating as empty");
                    Vec::new()
                }
            };

            if lines.len() < required_count {
                warn!(
                    attempt = attempts,
                    received = lines.len(),
                    required = required_count,
                    "Fact fetch came up short"
                );
            }
        }

        lines
    }

    /// Fetch both categories and assemble the initial pool: exactly 20 true
    /// facts followed by exactly 10 false facts, in received order.
    ///
    /// The false-facts fetch does not start until the true-facts fetch,
    /// including its retries, has fully resolved.
    pub async fn acquire_initial_facts(&self) -> Result<FactPool, CanardError> {
        let true_lines = self
            .fetch_category(TRUE_FACTS_PROMPT, REQUIRED_TRUE, MAX_FETCH_ATTEMPTS)
            .await;
        let false_lines = self
            .fetch_category(FALSE_FACTS_PROMPT, REQUIRED_FALSE, MAX_FETCH_ATTEMPTS)
            .await;

        let true_facts = normalize_category(&true_lines, true);
        let false_facts = normalize_category(&false_lines, false);

        if true_facts.len() < REQUIRED_TRUE || false_facts.len() < REQUIRED_FALSE {
            error!(
                true_count = true_facts.len(),
                false_count = false_facts.len(),
                required_true = REQUIRED_TRUE,
                required_false = REQUIRED_FALSE,
                "Failed to fetch the required number of facts"
            );
            return Err(CanardError::InsufficientFacts {
                true_count: true_facts.len(),
                false_count: false_facts.len(),
            });
        }

        // Over-production is fine; take the first N of each in received
        // order. No dedup, no quality filtering.
        let mut facts: Vec<Fact> = Vec::with_capacity(REQUIRED_TRUE + REQUIRED_FALSE);
        facts.extend(true_facts.into_iter().take(REQUIRED_TRUE));
        facts.extend(false_facts.into_iter().take(REQUIRED_FALSE));

        info!(total = facts.len(), "Initial fact pool assembled");
        Ok(FactPool::new(facts))
    }
}

/// Normalize raw lines into labeled facts: trim, strip a leading
/// "<digits>. " enumeration marker, drop lines that end up empty.
fn normalize_category(lines: &[String], is_true: bool) -> Vec<Fact> {
    let marker = Regex::new(r"^\d+\.\s*").expect("valid regex");

    lines
        .iter()
        .map(|line| marker.replace(line.trim(), "").into_owned())
        .filter(|statement| !statement.is_empty())
        .map(|statement| Fact { statement, is_true })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{numbered_lines, FailingSource, ScriptedSource};

    fn acquirer(source: ScriptedSource) -> FactAcquirer {
        FactAcquirer::new(Arc::new(source))
    }

    #[tokio::test]
    async fn short_attempt_then_full_attempt_stops_early() {
        let source = ScriptedSource::new()
            .on_prompt("p", numbered_lines(15, "Fact"))
            .on_prompt("p", numbered_lines(20, "Fact"))
            .on_prompt("p", numbered_lines(20, "Fact"));
        let source = Arc::new(source);
        let acquirer = FactAcquirer::new(source.clone());

        let lines = acquirer.fetch_category("p", 20, 3).await;
        assert_eq!(lines.len(), 20);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_shortfall() {
        let source = ScriptedSource::new()
            .on_prompt("p", numbered_lines(10, "Fact"))
            .on_prompt("p", numbered_lines(10, "Fact"))
            .on_prompt("p", numbered_lines(10, "Fact"));
        let source = Arc::new(source);
        let acquirer = FactAcquirer::new(source.clone());

        let lines = acquirer.fetch_category("p", 20, 3).await;
        assert_eq!(lines.len(), 10);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn last_attempt_wins_even_when_shorter() {
        let source = ScriptedSource::new()
            .on_prompt("p", numbered_lines(18, "Fact"))
            .on_prompt("p", numbered_lines(12, "Fact"))
            .on_prompt("p", numbered_lines(5, "Fact"));
        let lines = acquirer(source).fetch_category("p", 20, 3).await;
        assert_eq!(lines.len(), 5);
    }

    #[tokio::test]
    async fn transport_failures_degrade_to_empty() {
        let acquirer = FactAcquirer::new(Arc::new(FailingSource));
        let lines = acquirer.fetch_category("p", 20, 3).await;
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn blank_lines_are_discarded() {
        let source = ScriptedSource::new().on_prompt("p", "1. One.\n\n   \n2. Two.\n");
        let lines = acquirer(source).fetch_category("p", 2, 3).await;
        assert_eq!(lines, vec!["1. One.".to_string(), "2. Two.".to_string()]);
    }

    #[test]
    fn normalization_strips_markers_and_whitespace() {
        let lines = vec![
            "1. Honey never spoils.".to_string(),
            "  12.   Octopuses have three hearts.  ".to_string(),
            "No marker here.".to_string(),
            "3.".to_string(),
        ];
        let facts = normalize_category(&lines, true);

        let statements: Vec<&str> = facts.iter().map(|f| f.statement.as_str()).collect();
        assert_eq!(
            statements,
            vec![
                "Honey never spoils.",
                "Octopuses have three hearts.",
                "No marker here.",
            ]
        );
        assert!(facts.iter().all(|f| f.is_true));
        assert!(facts.iter().all(|f| !f.statement.is_empty()));
    }

    #[tokio::test]
    async fn acquire_assembles_exact_pool_from_overproduction() {
        let source = ScriptedSource::new()
            .on_prompt(TRUE_FACTS_PROMPT, numbered_lines(25, "Accurate"))
            .on_prompt(FALSE_FACTS_PROMPT, numbered_lines(12, "Bogus"));

        let pool = acquirer(source).acquire_initial_facts().await.unwrap();
        assert_eq!(pool.true_count(), REQUIRED_TRUE);
        assert_eq!(pool.false_count(), REQUIRED_FALSE);
        assert_eq!(pool.len(), REQUIRED_TRUE + REQUIRED_FALSE);
    }

    #[tokio::test]
    async fn acquire_reports_exact_counts_on_shortfall() {
        let source = ScriptedSource::new()
            .on_prompt(TRUE_FACTS_PROMPT, numbered_lines(20, "Accurate"))
            .on_prompt(FALSE_FACTS_PROMPT, numbered_lines(7, "Bogus"))
            .on_prompt(FALSE_FACTS_PROMPT, numbered_lines(7, "Bogus"))
            .on_prompt(FALSE_FACTS_PROMPT, numbered_lines(7, "Bogus"));

        let err = acquirer(source).acquire_initial_facts().await.unwrap_err();
        match err {
            CanardError::InsufficientFacts {
                true_count,
                false_count,
            } => {
                assert_eq!(true_count, 20);
                assert_eq!(false_count, 7);
            }
            other => panic!("expected InsufficientFacts, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn acquire_fails_when_source_is_down() {
        let acquirer = FactAcquirer::new(Arc::new(FailingSource));
        let err = acquirer.acquire_initial_facts().await.unwrap_err();
        match err {
            CanardError::InsufficientFacts {
                true_count,
                false_count,
            } => {
                assert_eq!(true_count, 0);
                assert_eq!(false_count, 0);
            }
            other => panic!("expected InsufficientFacts, got {other:?}"),
        }
    }
}
