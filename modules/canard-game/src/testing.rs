// Test doubles for the FactSource seam.
//
// ScriptedSource: queued responses per prompt, errors on unregistered
// prompts (same policy as unregistered URLs in a fetch mock).
// FailingSource: every call is a transport failure.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::traits::FactSource;

/// Queue-backed fact source. Builder pattern: each `.on_prompt()` call
/// pushes one response; each `complete` call for that prompt pops the next.
pub struct ScriptedSource {
    responses: Mutex<HashMap<String, VecDeque<String>>>,
    calls: AtomicU32,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn on_prompt(self, prompt: &str, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(prompt.to_string())
            .or_default()
            .push_back(response.into());
        self
    }

    /// Total completions served (across all prompts).
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactSource for ScriptedSource {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(prompt).and_then(|queue| queue.pop_front()) {
            Some(response) => Ok(response),
            None => bail!("ScriptedSource: no response queued for prompt: {prompt}"),
        }
    }
}

/// Fact source whose every call fails at the transport layer.
pub struct FailingSource;

#[async_trait]
impl FactSource for FailingSource {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        bail!("connection refused")
    }
}

/// Render `count` numbered fact lines: "1. <label> fact number 1." etc.
pub fn numbered_lines(count: usize, label: &str) -> String {
    (1..=count)
        .map(|i| format!("{i}. {label} fact number {i}."))
        .collect::<Vec<_>>()
        .join("\n")
}
