// Trait abstraction for the completion collaborator.
//
// FactSource replaces a concrete OpenAi handle: the acquirer only needs
// "prompt in, text out". ScriptedSource in `testing` implements the same
// seam for deterministic tests: no network, no API key.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait FactSource: Send + Sync {
    /// Send one prompt and return the full completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl FactSource for ai_client::OpenAi {
    async fn complete(&self, prompt: &str) -> Result<String> {
        Ok(self.complete(prompt).await?)
    }
}
