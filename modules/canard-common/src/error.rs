use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanardError {
    #[error("insufficient facts after retries: received {true_count} true and {false_count} false")]
    InsufficientFacts {
        true_count: usize,
        false_count: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
