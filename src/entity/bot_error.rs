#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Pool for {from}/{to} not found")]
    PoolNotFound { from: String, to: String },

    #[error("Unsupported pair {from}/{to}: one side must be the native token")]
    UnsupportedPair { from: String, to: String },

    #[error("Market {pool} does not trade {token}")]
    MarketMismatch { pool: String, token: String },

    #[error("Transaction {hash} reverted")]
    TransactionReverted { hash: String },

    #[error("Receipt for {hash} not observed within {seconds}s")]
    ReceiptTimeout { hash: String, seconds: u64 },

    #[error("Amount {0} does not fit the target representation")]
    AmountOverflow(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BotError {
    /// Lookup and validation failures will fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            BotError::UnknownToken(_)
                | BotError::PoolNotFound { .. }
                | BotError::UnsupportedPair { .. }
                | BotError::MarketMismatch { .. }
                | BotError::AmountOverflow(_)
                | BotError::InvalidAmount
                | BotError::InvalidPrivateKey(_)
                | BotError::Config(_)
        )
    }
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        BotError::Config(err.to_string())
    }
}

/// Errors that are not a `BotError` come from the transport and are worth another try.
pub fn is_retryable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<BotError>()
        .map(BotError::is_retryable)
        .unwrap_or(true)
}
