use thiserror::Error;

/// Input rejected before any request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid block identifier: {0}")]
    InvalidBlockId(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Negative amount: {0}")]
    NegativeAmount(String),

    #[error("Amount has more than 12 fractional digits: {0}")]
    AmountPrecision(String),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid payment id: {0}")]
    InvalidPaymentId(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}
