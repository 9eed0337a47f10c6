use error_stack::{Context, Report};
use std::fmt;
use thiserror::Error;

pub type StakeResult<T> = Result<T, Report<StakeError>>;

/// Staking-widget error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeError {
    /// ABI loading or call data encoding failed
    Abi,
    /// Invalid or unreadable configuration
    Config,
    /// Invalid Ethereum address
    InvalidAddress,
    /// The host wallet rejected or failed the request
    Host,
}

impl fmt::Display for StakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StakeError::Abi => write!(f, "ABI encoding/decoding error"),
            StakeError::Config => write!(f, "Invalid configuration"),
            StakeError::InvalidAddress => write!(f, "Invalid Ethereum address"),
            StakeError::Host => write!(f, "Host wallet request failed"),
        }
    }
}

impl Context for StakeError {}

/// Inline errors attached to the stake amount field.
///
/// The display strings are the messages rendered next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is not a number at all
    #[error("Please enter a number")]
    Type,
    /// The input is a number, but not strictly positive
    #[error("Stake amount must be greater than 0")]
    Range,
    /// The input cannot be expressed as a whole number of base units
    #[error("Invalid stake amount")]
    Precision,
}

/// Errors raised by the host wallet while proposing or looking up a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The user declined the transaction in the wallet
    #[error("Transaction rejected: {0}")]
    Rejected(String),
    /// The wallet frame or its backend could not be reached
    #[error("Host unreachable: {0}")]
    Connectivity(String),
    /// The wallet refused the request payload
    #[error("Malformed transaction request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

/// Transaction details attached to host errors
#[derive(Debug, Clone)]
pub struct TransactionInfo {
    pub to: String,
    pub value: String,
    pub data: String,
}

impl fmt::Display for TransactionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction to {} value: {} data: {}", self.to, self.value, self.data)
    }
}

/// Contract information for encoding errors
#[derive(Debug, Clone)]
pub struct ContractInfo {
    pub address: String,
    pub method: String,
}

impl fmt::Display for ContractInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract at {} method: {}", self.address, self.method)
    }
}

pub trait StakeErrorExt {
    /// Attach contract information
    fn with_contract_info(self, address: impl Into<String>, method: impl Into<String>) -> Self;
}

impl<T> StakeErrorExt for StakeResult<T> {
    fn with_contract_info(self, address: impl Into<String>, method: impl Into<String>) -> Self {
        self.map_err(|e| {
            e.attach_printable(ContractInfo { address: address.into(), method: method.into() })
        })
    }
}

/// Helper macro for creating staking errors
#[macro_export]
macro_rules! stake_error {
    ($error:expr, $($arg:tt)*) => {{
        error_stack::Report::new($error)
            .attach_printable(format!($($arg)*))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use error_stack::ResultExt;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::Type.to_string(), "Please enter a number");
        assert_eq!(ValidationError::Range.to_string(), "Stake amount must be greater than 0");
        assert_eq!(ValidationError::Precision.to_string(), "Invalid stake amount");
    }

    #[test]
    fn test_stake_error_with_contract_info() {
        let error = stake_error!(StakeError::Abi, "Function 'submit' not found");

        let result: StakeResult<()> = Err(error);
        let error = result
            .with_contract_info("0xbA453033d328bFdd7799a4643611b616D80ddd97", "submit")
            .unwrap_err();

        let contract = error.downcast_ref::<ContractInfo>().unwrap();
        assert_eq!(contract.method, "submit");
    }

    #[test]
    fn test_error_chain_with_context() {
        fn load_abi(source: &str) -> StakeResult<()> {
            if source.is_empty() {
                return Err(stake_error!(StakeError::Abi, "ABI source is empty"));
            }
            Ok(())
        }

        fn load_config(source: &str) -> StakeResult<()> {
            load_abi(source)
                .change_context(StakeError::Config)
                .attach_printable("Failed to load the contract ABI")
        }

        let error = load_config("").unwrap_err();
        let error_string = format!("{:?}", error);
        assert!(error_string.contains("Invalid configuration"));
        assert!(error_string.contains("ABI source is empty"));
    }
}
