use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use alloy::hex;
use alloy::primitives::{Address, Bytes, U256};
use serde_derive::{Deserialize, Serialize};

use crate::errors::{HostError, TransactionInfo};

pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, HostError>> + Send + 'a>>;

/// The transaction-proposal capability exposed by the wallet frame hosting the app.
pub trait SafeAppsHost: Send + Sync + Debug {
    /// Proposes `params.txs` to the wallet for signing and broadcast.
    fn send<'a>(&'a self, params: SendTransactionsParams) -> HostFuture<'a, SendTransactionsResponse>;

    fn get_by_safe_tx_hash<'a>(&'a self, safe_tx_hash: &'a str) -> HostFuture<'a, TransactionDetails>;
}

/// A single call as the host expects it: checksummed recipient, decimal wei value, 0x-hex data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTransaction {
    pub to: String,
    pub value: String,
    pub data: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionsParams {
    pub txs: Vec<BaseTransaction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionsResponse {
    pub safe_tx_hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    AwaitingConfirmations,
    AwaitingExecution,
    Cancelled,
    Failed,
    Success,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub safe_address: Option<String>,
    pub tx_id: Option<String>,
    pub tx_status: TransactionStatus,
    pub tx_hash: Option<String>,
}

/// The contract call built for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl StakeTransaction {
    pub fn to_base_transaction(&self) -> BaseTransaction {
        BaseTransaction {
            to: self.to.to_checksum(None),
            value: self.value.to_string(),
            data: hex::encode_prefixed(&self.data),
        }
    }

    /// Wraps this call as the single transaction of a `send` request.
    pub fn to_send_params(&self) -> SendTransactionsParams {
        SendTransactionsParams { txs: vec![self.to_base_transaction()] }
    }

    pub fn info(&self) -> TransactionInfo {
        let tx = self.to_base_transaction();
        TransactionInfo { to: tx.to, value: tx.value, data: tx.data }
    }
}
