use alloy::primitives::{address, Address};

/// Lido deployment on Rinkeby.
pub const LIDO_ADDRESS: Address = address!("0xbA453033d328bFdd7799a4643611b616D80ddd97");

/// Referral passed to `submit`. Stakes through this app carry no referrer.
pub const REFERRAL_ADDRESS: Address = Address::ZERO;

pub const SUBMIT_FUNCTION_NAME: &str = "submit";

pub const STETH_ABI_JSON: &str = include_str!("../abi/steth.abi.json");

pub const ETHER_DECIMALS: u8 = 18;

// Display copy
pub const TITLE: &str = "Lido Ethereum Staking";
pub const DESCRIPTION: &str =
    "Stake your ETH with Lido and receive liquid stETH with daily rewards.";
pub const AMOUNT_FIELD_LABEL: &str = "Stake amount";
pub const RECEIVE_LABEL: &str = "You will receive";
pub const EXCHANGE_RATE_LABEL: &str = "Exchange rate";
pub const EXCHANGE_RATE: &str = "1 ETH = 1 stETH";
pub const STAKED_TOKEN_SYMBOL: &str = "stETH";
pub const PENDING_ASSETS_NOTE: &str = "Please note that it may take a couple of minutes for your stETH to appear in the Assets section after the transaction is approved by all signers and executed.";
pub const SUBMISSION_FAILED_NOTICE: &str = "Transaction could not be submitted. Please try again.";
