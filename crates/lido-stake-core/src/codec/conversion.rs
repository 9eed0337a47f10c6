use alloy::hex::FromHex;
use alloy::primitives::Address;
use error_stack::{Report, ResultExt};

use crate::errors::{StakeError, StakeResult};

/// Convert a string to an Ethereum address.
/// Handles both with and without 0x prefix, and 32-byte left-padded words.
pub fn string_to_address(address_str: &str) -> StakeResult<Address> {
    let trimmed = address_str.trim();
    let mut hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    // An ABI word holding an address keeps it in the low 20 bytes.
    if hex_str.len() == 64 {
        let (padding, tail) = hex_str.split_at(24);
        if padding.bytes().any(|b| b != b'0') {
            return Err(Report::new(StakeError::InvalidAddress)
                .attach_printable(format!("Invalid padded address format: {}", address_str)));
        }
        hex_str = tail;
    }

    Address::from_hex(hex_str)
        .map_err(|e| Report::new(StakeError::InvalidAddress).attach_printable(e.to_string()))
        .attach_printable(format!("Parsing address: {}", address_str))
}
