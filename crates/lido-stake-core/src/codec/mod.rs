// ABI encoding and address conversion for the staking contract

pub mod abi;
pub mod conversion;

pub use abi::{encode_function_call, encode_submit, find_function, parse_abi};
pub use conversion::string_to_address;
