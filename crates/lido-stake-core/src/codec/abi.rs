use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes};
use error_stack::{Report, ResultExt};

use crate::constants::SUBMIT_FUNCTION_NAME;
use crate::errors::{StakeError, StakeResult};

pub fn parse_abi(source: &str) -> StakeResult<JsonAbi> {
    serde_json::from_str::<JsonAbi>(source)
        .map_err(|e| Report::new(StakeError::Abi).attach_printable(e.to_string()))
        .attach_printable("Parsing contract ABI")
}

/// Looks up `function_name` in `abi`, reporting the available functions when it is missing.
pub fn find_function<'a>(abi: &'a JsonAbi, function_name: &str) -> StakeResult<&'a Function> {
    let Some(function) = abi.function(function_name).and_then(|overloads| overloads.first())
    else {
        let available_functions: Vec<String> = abi.functions.keys().cloned().collect();
        let mut error =
            crate::stake_error!(StakeError::Abi, "Function '{}' not found in ABI", function_name);

        if !available_functions.is_empty() {
            error = error.attach_printable(format!(
                "Available functions: {}",
                available_functions.join(", ")
            ));

            for available in &available_functions {
                if available.to_lowercase() == function_name.to_lowercase() {
                    error = error.attach_printable(format!(
                        "Did you mean '{}'? (case-sensitive)",
                        available
                    ));
                }
            }
        }

        return Err(error);
    };
    Ok(function)
}

/// Encodes a call to `function_name` with positional `args`: selector followed by the
/// ABI-encoded arguments.
pub fn encode_function_call(
    abi: &JsonAbi,
    function_name: &str,
    args: &[DynSolValue],
) -> StakeResult<Bytes> {
    let function = find_function(abi, function_name)?;

    if args.len() != function.inputs.len() {
        let mut error = Report::new(StakeError::Abi).attach_printable(format!(
            "Function '{}' expects {} arguments, got {}",
            function_name,
            function.inputs.len(),
            args.len()
        ));

        error = error.attach_printable("\nExpected arguments:");
        for (i, param) in function.inputs.iter().enumerate() {
            let status = if i < args.len() { "✓" } else { "✗ missing" };
            error = error.attach_printable(format!(
                "  [{}] {}: {} {}",
                i,
                if param.name.is_empty() { "arg" } else { &param.name },
                param.ty,
                status
            ));
        }

        return Err(error);
    }

    let data = function
        .abi_encode_input(args)
        .map_err(|e| Report::new(StakeError::Abi).attach_printable(e.to_string()))
        .attach_printable(format!("Encoding arguments for function '{}'", function_name))?;
    Ok(Bytes::from(data))
}

/// Call data for `submit(address _referral)`.
pub fn encode_submit(abi: &JsonAbi, referral: Address) -> StakeResult<Bytes> {
    encode_function_call(abi, SUBMIT_FUNCTION_NAME, &[DynSolValue::Address(referral)])
}
