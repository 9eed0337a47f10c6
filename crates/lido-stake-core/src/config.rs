use std::fs;
use std::path::{Path, PathBuf};

use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use error_stack::{Report, ResultExt};
use serde_derive::{Deserialize, Serialize};

use crate::codec::{parse_abi, string_to_address};
use crate::constants::{LIDO_ADDRESS, STETH_ABI_JSON};
use crate::errors::{StakeError, StakeResult};

/// What the form does when the host wallet fails a submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostErrorPolicy {
    /// Discard the error; the form gives no feedback.
    Swallow,
    /// Show a generic failure notice and re-enable the form.
    #[default]
    Surface,
}

#[derive(Clone, Debug)]
pub struct StakeConfig {
    pub contract_address: Address,
    pub abi: JsonAbi,
    pub host_error_policy: HostErrorPolicy,
}

impl StakeConfig {
    /// The embedded stETH ABI and the Rinkeby Lido deployment.
    pub fn rinkeby() -> StakeResult<Self> {
        Ok(Self {
            contract_address: LIDO_ADDRESS,
            abi: parse_abi(STETH_ABI_JSON).attach_printable("Loading embedded stETH ABI")?,
            host_error_policy: HostErrorPolicy::default(),
        })
    }

    pub fn with_host_error_policy(mut self, policy: HostErrorPolicy) -> Self {
        self.host_error_policy = policy;
        self
    }

    /// Parses a TOML manifest. A relative `abi_path` resolves against `base_dir`.
    pub fn from_toml_str(source: &str, base_dir: Option<&Path>) -> StakeResult<Self> {
        let manifest: StakeManifest = toml::from_str(source)
            .map_err(|e| Report::new(StakeError::Config).attach_printable(e.to_string()))
            .attach_printable("Parsing stake manifest")?;
        manifest.into_config(base_dir)
    }

    pub fn from_file(path: &Path) -> StakeResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| Report::new(StakeError::Config).attach_printable(e.to_string()))
            .attach_printable(format!("Reading {}", path.display()))?;
        Self::from_toml_str(&source, path.parent())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StakeManifest {
    pub contract_address: Option<String>,
    pub abi_path: Option<PathBuf>,
    #[serde(default)]
    pub host_error_policy: HostErrorPolicy,
}

impl StakeManifest {
    pub fn into_config(self, base_dir: Option<&Path>) -> StakeResult<StakeConfig> {
        let contract_address = match &self.contract_address {
            Some(address) => string_to_address(address)
                .change_context(StakeError::Config)
                .attach_printable("Reading 'contract_address'")?,
            None => LIDO_ADDRESS,
        };

        let abi = match &self.abi_path {
            Some(abi_path) => {
                let abi_path = match base_dir {
                    Some(base_dir) if abi_path.is_relative() => base_dir.join(abi_path),
                    _ => abi_path.clone(),
                };
                let source = fs::read_to_string(&abi_path)
                    .map_err(|e| Report::new(StakeError::Config).attach_printable(e.to_string()))
                    .attach_printable(format!("Reading ABI from {}", abi_path.display()))?;
                parse_abi(&source).change_context(StakeError::Config)?
            }
            None => parse_abi(STETH_ABI_JSON).change_context(StakeError::Config)?,
        };

        Ok(StakeConfig { contract_address, abi, host_error_policy: self.host_error_policy })
    }
}
