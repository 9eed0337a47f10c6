#[macro_use]
extern crate hiro_system_kit;

pub use alloy;
pub use error_stack;

use hiro_system_kit::Logger;

pub mod amount;
pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod form;
pub mod host;

#[cfg(test)]
mod tests;

pub use amount::{validate, BaseUnitAmount};
pub use config::{HostErrorPolicy, StakeConfig};
pub use errors::{HostError, StakeError, StakeResult, ValidationError};
pub use form::{build_stake_transaction, receive_label, StakeForm, SubmissionStatus, SubmitOutcome};
pub use host::{SafeAppsHost, StakeTransaction};

#[derive(Clone)]
pub struct Context {
    pub logger: Option<Logger>,
}

impl Context {
    pub fn empty() -> Context {
        Context { logger: None }
    }

    pub fn new(logger: Logger) -> Context {
        Context { logger: Some(logger) }
    }

    pub fn try_log<F>(&self, closure: F)
    where
        F: FnOnce(&Logger),
    {
        if let Some(ref logger) = self.logger {
            closure(logger)
        }
    }
}
