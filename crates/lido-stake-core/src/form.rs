use std::sync::Arc;

use error_stack::ResultExt;

use crate::amount::{validate, BaseUnitAmount};
use crate::codec::encode_submit;
use crate::config::{HostErrorPolicy, StakeConfig};
use crate::constants::{
    EXCHANGE_RATE, REFERRAL_ADDRESS, STAKED_TOKEN_SYMBOL, SUBMISSION_FAILED_NOTICE,
    SUBMIT_FUNCTION_NAME,
};
use crate::errors::{HostError, StakeError, StakeErrorExt, StakeResult, ValidationError};
use crate::host::{SafeAppsHost, StakeTransaction};
use crate::Context;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    /// The host accepted the proposal.
    Settled { safe_tx_hash: String },
    /// The host failed and the error was discarded.
    Dropped,
    /// The host failed and the form shows `notice`.
    Failed { notice: String, error: HostError },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The amount did not validate; nothing was sent.
    Invalid(ValidationError),
    Settled { safe_tx_hash: String },
    Dropped,
    Failed(HostError),
}

/// Builds the `submit(address)` call staking `amount` with the configured contract.
pub fn build_stake_transaction(
    config: &StakeConfig,
    amount: BaseUnitAmount,
) -> StakeResult<StakeTransaction> {
    let data = encode_submit(&config.abi, REFERRAL_ADDRESS)
        .with_contract_info(config.contract_address.to_checksum(None), SUBMIT_FUNCTION_NAME)?;
    Ok(StakeTransaction { to: config.contract_address, value: amount.as_u256(), data })
}

/// "You will receive" label. Mirrors the raw input: no conversion happens for display.
pub fn receive_label(raw: &str) -> String {
    let amount = if raw.is_empty() { "0" } else { raw };
    format!("{} {}", amount, STAKED_TOKEN_SYMBOL)
}

/// The staking form: one amount field, one submit control.
pub struct StakeForm {
    config: StakeConfig,
    host: Arc<dyn SafeAppsHost>,
    ctx: Context,
    stake_amount: String,
    touched: bool,
    status: SubmissionStatus,
}

impl StakeForm {
    pub fn new(config: StakeConfig, host: Arc<dyn SafeAppsHost>, ctx: Context) -> Self {
        Self {
            config,
            host,
            ctx,
            stake_amount: String::new(),
            touched: false,
            status: SubmissionStatus::Idle,
        }
    }

    pub fn stake_amount(&self) -> &str {
        &self.stake_amount
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn config(&self) -> &StakeConfig {
        &self.config
    }

    pub fn on_amount_change(&mut self, raw: impl Into<String>) {
        self.stake_amount = raw.into();
        self.touched = true;
        let amount = &self.stake_amount;
        self.ctx.try_log(|logger| debug!(logger, "Stake amount changed to '{}'", amount));
    }

    pub fn validate(&self) -> Result<BaseUnitAmount, ValidationError> {
        validate(&self.stake_amount)
    }

    /// The inline error for the amount field, once the user has interacted with it.
    pub fn field_error(&self) -> Option<ValidationError> {
        if !self.touched {
            return None;
        }
        self.validate().err()
    }

    pub fn is_submit_disabled(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    pub fn receive_label(&self) -> String {
        receive_label(&self.stake_amount)
    }

    pub fn exchange_rate_label(&self) -> &'static str {
        EXCHANGE_RATE
    }

    pub fn failure_notice(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed { notice, .. } => Some(notice),
            _ => None,
        }
    }

    /// Validates the current amount and proposes the staking transaction to the host.
    ///
    /// Host failures are resolved through the configured [`HostErrorPolicy`] and never
    /// returned as `Err`; only encoding failures are.
    pub async fn submit(&mut self) -> StakeResult<SubmitOutcome> {
        self.touched = true;

        let amount = match self.validate() {
            Ok(amount) => amount,
            Err(e) => {
                let raw = &self.stake_amount;
                self.ctx.try_log(|logger| debug!(logger, "Rejected stake amount '{}': {}", raw, e));
                return Ok(SubmitOutcome::Invalid(e));
            }
        };

        let tx = build_stake_transaction(&self.config, amount)
            .attach_printable("Building stake transaction")?;

        self.status = SubmissionStatus::Submitting;
        self.ctx.try_log(|logger| {
            info!(logger, "Proposing stake of {} wei to {}", amount, tx.to.to_checksum(None))
        });

        let host = self.host.clone();
        let response = match host.send(tx.to_send_params()).await {
            Ok(response) => response,
            Err(e) => return Ok(self.on_host_error(e, &tx)),
        };

        let safe_tx_hash = response.safe_tx_hash;
        match host.get_by_safe_tx_hash(&safe_tx_hash).await {
            Ok(details) => self.ctx.try_log(|logger| {
                debug!(logger, "Transaction {} status: {:?}", safe_tx_hash, details.tx_status)
            }),
            Err(e) => self.ctx.try_log(|logger| {
                warn!(logger, "Unable to look up transaction {}: {}", safe_tx_hash, e)
            }),
        }

        self.ctx.try_log(|logger| info!(logger, "Stake proposed with safeTxHash {}", safe_tx_hash));
        self.stake_amount.clear();
        self.touched = false;
        self.status = SubmissionStatus::Settled { safe_tx_hash: safe_tx_hash.clone() };
        Ok(SubmitOutcome::Settled { safe_tx_hash })
    }

    fn on_host_error(&mut self, error: HostError, tx: &StakeTransaction) -> SubmitOutcome {
        match self.config.host_error_policy {
            HostErrorPolicy::Swallow => {
                self.ctx.try_log(|logger| warn!(logger, "Discarding host error: {}", error));
                self.status = SubmissionStatus::Dropped;
                SubmitOutcome::Dropped
            }
            HostErrorPolicy::Surface => {
                let report = error_stack::Report::new(error.clone())
                    .change_context(StakeError::Host)
                    .attach_printable(tx.info());
                self.ctx.try_log(|logger| error!(logger, "{:?}", report));
                self.status = SubmissionStatus::Failed {
                    notice: SUBMISSION_FAILED_NOTICE.to_string(),
                    error: error.clone(),
                };
                SubmitOutcome::Failed(error)
            }
        }
    }
}
