use std::sync::Arc;

use alloy::primitives::Address;
use futures::poll;
use test_case::test_case;

use super::mock_host::{GatedHost, RecordingHost, SAFE_TX_HASH};
use crate::config::{HostErrorPolicy, StakeConfig};
use crate::constants::{LIDO_ADDRESS, SUBMISSION_FAILED_NOTICE};
use crate::errors::{ContractInfo, HostError, StakeError, ValidationError};
use crate::form::{build_stake_transaction, StakeForm, SubmissionStatus, SubmitOutcome};
use crate::{validate, Context};

const SUBMIT_ZERO_REFERRAL_DATA: &str =
    "0xa1903eab0000000000000000000000000000000000000000000000000000000000000000";

fn form_with(host: Arc<RecordingHost>, policy: HostErrorPolicy) -> StakeForm {
    let config = StakeConfig::rinkeby().unwrap().with_host_error_policy(policy);
    StakeForm::new(config, host, Context::empty())
}

#[test]
fn test_new_form_is_idle_and_untouched() {
    let form = form_with(Arc::new(RecordingHost::accepting()), HostErrorPolicy::Surface);
    assert_eq!(form.stake_amount(), "");
    assert_eq!(form.status(), &SubmissionStatus::Idle);
    assert_eq!(form.field_error(), None);
    assert!(!form.is_submit_disabled());
}

#[test_case("abc", Some(ValidationError::Type) ; "non numeric")]
#[test_case("0", Some(ValidationError::Range) ; "zero")]
#[test_case("0.12345678901234567890", Some(ValidationError::Precision) ; "too precise")]
#[test_case("1.5", None ; "valid")]
fn test_field_error_after_change(raw: &str, expected: Option<ValidationError>) {
    let mut form = form_with(Arc::new(RecordingHost::accepting()), HostErrorPolicy::Surface);
    form.on_amount_change(raw);
    assert_eq!(form.stake_amount(), raw);
    assert_eq!(form.field_error(), expected);
}

#[test_case("", "0 stETH" ; "empty shows zero")]
#[test_case("1.50", "1.50 stETH" ; "verbatim")]
#[test_case("abc", "abc stETH" ; "invalid input is mirrored too")]
fn test_receive_label_mirrors_input(raw: &str, expected: &str) {
    let mut form = form_with(Arc::new(RecordingHost::accepting()), HostErrorPolicy::Surface);
    form.on_amount_change(raw);
    assert_eq!(form.receive_label(), expected);
    assert_eq!(form.exchange_rate_label(), "1 ETH = 1 stETH");
}

#[test]
fn test_build_stake_transaction_for_two_ether() {
    let config = StakeConfig::rinkeby().unwrap();
    let tx = build_stake_transaction(&config, validate("2").unwrap()).unwrap();
    let base = tx.to_base_transaction();
    assert_eq!(tx.to, LIDO_ADDRESS);
    assert_eq!(base.value, "2000000000000000000");
    assert_eq!(base.data, SUBMIT_ZERO_REFERRAL_DATA);
}

#[test]
fn test_build_stake_transaction_without_submit_in_abi() {
    let mut config = StakeConfig::rinkeby().unwrap();
    config.abi.functions.remove("submit");
    let error = build_stake_transaction(&config, validate("1").unwrap()).unwrap_err();
    assert_eq!(*error.current_context(), StakeError::Abi);
    let contract = error.downcast_ref::<ContractInfo>().unwrap();
    assert_eq!(contract.method, "submit");
}

#[tokio::test]
async fn test_submit_sends_single_stake_transaction() {
    let host = Arc::new(RecordingHost::accepting());
    let mut form = form_with(host.clone(), HostErrorPolicy::Surface);
    form.on_amount_change("2");

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Settled { safe_tx_hash: SAFE_TX_HASH.to_string() });

    let sent = host.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].txs.len(), 1);
    let tx = &sent[0].txs[0];
    assert_eq!(tx.to, LIDO_ADDRESS.to_checksum(None));
    assert_eq!(tx.value, "2000000000000000000");
    assert_eq!(tx.data, SUBMIT_ZERO_REFERRAL_DATA);

    assert_eq!(host.lookups(), vec![SAFE_TX_HASH.to_string()]);
}

#[tokio::test]
async fn test_settled_submission_clears_form() {
    let host = Arc::new(RecordingHost::accepting());
    let mut form = form_with(host, HostErrorPolicy::Surface);
    form.on_amount_change("0.5");
    form.submit().await.unwrap();

    assert_eq!(form.stake_amount(), "");
    assert_eq!(form.field_error(), None);
    assert_eq!(
        form.status(),
        &SubmissionStatus::Settled { safe_tx_hash: SAFE_TX_HASH.to_string() }
    );
    assert!(!form.is_submit_disabled());
}

#[test_case("" ; "empty")]
#[test_case("-1" ; "negative")]
#[test_case("1e18" ; "exponent")]
#[tokio::test]
async fn test_invalid_amount_never_reaches_host(raw: &str) {
    let host = Arc::new(RecordingHost::accepting());
    let mut form = form_with(host.clone(), HostErrorPolicy::Surface);
    form.on_amount_change(raw);

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(host.sent().is_empty());
    assert_eq!(form.status(), &SubmissionStatus::Idle);
    assert!(form.field_error().is_some());
}

#[tokio::test]
async fn test_submit_untouched_form_shows_error() {
    let host = Arc::new(RecordingHost::accepting());
    let mut form = form_with(host.clone(), HostErrorPolicy::Surface);

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::Type));
    assert_eq!(form.field_error(), Some(ValidationError::Type));
    assert!(host.sent().is_empty());
}

#[tokio::test]
async fn test_swallowed_host_error_gives_no_feedback() {
    let host = Arc::new(RecordingHost::failing(HostError::Rejected("user rejected".into())));
    let mut form = form_with(host.clone(), HostErrorPolicy::Swallow);
    form.on_amount_change("2");

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Dropped);
    assert_eq!(form.status(), &SubmissionStatus::Dropped);
    assert_eq!(form.failure_notice(), None);
    assert!(!form.is_submit_disabled());
    assert_eq!(host.sent().len(), 1);
    assert!(host.lookups().is_empty());
}

#[tokio::test]
async fn test_surfaced_host_error_shows_notice_and_keeps_amount() {
    let error = HostError::Connectivity("frame closed".into());
    let host = Arc::new(RecordingHost::failing(error.clone()));
    let mut form = form_with(host.clone(), HostErrorPolicy::Surface);
    form.on_amount_change("2");

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Failed(error));
    assert_eq!(form.failure_notice(), Some(SUBMISSION_FAILED_NOTICE));
    assert_eq!(form.stake_amount(), "2");
    assert!(!form.is_submit_disabled());
}

#[tokio::test]
async fn test_retry_after_surfaced_error() {
    let failing = Arc::new(RecordingHost::failing(HostError::Other("boom".into())));
    let mut form = form_with(failing, HostErrorPolicy::Surface);
    form.on_amount_change("1");
    assert!(matches!(form.submit().await.unwrap(), SubmitOutcome::Failed(_)));

    let accepting = Arc::new(RecordingHost::accepting());
    let mut retry = StakeForm::new(form.config().clone(), accepting.clone(), Context::empty());
    retry.on_amount_change(form.stake_amount());
    assert!(matches!(retry.submit().await.unwrap(), SubmitOutcome::Settled { .. }));
    assert_eq!(accepting.sent().len(), 1);
}

#[tokio::test]
async fn test_failed_status_lookup_still_settles() {
    let host =
        Arc::new(RecordingHost::failing_lookup(HostError::Connectivity("timeout".into())));
    let mut form = form_with(host.clone(), HostErrorPolicy::Surface);
    form.on_amount_change("3");

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Settled { .. }));
    assert_eq!(host.lookups().len(), 1);
}

#[tokio::test]
async fn test_submit_with_logger() {
    let logger = hiro_system_kit::log::setup_logger();
    let config = StakeConfig::rinkeby().unwrap().with_host_error_policy(HostErrorPolicy::Surface);
    let host = Arc::new(RecordingHost::failing(HostError::InvalidRequest("bad data".into())));
    let mut form = StakeForm::new(config, host, Context::new(logger));
    form.on_amount_change("1");
    assert!(matches!(form.submit().await.unwrap(), SubmitOutcome::Failed(_)));
}

#[tokio::test]
async fn test_submit_to_configured_contract() {
    let contract = Address::repeat_byte(0x11);
    let mut config = StakeConfig::rinkeby().unwrap();
    config.contract_address = contract;
    let host = Arc::new(RecordingHost::accepting());
    let mut form = StakeForm::new(config, host.clone(), Context::empty());
    form.on_amount_change("0.25");
    form.submit().await.unwrap();

    let sent = host.sent();
    assert_eq!(sent[0].txs[0].to, contract.to_checksum(None));
    assert_eq!(sent[0].txs[0].value, "250000000000000000");
}

#[tokio::test]
async fn test_submit_disabled_while_host_is_pending() {
    let host = Arc::new(GatedHost::new());
    let config = StakeConfig::rinkeby().unwrap();
    let mut form = StakeForm::new(config, host.clone(), Context::empty());
    form.on_amount_change("1");

    {
        let mut pending = Box::pin(form.submit());
        assert!(poll!(pending.as_mut()).is_pending());
        assert_eq!(host.sent().len(), 1);
    }

    assert_eq!(form.status(), &SubmissionStatus::Submitting);
    assert!(form.is_submit_disabled());
    assert_eq!(form.stake_amount(), "1");
}

#[tokio::test]
async fn test_pending_submit_settles_once_host_answers() {
    let host = Arc::new(GatedHost::new());
    let config = StakeConfig::rinkeby().unwrap();
    let mut form = StakeForm::new(config, host.clone(), Context::empty());
    form.on_amount_change("1");

    let mut pending = Box::pin(form.submit());
    assert!(poll!(pending.as_mut()).is_pending());
    host.release();
    let outcome = pending.await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Settled { safe_tx_hash: SAFE_TX_HASH.to_string() });
    assert_eq!(form.status(), &SubmissionStatus::Settled { safe_tx_hash: SAFE_TX_HASH.to_string() });
    assert!(!form.is_submit_disabled());
}
