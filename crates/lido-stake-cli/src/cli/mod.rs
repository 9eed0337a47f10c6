use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use lido_stake_core::constants::{
    AMOUNT_FIELD_LABEL, DESCRIPTION, EXCHANGE_RATE, EXCHANGE_RATE_LABEL, PENDING_ASSETS_NOTE,
    RECEIVE_LABEL, TITLE,
};
use lido_stake_core::{build_stake_transaction, receive_label, validate, Context, StakeConfig};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Validate a stake amount and print it in wei
    #[clap(name = "check", bin_name = "check")]
    Check(CheckAmount),
    /// Display the staking card for an amount
    #[clap(name = "quote", bin_name = "quote")]
    Quote(QuoteAmount),
    /// Print the transaction request proposed to the Safe for an amount
    #[clap(name = "build", bin_name = "build")]
    Build(BuildTransaction),
}

#[derive(Parser, PartialEq, Clone, Debug)]
struct CheckAmount {
    /// Amount of ETH to stake
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
}

#[derive(Parser, PartialEq, Clone, Debug)]
struct QuoteAmount {
    /// Amount of ETH to stake
    #[arg(allow_hyphen_values = true)]
    pub amount: Option<String>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
struct BuildTransaction {
    /// Amount of ETH to stake
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// Path to a stake manifest (TOML)
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<String>,
    /// Pretty-print the JSON payload
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn main() {
    let logger = hiro_system_kit::log::setup_logger();
    let _guard = hiro_system_kit::log::setup_global_logger(logger.clone());
    let ctx = Context::new(logger);

    let opts: Opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            println!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = handle_command(opts, &ctx) {
        ctx.try_log(|logger| error!(logger, "{e}"));
        std::thread::sleep(std::time::Duration::from_millis(500));
        process::exit(1);
    }
}

fn handle_command(opts: Opts, ctx: &Context) -> Result<(), String> {
    match opts.command {
        Command::Check(cmd) => handle_check_command(&cmd, ctx),
        Command::Quote(cmd) => handle_quote_command(&cmd),
        Command::Build(cmd) => handle_build_command(&cmd, ctx),
    }
}

fn handle_check_command(cmd: &CheckAmount, ctx: &Context) -> Result<(), String> {
    let amount = validate(&cmd.amount).map_err(|e| format_err!(e))?;
    ctx.try_log(|logger| debug!(logger, "'{}' is {} wei", cmd.amount, amount));
    println!("{}", green!("{} wei", amount));
    Ok(())
}

fn handle_quote_command(cmd: &QuoteAmount) -> Result<(), String> {
    println!("{}", render_quote(cmd.amount.as_deref().unwrap_or_default()));
    Ok(())
}

fn handle_build_command(cmd: &BuildTransaction, ctx: &Context) -> Result<(), String> {
    let config = load_config(cmd.config_path.as_deref())?;
    let payload = build_send_payload(&config, &cmd.amount, cmd.pretty, ctx)?;
    println!("{}", payload);
    Ok(())
}

fn load_config(config_path: Option<&str>) -> Result<StakeConfig, String> {
    let config = match config_path {
        Some(path) => StakeConfig::from_file(Path::new(path)),
        None => StakeConfig::rinkeby(),
    };
    config.map_err(|e| format!("{:?}", e))
}

/// Serializes the `send` request the Safe would receive for `raw`.
fn build_send_payload(
    config: &StakeConfig,
    raw: &str,
    pretty: bool,
    ctx: &Context,
) -> Result<String, String> {
    let amount = validate(raw).map_err(|e| format_err!(e))?;
    let tx = build_stake_transaction(config, amount).map_err(|e| format!("{:?}", e))?;
    ctx.try_log(|logger| {
        info!(logger, "Staking {} wei with {}", amount, tx.to.to_checksum(None))
    });

    let params = tx.to_send_params();
    let json = if pretty {
        serde_json::to_string_pretty(&params)
    } else {
        serde_json::to_string(&params)
    };
    json.map_err(|e| e.to_string())
}

fn render_quote(raw: &str) -> String {
    let mut lines = vec![green!("{}", TITLE), DESCRIPTION.to_string(), String::new()];
    lines.push(format!("{}: {}", AMOUNT_FIELD_LABEL, raw));
    if !raw.is_empty() {
        if let Err(e) = validate(raw) {
            lines.push(red!("  {}", e));
        }
    }
    lines.push(format!("{:<20}{}", RECEIVE_LABEL, receive_label(raw)));
    lines.push(format!("{:<20}{}", EXCHANGE_RATE_LABEL, EXCHANGE_RATE));
    lines.push(String::new());
    lines.push(black!("{}", PENDING_ASSETS_NOTE));
    lines.join("\n")
}
