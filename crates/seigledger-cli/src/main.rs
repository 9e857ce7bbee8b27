// crates/seigledger-cli/src/main.rs
//
// CLI entrypoint for the seigledger developer tools.
//
// Provides subcommands for inspecting the effective ledger configuration
// and running a scripted staking scenario against an in-memory ledger:
// candidate creation, deposits, seigniorage accrual, and a full two-phase
// withdrawal.

use std::fs;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use primitive_types::U256;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seigledger_core::{Address, LedgerConfig, Role, TokenLedger};
use seigledger_engine::{ManualClock, MemoryToken, StakingLedger, StaticRoles};

/// seigledger CLI — staking/seigniorage accounting engine tools.
#[derive(Parser, Debug)]
#[command(
    name = "seigledger",
    version = "0.1.0",
    about = "seigledger CLI — staking, seigniorage, and withdrawal accounting"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when absent.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the effective ledger configuration as JSON.
    Config,

    /// Run a demo staking scenario and print balances and events.
    Simulate {
        /// Blocks of seigniorage to accrue between deposit and withdrawal.
        #[arg(long, default_value_t = 100)]
        blocks: u64,

        /// Whole WTON deposited per depositor.
        #[arg(long, default_value_t = 2_000)]
        deposit: u64,
    },
}

fn load_config(path: Option<&str>) -> Result<LedgerConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => LedgerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Simulate { blocks, deposit } => {
            simulate(config, blocks, deposit)?;
        }
    }

    Ok(())
}

/// One whole WTON in 27-decimal units.
fn wton(n: u64) -> U256 {
    U256::from(n) * U256::exp10(27)
}

fn simulate(
    config: LedgerConfig,
    blocks: u64,
    deposit: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let committee = Address::derive("seigledger/demo", &[b"committee"]);
    let dao_admin = Address::derive("seigledger/demo", &[b"dao-admin"]);
    let depositor = Address::derive("seigledger/demo", &[b"depositor"]);

    let clock = Arc::new(ManualClock::new(config.last_seig_block));

    let ton_ledger = MemoryToken::new();
    let mut wton_ledger = MemoryToken::new();
    wton_ledger.mint(depositor, wton(deposit) * U256::from(4u64))?;

    let mut roles = StaticRoles::new();
    roles.grant(dao_admin, Role::Admin);
    roles.grant(dao_admin, Role::Pauser);
    roles.grant(committee, Role::Minter);

    let dao_vault = config.dao_vault;
    let mut ledger = StakingLedger::new(
        config,
        committee,
        Box::new(ton_ledger),
        Box::new(wton_ledger),
        Box::new(roles),
        clock.clone(),
    )?;

    let level19 = ledger
        .create_candidate(dao_admin, "level19_V2", dao_admin)?
        .contract;
    let tokamak = ledger
        .create_candidate(dao_admin, "tokamak_V2", dao_admin)?
        .contract;
    info!(%level19, %tokamak, "candidates created");

    ledger.deposit(depositor, level19, wton(deposit))?;
    ledger.deposit(depositor, tokamak, wton(deposit) * U256::from(3u64))?;

    clock.advance(blocks);
    ledger.update_seigniorage(level19)?;
    // The global accrual block just advanced; give tokamak its own window.
    clock.advance(blocks);
    ledger.update_seigniorage(tokamak)?;

    ledger.request_withdrawal(depositor, level19, wton(deposit))?;
    clock.advance(ledger.withdrawal_delay());
    let released = ledger.process_request(depositor, level19, false)?;
    info!(%released, "withdrawal released after delay");

    println!("level19 staked total: {}", ledger.staked_total(level19));
    println!("tokamak staked total: {}", ledger.staked_total(tokamak));
    println!("level19 factor:       {}", ledger.coinage_factor(level19));
    println!("dao vault balance:    {}", ledger.wton_balance_of(dao_vault));
    println!("depositor wton:       {}", ledger.wton_balance_of(depositor));
    println!();
    for event in ledger.take_events() {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
