use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use log::LevelFilter;
use serde_json::{json, Value};

use plunder::ops::{register_swap_operations, OperationRegistry};
use plunder::service::deadline_in;
use plunder::utils::app_context::AppContext;
use plunder::utils::logger::setup_logger;

#[derive(Parser)]
#[command(author, version, about = "PlunderSwap quotes and swaps", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tradable token symbols
    Tokens,
    /// Quote the best route for an amount
    Quote {
        /// Symbol paid
        from: String,
        /// Amount paid, in human units
        amount: String,
        /// Symbol received
        to: String,
        /// Also execute the quoted route
        #[arg(long)]
        execute: bool,
        /// Accepted shortfall below the router's output when executing, default PLUNDER_SLIPPAGE_BPS
        #[arg(long)]
        slippage_bps: Option<u16>,
    },
    /// Swap along an explicit path, e.g. `WZIL,ZUSDT,XSGD`
    Swap {
        /// Comma separated symbols
        #[arg(value_delimiter = ',')]
        path: Vec<String>,
        /// Input amount, exact or maximum
        from_amount: String,
        /// Output amount, minimum or exact
        to_amount: String,
        /// Recipient address
        to_address: String,
        /// Seconds until the swap expires, default PLUNDER_DEADLINE_SECS
        #[arg(long)]
        ttl: Option<u64>,
        /// Fix the output amount instead of the input
        #[arg(long)]
        exact_output: bool,
    },
    /// Print every operation with its schemas
    Ops,
    /// Invoke an operation by name with a JSON input
    Call {
        /// Operation name
        name: String,
        /// JSON input, default `{}`
        input: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose.then_some(LevelFilter::Debug))?;

    let ctx = AppContext::from_env()?;
    let deadline_secs = ctx.config.deadline_secs;
    let service = Arc::new(ctx.into_service()?);

    let mut registry = OperationRegistry::new();
    register_swap_operations(&mut registry, &service);

    let (name, input) = match cli.command {
        Commands::Tokens => ("plunderswap_tokens", json!({})),
        Commands::Quote {
            from,
            amount,
            to,
            execute,
            slippage_bps,
        } => (
            "plunderswap_quote",
            json!({
                "fromToken": from,
                "fromAmount": amount,
                "toToken": to,
                "execute": execute,
                "slippageBps": slippage_bps,
            }),
        ),
        Commands::Swap {
            path,
            from_amount,
            to_amount,
            to_address,
            ttl,
            exact_output,
        } => (
            "plunderswap_swap",
            json!({
                "tokenPath": path,
                "fromAmount": from_amount,
                "toAmount": to_amount,
                "toAddress": to_address,
                "deadline": deadline_in(ttl.unwrap_or(deadline_secs)),
                "swapType": if exact_output { "exactOutput" } else { "exactInput" },
            }),
        ),
        Commands::Ops => {
            println!("{}", serde_json::to_string_pretty(&registry.describe())?);
            return Ok(());
        }
        Commands::Call { name, input } => {
            let input: Value = match input {
                Some(input) => serde_json::from_str(&input).wrap_err("input is not valid JSON")?,
                None => json!({}),
            };
            let output = registry.invoke(&name, input).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }
    };

    let output = registry
        .invoke(name, input)
        .await
        .wrap_err_with(|| format!("{name} failed"))?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
