use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde_json::json;
use sips_client::{ClientConfig, GatewayClient, RequestParameters};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the merchant settings and binary paths
    #[arg(long)]
    config: PathBuf,

    /// Use the SIPS demo environment regardless of the config file
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Request the payment form for a checkout
    Token {
        /// Amount in major units, e.g. 19.99
        #[arg(long)]
        amount: Decimal,

        /// ISO 4217 alphabetic currency code
        #[arg(long, default_value = "EUR")]
        currency: String,

        /// Extra parameter passed to the request binary, as name=value
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Decode the encrypted data posted back by the gateway
    Decode {
        #[arg(long)]
        message: String,
    },
    /// Print the payment URL for the configured environment
    Url,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = ClientConfig::from_file(&cli.config).into_diagnostic()?;
    let debug = cli.debug || config.is_debug();
    let client = GatewayClient::new(config.with_debug(debug));

    let output = match cli.command {
        Command::Token {
            amount,
            currency,
            params,
        } => {
            let params: RequestParameters = params.into_iter().collect();
            let response = client
                .request_checkout_token(amount, &currency, params)
                .await
                .into_diagnostic()?;
            let form = response.checkout_form();
            json!({
                "status": form.status(),
                "error": form.error(),
                "form": form.html(),
                "url": client.call_payment_url(),
                "fields": response,
            })
        }
        Command::Decode { message } => {
            let response = client
                .do_checkout_payment(&message)
                .await
                .into_diagnostic()?;
            let result = response.payment_result();
            json!({
                "accepted": result.is_accepted(),
                "decoded_amount": result.decoded_amount(),
                "fields": result,
            })
        }
        Command::Url => json!({
            "url": client.call_payment_url(),
            "merchant_id": client.config().merchant_id(),
        }),
    };

    let rendered = serde_json::to_string_pretty(&output).into_diagnostic()?;
    println!("{rendered}");

    Ok(())
}
