use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wallet_signer::Secp256k1Signer;
use wallet_signer::signing::{hash_message, recover_message_address};
use wallet_signer::types::Signature;

/// Offline key operations.
#[derive(Parser)]
struct Args {
    /// Hex-encoded 32-byte private key.
    #[clap(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the address and public key of the configured key.
    Address,
    /// Sign a text message with the configured key.
    SignMessage { message: String },
    /// Recover the address that signed a text message.
    Recover {
        #[clap(long)]
        message: String,
        #[clap(long)]
        signature: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    let output = match args.command {
        Command::Address => {
            let signer = load_signer(args.private_key.as_deref())?;
            json!({
                "address": signer.address(),
                "public_key": signer.public_key().to_string(),
            })
        }
        Command::SignMessage { message } => {
            let signer = load_signer(args.private_key.as_deref())?;
            let signature = signer.sign_digest(&hash_message(message.as_bytes()))?;
            json!({
                "address": signer.address(),
                "signature": signature,
            })
        }
        Command::Recover { message, signature } => {
            let signature: Signature = signature.parse().context("parsing signature")?;
            let address = recover_message_address(message.as_bytes(), &signature)?;
            json!({ "address": address })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_signer(private_key: Option<&str>) -> anyhow::Result<Secp256k1Signer> {
    let private_key = private_key.context("--private-key or WALLET_PRIVATE_KEY is required")?;
    Ok(Secp256k1Signer::from_hex(private_key)?)
}
