// src/bin/udfc_keys.rs
//! Key store admin tool: bootstrap keys, print the fingerprint, try the cipher
//!
//! Usage:
//!   udfc-keys init
//!   udfc-keys fingerprint
//!   udfc-keys encrypt <text> <key> <iv>
//!   udfc-keys decrypt <base64> <key> <iv>
//!   udfc-keys seal <text>
//!   udfc-keys open <base64>
//!
//! Config comes from `$UDFC_CONFIG` (or built-in defaults); the private key
//! passphrase from the configured env var, prompted for when unset.

use std::io::Write;

use anyhow::{bail, Context, Result};
use rpassword::read_password;
use tracing::info;
use tracing_subscriber::EnvFilter;
use udf_crypt::{Config, CryptoContext, InitOutcome, KeyPassphrase};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("usage: udfc-keys <init|fingerprint|encrypt|decrypt|seal|open> [args...]");
    };

    let ctx = open_context()?;

    match (command.as_str(), &args[1..]) {
        ("init", []) => {
            match ctx.init_outcome() {
                InitOutcome::Generated => info!("new key set written"),
                InitOutcome::Existing => info!("key set already present"),
            }
            println!("{}", ctx.fingerprint()?);
        }
        ("fingerprint", []) => println!("{}", ctx.fingerprint()?),
        ("encrypt", [text, key, iv]) => println!("{}", ctx.encrypt_string(text, key, iv)?),
        ("decrypt", [text, key, iv]) => println!("{}", ctx.decrypt_string(text, key, iv)?),
        ("seal", [text]) => println!("{}", ctx.seal_string(text)?),
        ("open", [text]) => println!("{}", ctx.open_string(text)?),
        (other, rest) => bail!("unknown command or wrong arguments: {other} ({} args)", rest.len()),
    }

    Ok(())
}

fn open_context() -> Result<CryptoContext> {
    let config = Config::from_env().context("Failed to load configuration (check $UDFC_CONFIG)")?;

    let passphrase = match std::env::var(&config.keys.passphrase_env) {
        Ok(value) => value,
        Err(_) => {
            eprint!("Private key passphrase: ");
            std::io::stderr().flush()?;
            read_password()?.trim_end().to_owned()
        }
    };

    CryptoContext::new(config, KeyPassphrase::new(passphrase))
        .context("Key store initialization failed, refusing to continue without valid keys")
}
