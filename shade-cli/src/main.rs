//! Shade CLI
//!
//! Command-line interface for the Shade dual-key stealth address protocol.
//! Replays the reference flow over a JSON-file store:
//!
//! 1. `shade keygen` — receiver generates its scan + spend identity
//! 2. `shade announce` — sender derives a stealth address and writes the
//!    announcement
//! 3. `shade reconstruct` — receiver recovers the stealth key and checks
//!    the announced address

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shade_core::constants::{ANNOUNCEMENT_RECORD_KEY, DEFAULT_AUX_PAYLOAD, RECEIVER_RECORD_KEY};
use shade_core::traits::RecordStore;
use shade_core::types::{Announcement, ReceiverIdentity};
use shade_store::{FileStore, RecordStoreExt};

/// Shade - dual-key stealth addresses for Ethereum
#[derive(Parser)]
#[command(name = "shade")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding receiver.json / announcement.json
    #[arg(long, global = true, default_value = "shade-keys")]
    keys_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new receiver identity (scan + spend key pairs)
    Keygen {
        /// Overwrite an existing receiver record
        #[arg(long)]
        force: bool,
    },

    /// Derive a stealth address and write the announcement
    Announce {
        /// Emit the broadcast shape (no secret fields in the record)
        #[arg(long)]
        production: bool,

        /// Auxiliary payload appended after the ephemeral key
        #[arg(long)]
        memo: Option<String>,
    },

    /// Reconstruct the stealth key from the stored announcement
    Reconstruct,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "shade=debug,info"
    } else {
        "shade=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = FileStore::new(&cli.keys_dir)
        .await
        .with_context(|| format!("failed to open key store at {}", cli.keys_dir.display()))?;

    match cli.command {
        Commands::Keygen { force } => cmd_keygen(&store, force).await,
        Commands::Announce { production, memo } => cmd_announce(&store, production, memo).await,
        Commands::Reconstruct => cmd_reconstruct(&store).await,
    }
}

async fn cmd_keygen(store: &FileStore, force: bool) -> Result<()> {
    println!("{}", "🔑 Generating receiver identity...".cyan().bold());

    if !force && store.exists(RECEIVER_RECORD_KEY).await? {
        bail!(
            "a receiver record already exists in {} (use --force to replace it)",
            store.dir().display()
        );
    }

    let identity =
        shade_stealth::generate_receiver_identity().context("key generation failed")?;
    store.save_as(RECEIVER_RECORD_KEY, &identity).await?;

    println!("{}", "✅ Receiver identity saved".green());
    println!(
        "   {} {}",
        "Base address:".dimmed(),
        identity.base_eth_address
    );
    println!(
        "   {} {}",
        "Scan pub:".dimmed(),
        identity.scan.public_key_compressed.to_hex()
    );
    println!(
        "   {} {}",
        "Spend pub:".dimmed(),
        identity.spend.public_key_compressed.to_hex()
    );

    println!(
        "\n{}",
        "⚠️  Keep receiver.json private: it holds both private keys."
            .red()
            .bold()
    );
    Ok(())
}

async fn cmd_announce(store: &FileStore, production: bool, memo: Option<String>) -> Result<()> {
    println!("{}", "💸 Deriving stealth address...".cyan().bold());

    let identity: ReceiverIdentity = store
        .load_required(RECEIVER_RECORD_KEY)
        .await
        .context("no receiver record; run `shade keygen` first")?;

    let memo = memo.map(String::into_bytes);
    let aux = memo.as_deref().unwrap_or(DEFAULT_AUX_PAYLOAD);

    let announcement = if production {
        shade_stealth::derive_for_public_keys(
            &identity.scan.public_key_uncompressed,
            &identity.spend.public_key_uncompressed,
            aux,
        )
    } else {
        shade_stealth::derive_for_identity(&identity, aux)
    }
    .context("stealth derivation failed")?;

    store
        .save_as(ANNOUNCEMENT_RECORD_KEY, &announcement)
        .await?;

    println!("{}", "✅ Announcement saved".green());
    println!(
        "   {} {}",
        "Stealth address:".yellow(),
        announcement.stealth_address
    );
    println!(
        "   {} {}",
        "Ephemeral pub:".dimmed(),
        announcement.ephemeral_pub_uncompressed.to_hex()
    );
    if production {
        println!("   {}", "Broadcast shape: no secret fields written".dimmed());
    } else {
        println!(
            "   {}",
            "Reference shape: record includes stealthPriv for self-check".dimmed()
        );
    }
    Ok(())
}

async fn cmd_reconstruct(store: &FileStore) -> Result<()> {
    println!("{}", "🔎 Reconstructing stealth key...".cyan().bold());

    let identity: ReceiverIdentity = store
        .load_required(RECEIVER_RECORD_KEY)
        .await
        .context("no receiver record; run `shade keygen` first")?;
    let announcement: Announcement = store
        .load_required(ANNOUNCEMENT_RECORD_KEY)
        .await
        .context("no announcement record; run `shade announce` first")?;

    let result = shade_stealth::reconstruct(
        &identity.scan.private_key,
        &identity.spend.private_key,
        &announcement,
    )
    .context("reconstruction failed")?;

    println!(
        "   {} {}",
        "Announced:".dimmed(),
        announcement.stealth_address
    );
    println!("   {} {}", "Derived:  ".dimmed(), result.stealth_address);

    if result.matches {
        println!(
            "\n{}",
            "✅ Match: this announcement is ours and the stealth key is spendable."
                .green()
                .bold()
        );
    } else {
        println!(
            "\n{}",
            "ℹ️  No match: this announcement was not derived for these keys."
                .yellow()
                .bold()
        );
    }
    Ok(())
}
