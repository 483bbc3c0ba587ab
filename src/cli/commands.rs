use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// `MNEX` - Oracle persona post generator with a compliance gate.
#[derive(Parser, Debug)]
#[command(name = "mnex")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Generate oracle persona posts and check them before publishing.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.mnex/config.toml, created on first run)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a post and run it through the compliance checker
    Generate {
        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        presale: PresaleArgs,
    },

    /// Generate a reply to an existing post
    Reply {
        /// Text of the post being answered
        text: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Check arbitrary text against the compliance rules
    Check {
        /// Text to check
        text: String,

        /// Event type used to decide presale handling
        #[arg(long)]
        event: Option<String>,

        /// Treat the text as presale content (disclaimer required)
        #[arg(long)]
        presale: bool,
    },

    /// Produce a safe reply to an inbound user message
    Respond {
        /// Inbound message
        message: String,
    },

    /// Print the persisted compliance audit log
    Audit {
        /// Audit log file (default: the configured log)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ContextArgs {
    /// Event type (presale_pre, presale_start, tx_verification, community, vision, data_fragment, ...)
    #[arg(short, long)]
    pub event: Option<String>,

    /// Explicit seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Transaction hash to verify
    #[arg(long)]
    pub tx_hash: Option<String>,

    /// Force presale compliance handling
    #[arg(long)]
    pub presale_mode: bool,
}

#[derive(Args, Debug, Default)]
pub struct PresaleArgs {
    /// Presale start time
    #[arg(long)]
    pub start_time: Option<String>,

    /// Presale rate
    #[arg(long)]
    pub rate: Option<String>,

    /// Presale wallet address
    #[arg(long)]
    pub wallet: Option<String>,

    /// Presale website
    #[arg(long)]
    pub website: Option<String>,
}

impl PresaleArgs {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.rate.is_none()
            && self.wallet.is_none()
            && self.website.is_none()
    }
}
