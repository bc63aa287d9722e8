use clap::Parser;

use vault_core::core::bits::Symbol;

/// Command line interface definition
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Deployment manifest path
    #[arg(long, short)]
    pub file: Option<String>,

    /// Where to write the deployment report JSON
    #[arg(long, short)]
    pub output_file: Option<String>,

    /// Chain RPC endpoint, overrides manifest and address book
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Address book path
    #[arg(long)]
    pub address_book: Option<String>,

    /// Chain name, overrides the manifest
    #[arg(long, short)]
    pub chain: Option<Symbol>,

    /// Reserve clone addresses and exit without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log file directory
    #[arg(long, short)]
    pub log_path: Option<String>,
}
