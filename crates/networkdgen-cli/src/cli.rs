//! Command Line Options and Arguments

use clap::Parser;

#[derive(Parser)]
#[command(about = "Generate systemd-networkd .link/.network units from an interface's live state")]
pub struct Opts {
    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Source interface to inspect
    #[arg(short, long)]
    pub interface: String,

    /// Rename interface name to given name, for example lan0
    #[arg(short, long)]
    pub rename: Option<String>,

    /// Priority for .link file
    #[arg(short = 'P', long, default_value_t = 10, allow_negative_numbers = true)]
    pub priority: i32,

    /// VLAN interface(s) for example: "lan0,wan0"
    #[arg(long, default_value = "")]
    pub vlan: String,
}
