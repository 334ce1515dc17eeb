//! systemd-networkd Unit Generator
//!
//! Inspects a network interface's live state and renders a `.link` and a
//! `.network` unit for it, each saved to a unique temp file together with
//! the `cp` command for moving it into /etc/systemd/network.  The copy is
//! always left to the operator.

use clap::Parser;
use color_eyre::eyre;
use networkdgen_render::{
    split_vlans, LinkDocument, LinkMatch, LinkSection, NetworkDocument, NetworkLinkSection,
    NetworkMatch, NetworkSection, RouteSection,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub mod cli;

#[cfg(test)]
mod tests;

/// Writes a rendered unit to a fresh uniquely named temp file and keeps it
///
/// The file is flushed and persisted in place; it is neither deleted nor
/// renamed when the process exits.
///
/// # Arguments
/// * `contents` - Rendered unit text
/// * `suffix` - File suffix (`.link` or `.network`)
///
/// # Errors
/// * Creating, writing or persisting the temp file fails
fn write_unit(contents: &str, suffix: &str) -> eyre::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;

    let (_file, path) = file.keep()?;
    Ok(path)
}

/// Target filename under /etc/systemd/network for the `.link` unit
fn link_target(priority: i32, interface: &str) -> String {
    format!("{}-{}.link", priority, interface)
}

/// Target filename under /etc/systemd/network for the `.network` unit
fn network_target(interface: &str) -> String {
    format!("{}.network", interface)
}

/// Prints the manual relocation instructions for a saved unit
fn print_instructions(saved: &Path, target: &str) {
    println!("Saved {} as {}", target, saved.display());
    println!("cat {}", saved.display());
    println!("cp {} /etc/systemd/network/{}", saved.display(), target);
}

fn main() -> eyre::Result<()> {
    let opts = cli::Opts::parse();

    // init logging
    let level = match opts.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    FmtSubscriber::builder().with_max_level(level).init();

    // init error/panic handling
    color_eyre::install()?;

    let facts = networkdgen_facts::gather(&opts.interface)?;
    tracing::info!(
        mac = %facts.mac_address,
        gateway = %facts.gateway,
        addresses = facts.addresses.len(),
        "collected interface facts"
    );

    let link = LinkDocument {
        match_section: LinkMatch {
            mac_address: facts.mac_address.clone(),
            interface: facts.interface.clone(),
        },
        link: LinkSection {
            name: opts.rename.clone(),
            description: "Ethernet port N".to_string(),
            mac_address_policy: "persistent".to_string(),
            auto_negotiation: "yes".to_string(),
            receive_checksum_offload: false,
            transmit_checksum_offload: false,
            tcp_segmentation_offload: false,
            tcp6_segmentation_offload: false,
            generic_segmentation_offload: false,
            generic_receive_offload: false,
            large_receive_offload: false,
        },
    };

    let network = NetworkDocument {
        match_section: NetworkMatch {
            name: facts.interface.clone(),
        },
        network: NetworkSection {
            description: format!("Network for {}", facts.interface),
            static_ips: facts.addresses.clone(),
            vlan_interfaces: split_vlans(&opts.vlan),
        },
        route: RouteSection {
            gateway: facts.gateway,
        },
        link: NetworkLinkSection,
    };

    // fixed delivery order: .link first, then .network; the two files are
    // independent and a later failure leaves the earlier file in place
    println!("##### .link:");
    let saved = write_unit(&link.to_string(), ".link")?;
    print_instructions(&saved, &link_target(opts.priority, &opts.interface));

    println!();
    println!("##### .network:");
    let saved = write_unit(&network.to_string(), ".network")?;
    print_instructions(&saved, &network_target(&opts.interface));

    Ok(())
}
