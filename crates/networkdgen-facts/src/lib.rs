//! Interface Fact Gathering
//!
//! Queries the live state of a network interface: the hardware address from
//! sysfs, and the default gateway plus assigned addresses from `ip -json`.
//! The result is a single immutable [`InterfaceFacts`] record that the unit
//! renderers consume.

pub mod cmd;

use ipnetwork::IpNetwork;
use serde::Deserialize;
use std::{fs, io, net::IpAddr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The interface's hardware address could not be read (or was empty)
    #[error("could not get MAC address from interface {iface}")]
    MacAddress {
        iface: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("failed to run query command: {0}")]
    Shell(#[from] cmd::CommandError),

    /// The query command's stdout was not the JSON shape we expect
    #[error("failed to decode query output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no default route reported for device {0}")]
    NoDefaultRoute(String),

    #[error("default route for device {0} carries no gateway")]
    MissingGateway(String),

    #[error("invalid address prefix: {0}")]
    Prefix(#[from] ipnetwork::IpNetworkError),
}

/// Snapshot of a network interface's queried runtime state
///
/// Built once per run and never mutated afterwards; both rendered unit
/// documents are pure functions of this record.
#[derive(Debug)]
pub struct InterfaceFacts {
    /// Name of the source interface (e.g. `eth0`)
    pub interface: String,

    /// Hardware address, colon-separated hex octets
    pub mac_address: String,

    /// Assigned addresses with prefix lengths, in enumeration order
    pub addresses: Vec<IpNetwork>,

    /// First reported default gateway
    pub gateway: IpAddr,
}

/// One record of `ip -json route list` output; only the gateway is used
#[derive(Debug, Deserialize)]
struct RouteRecord {
    #[serde(default)]
    gateway: Option<IpAddr>,
}

/// One device record of `ip -json address show` output
#[derive(Debug, Deserialize)]
struct DeviceRecord {
    addr_info: Vec<AddrInfo>,
}

#[derive(Debug, Deserialize)]
struct AddrInfo {
    local: IpAddr,
    prefixlen: u8,
}

/// Gathers the facts for `interface` by querying the running system
///
/// Runs the route query and the address query strictly in sequence, each
/// fully drained before the next starts.
///
/// # Arguments
/// * `interface` - Name of an existing network interface
///
/// # Errors
/// * `Error::MacAddress` - Hardware address unreadable or empty
/// * `Error::Shell` - A query command could not be launched or drained
/// * `Error::Decode` - A query produced output of an unexpected shape
/// * `Error::NoDefaultRoute` / `Error::MissingGateway` - No usable gateway
pub fn gather(interface: &str) -> Result<InterfaceFacts, Error> {
    let mac_address = read_mac_address(interface)?;

    let raw = cmd::run_streamed(&[
        "ip", "-json", "-details", "route", "list", "dev", interface, "default",
    ])?;
    let gateway = decode_gateway(&raw, interface)?;

    let raw = cmd::run_streamed(&["ip", "-json", "-details", "address", "show", "dev", interface])?;
    let addresses = decode_addresses(&raw)?;

    tracing::debug!(%gateway, addresses = addresses.len(), "queried interface state");

    Ok(InterfaceFacts {
        interface: interface.to_string(),
        mac_address,
        addresses,
        gateway,
    })
}

/// Reads the hardware address for `interface` from sysfs
fn read_mac_address(interface: &str) -> Result<String, Error> {
    let path = format!("/sys/class/net/{}/address", interface);
    let raw = fs::read_to_string(&path).map_err(|source| Error::MacAddress {
        iface: interface.to_string(),
        source: Some(source),
    })?;

    parse_mac(&raw, interface)
}

/// Trims a raw sysfs address value, rejecting interfaces with no address
fn parse_mac(raw: &str, interface: &str) -> Result<String, Error> {
    let mac = raw.trim().to_string();
    if mac.is_empty() {
        return Err(Error::MacAddress {
            iface: interface.to_string(),
            source: None,
        });
    }

    Ok(mac)
}

/// Decodes the route query output, consulting only the first record
fn decode_gateway(raw: &[u8], interface: &str) -> Result<IpAddr, Error> {
    let routes: Vec<RouteRecord> = serde_json::from_slice(raw)?;
    let first = routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoDefaultRoute(interface.to_string()))?;

    first
        .gateway
        .ok_or_else(|| Error::MissingGateway(interface.to_string()))
}

/// Decodes the address query output into address/prefix pairs
///
/// Enumeration order is preserved; nothing is deduplicated or sorted.
fn decode_addresses(raw: &[u8]) -> Result<Vec<IpNetwork>, Error> {
    let devices: Vec<DeviceRecord> = serde_json::from_slice(raw)?;

    let mut addresses = Vec::new();
    for dev in devices {
        for info in dev.addr_info {
            addresses.push(IpNetwork::new(info.local, info.prefixlen)?);
        }
    }

    Ok(addresses)
}
