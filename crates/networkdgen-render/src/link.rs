//! `.link` unit rendering
//!
//! A `.link` unit matches a physical NIC by hardware address and pins down
//! its name, negotiation and offload policy at the link layer.

use std::fmt;

/// `[Match]` section of a `.link` unit
///
/// Matches on the hardware address; the interface name is carried along but
/// only emitted as a commented-out reference line.
#[derive(Debug, Clone)]
pub struct LinkMatch {
    /// Hardware address of the NIC, colon-separated hex octets
    pub mac_address: String,

    /// Current interface name
    pub interface: String,
}

impl fmt::Display for LinkMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# https://www.freedesktop.org/software/systemd/man/systemd.network.html#%5BMatch%5D%20Section%20Options")?;
        writeln!(f, "[Match]")?;
        writeln!(f, "MACAddress={}", self.mac_address)?;
        writeln!(f, "#Name={}", self.interface)?;
        Ok(())
    }
}

/// `[Link]` section of a `.link` unit
///
/// The policy strings and offload toggles are recorded on the struct, but
/// the rendered text always carries the conservative literals: persistent
/// MAC policy, autonegotiation on, every hardware offload off.  Only `name`
/// and `description` flow from the fields into the output.
#[derive(Debug, Clone)]
pub struct LinkSection {
    /// Rename the interface to this name; `None` renders the rename key as
    /// a commented-out `example0` placeholder instead
    pub name: Option<String>,

    pub description: String,
    pub mac_address_policy: String,
    pub auto_negotiation: String,

    // Hardware offloading
    pub receive_checksum_offload: bool,
    pub transmit_checksum_offload: bool,
    pub tcp_segmentation_offload: bool,
    pub tcp6_segmentation_offload: bool,
    pub generic_segmentation_offload: bool,
    pub generic_receive_offload: bool,
    pub large_receive_offload: bool,
}

impl fmt::Display for LinkSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# https://www.freedesktop.org/software/systemd/man/systemd.link.html#%5BLink%5D%20Section%20Options")?;
        writeln!(f, "[Link]")?;

        writeln!(f, "# Rename interface")?;
        match &self.name {
            Some(name) => writeln!(f, "Name={}", name)?,
            None => writeln!(f, "#Name=example0")?,
        }

        writeln!(f, "Description={}", self.description)?;
        writeln!(f, "MACAddressPolicy=persistent")?;
        writeln!(f, "AutoNegotiation=yes")?;
        writeln!(f)?;
        writeln!(f, "# Disable NIC hardware offloading (because possible hw bugs)")?;
        writeln!(f, "ReceiveChecksumOffload=no")?;
        writeln!(f, "TransmitChecksumOffload=no")?;
        writeln!(f, "TCPSegmentationOffload=no")?;
        writeln!(f, "TCP6SegmentationOffload=no")?;
        writeln!(f, "GenericSegmentationOffload=no")?;
        writeln!(f, "GenericReceiveOffload=no")?;
        writeln!(f, "LargeReceiveOffload=no")?;
        Ok(())
    }
}

/// A complete `.link` unit: `[Match]` followed by `[Link]`
///
/// When a rename target is present a banner comment describing the rename
/// is emitted above the sections.
#[derive(Debug, Clone)]
pub struct LinkDocument {
    pub match_section: LinkMatch,
    pub link: LinkSection,
}

impl fmt::Display for LinkDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.link.name {
            writeln!(
                f,
                "# Rename NIC with MAC address {} to {}",
                self.match_section.mac_address, name
            )?;
        }
        write!(f, "{}", self.match_section)?;
        writeln!(f)?;
        write!(f, "{}", self.link)
    }
}
