//! systemd-networkd Unit Rendering
//!
//! Pure text templating for `.link` and `.network` units.  Every document is
//! a write-once value whose `Display` output is a deterministic function of
//! its fields: no I/O, no timestamps, no randomness.  Section and key order
//! are fixed to match the upstream systemd schema.

mod link;
mod network;

pub use link::{LinkDocument, LinkMatch, LinkSection};
pub use network::{
    split_vlans, NetworkDocument, NetworkLinkSection, NetworkMatch, NetworkSection, RouteSection,
};
