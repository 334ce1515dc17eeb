//! `.network` unit rendering
//!
//! A `.network` unit assigns addresses, attaches VLAN sub-interfaces and
//! installs the default route for an interface matched by name.

use ipnetwork::IpNetwork;
use std::{fmt, net::IpAddr};

/// Splits the `--vlan` argument into VLAN interface names
///
/// A comma anywhere makes the argument a list (empty segments are kept);
/// otherwise a non-empty argument is a single name and an empty argument
/// means no VLANs at all.
pub fn split_vlans(arg: &str) -> Vec<String> {
    if arg.contains(',') {
        arg.split(',').map(str::to_string).collect()
    } else if !arg.is_empty() {
        vec![arg.to_string()]
    } else {
        Vec::new()
    }
}

/// `[Match]` section of a `.network` unit; matches by interface name
#[derive(Debug, Clone)]
pub struct NetworkMatch {
    pub name: String,
}

impl fmt::Display for NetworkMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# https://www.freedesktop.org/software/systemd/man/systemd.network.html#%5BMatch%5D%20Section%20Options")?;
        writeln!(f, "[Match]")?;
        writeln!(f, "Name={}", self.name)?;
        writeln!(f)?;
        Ok(())
    }
}

/// `[Network]` section: description, static addresses and VLAN attachment
///
/// Addresses render one `Address=` line each, in input order, without
/// deduplication.  An empty VLAN list renders a commented placeholder pair
/// so the key stays discoverable in the generated file.
#[derive(Debug, Clone)]
pub struct NetworkSection {
    pub description: String,
    pub static_ips: Vec<IpNetwork>,
    pub vlan_interfaces: Vec<String>,
}

impl fmt::Display for NetworkSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# https://www.freedesktop.org/software/systemd/man/systemd.network.html#%5BNetwork%5D%20Section%20Options")?;
        writeln!(f, "[Network]")?;
        writeln!(f, "Description={}", self.description)?;
        writeln!(f, "# DHCP no|yes|ipv4|ipv6")?;
        writeln!(f, "DHCP=no")?;

        for ip in &self.static_ips {
            writeln!(f, "Address={}", ip)?;
        }

        writeln!(f, "# VLAN interface(s)")?;
        if self.vlan_interfaces.is_empty() {
            writeln!(f, "#VLAN=example0")?;
            writeln!(f, "#VLAN=example1")?;
        } else {
            for vlan in &self.vlan_interfaces {
                writeln!(f, "VLAN={}", vlan)?;
            }
        }

        writeln!(f, "#IPForward=yes")?;
        writeln!(f, "IPMasquerade=no")?;
        writeln!(f, "LinkLocalAddressing=no")?;
        writeln!(f, "LLDP=no")?;
        writeln!(f)?;
        Ok(())
    }
}

/// `[Route]` section holding the single default gateway
#[derive(Debug, Clone)]
pub struct RouteSection {
    pub gateway: IpAddr,
}

impl fmt::Display for RouteSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# https://www.freedesktop.org/software/systemd/man/systemd.network.html#%5BRoute%5D%20Section%20Options")?;
        writeln!(f, "[Route]")?;
        writeln!(f, "# Gateway IP address or _dhcp4, _dhcp6")?;
        writeln!(f, "Gateway={}", self.gateway)?;
        writeln!(f, "#GatewayOnLink=")?;
        writeln!(f, "# Metric ")?;
        writeln!(f, "#Metric=100")?;
        writeln!(f, "# Scope \"global\", \"site\", \"link\", \"host\", or \"nowhere\":")?;
        writeln!(f, "#Scope=")?;
        writeln!(f)?;
        Ok(())
    }
}

/// `[Link]` sub-section: online-readiness and multicast/promiscuity policy,
/// all fixed to conservative defaults
#[derive(Debug, Clone)]
pub struct NetworkLinkSection;

impl fmt::Display for NetworkLinkSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# https://www.freedesktop.org/software/systemd/man/systemd.network.html#%5BLink%5D%20Section%20Options")?;
        writeln!(f, "[Link]")?;
        writeln!(f, "RequiredForOnline=yes")?;
        writeln!(f, "#ARP=no")?;
        writeln!(f, "Multicast=no")?;
        writeln!(f, "AllMulticast=no")?;
        writeln!(f, "Unmanaged=no")?;
        writeln!(f, "Promiscuous=no")?;
        writeln!(f)?;
        Ok(())
    }
}

/// A complete `.network` unit: `[Match]`, `[Network]`, `[Route]`, `[Link]`
#[derive(Debug, Clone)]
pub struct NetworkDocument {
    pub match_section: NetworkMatch,
    pub network: NetworkSection,
    pub route: RouteSection,
    pub link: NetworkLinkSection,
}

impl fmt::Display for NetworkDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.match_section)?;
        write!(f, "{}", self.network)?;
        write!(f, "{}", self.route)?;
        write!(f, "{}", self.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(ips: &[&str], vlans: &[&str]) -> NetworkDocument {
        NetworkDocument {
            match_section: NetworkMatch {
                name: "eth0".into(),
            },
            network: NetworkSection {
                description: "Network for eth0".into(),
                static_ips: ips.iter().map(|ip| ip.parse().unwrap()).collect(),
                vlan_interfaces: vlans.iter().map(|v| v.to_string()).collect(),
            },
            route: RouteSection {
                gateway: "10.0.0.1".parse().unwrap(),
            },
            link: NetworkLinkSection,
        }
    }

    #[test]
    fn vlan_argument_splitting() {
        assert!(split_vlans("").is_empty());
        assert_eq!(split_vlans("lan0"), vec!["lan0"]);
        assert_eq!(split_vlans("lan0,wan0"), vec!["lan0", "wan0"]);
        // trailing comma keeps the empty segment
        assert_eq!(split_vlans("lan0,"), vec!["lan0", ""]);
    }

    #[test]
    fn addresses_render_in_input_order() {
        let text = document(&["10.0.0.5/24", "192.168.1.2/16", "10.0.0.5/24"], &[]).to_string();
        let lines: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("Address="))
            .collect();
        assert_eq!(
            lines,
            vec![
                "Address=10.0.0.5/24",
                "Address=192.168.1.2/16",
                "Address=10.0.0.5/24",
            ]
        );
    }

    #[test]
    fn empty_vlan_list_renders_placeholder_pair() {
        let text = document(&[], &[]).to_string();
        assert!(text.contains("# VLAN interface(s)\n#VLAN=example0\n#VLAN=example1\n"));
        assert!(!text.lines().any(|l| l.starts_with("VLAN=")));
    }

    #[test]
    fn vlans_render_one_line_each_in_order() {
        let text = document(&[], &["lan0", "wan0"]).to_string();
        let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("VLAN=")).collect();
        assert_eq!(lines, vec!["VLAN=lan0", "VLAN=wan0"]);
        assert!(!text.contains("#VLAN=example0"));
    }

    #[test]
    fn gateway_renders_exactly_once() {
        let mut doc = document(&[], &[]);
        doc.route.gateway = "192.0.2.1".parse().unwrap();
        let text = doc.to_string();
        let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("Gateway=")).collect();
        assert_eq!(lines, vec!["Gateway=192.0.2.1"]);
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let doc = document(&["10.0.0.5/24"], &["lan0"]);
        assert_eq!(doc.to_string(), doc.to_string());
    }

    #[test]
    fn sections_render_in_fixed_order() {
        let text = document(&["10.0.0.5/24"], &[]).to_string();

        let match_at = text.find("[Match]").unwrap();
        let network_at = text.find("[Network]").unwrap();
        let route_at = text.find("[Route]").unwrap();
        let link_at = text.find("[Link]").unwrap();
        assert!(match_at < network_at && network_at < route_at && route_at < link_at);

        assert!(text.contains("[Match]\nName=eth0\n"));
        assert!(text.contains("Address=10.0.0.5/24\n"));
        assert!(text.contains("\nGateway=10.0.0.1\n"));
        assert!(text.contains("[Link]\nRequiredForOnline=yes\n"));
        assert!(text.contains("Description=Network for eth0\n"));
        assert!(text.contains("\nDHCP=no\n"));
    }
}
