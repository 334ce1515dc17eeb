//! Unit tests for the CLI plumbing

use crate::{link_target, network_target, write_unit};
use clap::Parser;

#[test]
fn link_target_carries_priority_and_interface() {
    assert_eq!(link_target(10, "eth0"), "10-eth0.link");
    assert_eq!(link_target(25, "enp3s0"), "25-enp3s0.link");
}

#[test]
fn negative_priority_flows_into_the_link_target() {
    let opts =
        crate::cli::Opts::try_parse_from(&["networkdgen", "-i", "eth0", "-P", "-5"]).unwrap();
    assert_eq!(opts.priority, -5);
    assert_eq!(link_target(opts.priority, "eth0"), "-5-eth0.link");
}

#[test]
fn network_target_carries_interface() {
    assert_eq!(network_target("eth0"), "eth0.network");
}

#[test]
fn opts_defaults() {
    let opts = crate::cli::Opts::try_parse_from(&["networkdgen", "-i", "eth0"]).unwrap();
    assert_eq!(opts.interface, "eth0");
    assert_eq!(opts.priority, 10);
    assert_eq!(opts.vlan, "");
    assert!(opts.rename.is_none());
    assert_eq!(opts.verbosity, 0);
}

#[test]
fn opts_require_an_interface() {
    assert!(crate::cli::Opts::try_parse_from(&["networkdgen"]).is_err());
}

#[test]
fn opts_accept_all_flags() {
    let opts = crate::cli::Opts::try_parse_from(&[
        "networkdgen",
        "-vv",
        "-i",
        "eth0",
        "-r",
        "lan0",
        "-P",
        "20",
        "--vlan",
        "lan0,wan0",
    ])
    .unwrap();
    assert_eq!(opts.verbosity, 2);
    assert_eq!(opts.rename.as_deref(), Some("lan0"));
    assert_eq!(opts.priority, 20);
    assert_eq!(opts.vlan, "lan0,wan0");
}

#[test]
fn write_unit_persists_the_rendered_text() {
    let path = write_unit("[Match]\nName=eth0\n", ".network").unwrap();
    assert_eq!(path.extension().unwrap(), "network");

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "[Match]\nName=eth0\n");

    std::fs::remove_file(path).unwrap();
}
