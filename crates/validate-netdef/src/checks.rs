//! Structural checks on a parsed network definition.

use netdef_error_reporting::{NetdefError, report_semantic};
use netdef_yaml::{Node, SourceUnit};

const SUPPORTED_VERSION: i64 = 2;

const RENDERERS: &[&str] = &["networkd", "NetworkManager", "sriov"];

const NETWORK_KEYS: &[&str] = &[
    "version",
    "renderer",
    "ethernets",
    "wifis",
    "bridges",
    "bonds",
    "vlans",
    "tunnels",
    "vrfs",
    "modems",
    "nm-devices",
    "dummy-devices",
    "virtual-ethernets",
];

/// Check the top-level layout of a definition.
///
/// # Errors
///
/// Returns the first problem found, located at the offending node when the
/// node is known.
pub fn check(unit: &SourceUnit, root: &Node) -> Result<(), NetdefError> {
    let mut error = None;
    if check_root(unit, root, &mut error) {
        return Ok(());
    }
    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn check_root(unit: &SourceUnit, root: &Node, error: &mut Option<NetdefError>) -> bool {
    let path = unit.path();

    if !root.is_hash() {
        return report_semantic!(error, path, Some(root.mark), "expected a mapping at the top level");
    }

    let Some(network) = root.get("network") else {
        return report_semantic!(error, path, None, "missing 'network' key");
    };

    if !network.is_hash() {
        return report_semantic!(error, path, Some(network.mark), "expected mapping (check indentation)");
    }

    check_network(unit, network, error)
}

fn check_network(unit: &SourceUnit, network: &Node, error: &mut Option<NetdefError>) -> bool {
    let path = unit.path();

    for entry in network.entries().unwrap_or_default() {
        let Some(key) = entry.key.as_str() else {
            return report_semantic!(error, path, Some(entry.key.mark), "expected scalar key");
        };

        match key {
            "version" => {
                if entry.value.as_i64() != Some(SUPPORTED_VERSION) {
                    return report_semantic!(
                        error,
                        path,
                        Some(entry.value.mark),
                        "Only version {} is supported",
                        SUPPORTED_VERSION
                    );
                }
            }
            "renderer" => {
                let renderer = entry.value.as_str().unwrap_or_default();
                if !RENDERERS.contains(&renderer) {
                    return report_semantic!(
                        error,
                        path,
                        Some(entry.value.mark),
                        "unknown renderer '{}'",
                        renderer
                    );
                }
            }
            other if !NETWORK_KEYS.contains(&other) => {
                return report_semantic!(error, path, Some(entry.key.mark), "unknown key '{}'", other);
            }
            _ => {}
        }
    }

    true
}
