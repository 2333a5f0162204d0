//! Device lookup by registered service name
//!
//! The kernel names data nodes `rpmsgN` with no relation to the service, so
//! the only way to find the right one is to scan the sysfs class directory
//! and read each device's `name` attribute.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config;

/// Find the device node whose registered service name equals `service`.
///
/// Scans `sys_dir` for entries starting with the rpmsg device prefix and
/// compares each one's `name` attribute, stripped of trailing CR/LF, exactly
/// and case-sensitively. The first match in directory order wins; duplicates
/// are not detected. Entries whose attribute file cannot be read are skipped.
pub fn find_device(sys_dir: &Path, dev_dir: &Path, service: &str) -> Option<PathBuf> {
    let entries = match fs::read_dir(sys_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("cannot read {}: {}", sys_dir.display(), e);
            return None;
        }
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(node) = file_name.to_str() else {
            continue;
        };
        if !node.starts_with(config::DEVICE_PREFIX) {
            continue;
        }

        let attr = entry.path().join(config::NAME_ATTR);
        let Ok(registered) = fs::read_to_string(&attr) else {
            debug!("skipping {}: no readable name attribute", node);
            continue;
        };

        if registered.trim_end_matches(['\r', '\n']) == service {
            return Some(dev_dir.join(node));
        }
    }

    None
}
