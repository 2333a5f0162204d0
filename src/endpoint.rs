//! Endpoint creation through the rpmsg control device
//!
//! Creating an endpoint is a single `RPMSG_CREATE_EPT_IOCTL` on the control
//! device. On success the kernel binds a new endpoint to the co-processor
//! address and materializes a `/dev/rpmsgN` data node asynchronously; the
//! caller is responsible for waiting for that node to appear.

use crate::error::PingError;
use nix::ioctl_write_ptr;
use std::fs::OpenOptions;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use tracing::debug;

/// Let the kernel pick the source address.
pub const RPMSG_ADDR_ANY: u32 = 0xFFFF_FFFF;

/// Name field length in the kernel's `rpmsg_endpoint_info`.
const RPMSG_NAME_LEN: usize = 32;

/// Mirrors `struct rpmsg_endpoint_info` from `<linux/rpmsg.h>`.
#[repr(C)]
pub struct EndpointInfo {
    name: [u8; RPMSG_NAME_LEN],
    src: u32,
    dst: u32,
}

impl EndpointInfo {
    /// Zero-initialized record with the service name truncated to fit the
    /// fixed field, a trailing NUL always preserved.
    pub fn new(service: &str, dst: u32) -> Self {
        let mut name = [0u8; RPMSG_NAME_LEN];
        let bytes = service.as_bytes();
        let len = bytes.len().min(RPMSG_NAME_LEN - 1);
        name[..len].copy_from_slice(&bytes[..len]);

        Self {
            name,
            src: RPMSG_ADDR_ANY,
            dst,
        }
    }
}

ioctl_write_ptr!(rpmsg_create_ept, 0xb5, 0x1, EndpointInfo);

/// Register an endpoint named `service` bound to destination address `dst`.
///
/// The control fd is released when this returns, whatever the outcome. The
/// data device node is not synchronously confirmed here.
pub fn create_endpoint(ctrl: &Path, service: &str, dst: u32) -> Result<(), PingError> {
    let ctrl_dev = OpenOptions::new()
        .read(true)
        .write(true)
        .open(ctrl)
        .map_err(|source| PingError::CtrlOpen {
            path: ctrl.to_path_buf(),
            source,
        })?;

    let info = EndpointInfo::new(service, dst);

    unsafe { rpmsg_create_ept(ctrl_dev.as_raw_fd(), &info) }.map_err(|source| {
        PingError::EndpointCreate {
            name: service.to_string(),
            source,
        }
    })?;

    debug!("created endpoint '{}' -> dst {:#x}", service, dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_info_layout_matches_kernel() {
        // 32-byte name + two u32 addresses
        assert_eq!(std::mem::size_of::<EndpointInfo>(), 40);
    }

    #[test]
    fn test_endpoint_info_populated() {
        let info = EndpointInfo::new("m4-pingpong", 0x400);

        assert_eq!(&info.name[..11], b"m4-pingpong");
        assert!(info.name[11..].iter().all(|&b| b == 0));
        assert_eq!(info.src, RPMSG_ADDR_ANY);
        assert_eq!(info.dst, 0x400);
    }

    #[test]
    fn test_long_name_truncated_with_nul() {
        let long = "x".repeat(64);
        let info = EndpointInfo::new(&long, 1);

        assert!(info.name[..RPMSG_NAME_LEN - 1].iter().all(|&b| b == b'x'));
        assert_eq!(info.name[RPMSG_NAME_LEN - 1], 0);
    }
}
