//! Error types for the ping sequence

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fatal failures; each one terminates the run with exit code 1.
#[derive(Debug, Error)]
pub enum PingError {
    /// Control device could not be opened
    #[error("open control device {}: {source}", path.display())]
    CtrlOpen { path: PathBuf, source: io::Error },

    /// Kernel rejected the endpoint creation ioctl
    #[error("RPMSG_CREATE_EPT_IOCTL for '{name}': {source}")]
    EndpointCreate {
        name: String,
        source: nix::errno::Errno,
    },

    /// No device registered the requested service name
    #[error("no rpmsg device found for service '{0}'")]
    DeviceNotFound(String),

    /// Data device could not be opened
    #[error("open rpmsg device {}: {source}", path.display())]
    DeviceOpen { path: PathBuf, source: io::Error },

    /// Write to the data device failed outright
    #[error("write to rpmsg device: {0}")]
    Write(io::Error),

    /// Device accepted fewer bytes than requested
    #[error("short write to rpmsg device: {written} of {expected} bytes accepted")]
    PartialWrite { written: usize, expected: usize },

    /// Poll on the data device failed
    #[error("poll on rpmsg device: {0}")]
    Poll(io::Error),

    /// No reply arrived within the configured timeout
    #[error("no reply within {0:?}")]
    ReplyTimeout(Duration),

    /// Read from the data device failed
    #[error("read from rpmsg device: {0}")]
    Read(io::Error),
}
