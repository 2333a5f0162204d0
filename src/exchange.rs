//! Single request/reply exchange over the data device
//!
//! One write, one read, no framing. The write is checked: a device that
//! accepts fewer bytes than requested fails the exchange rather than being
//! silently treated as success. The reply read can be bounded by a poll-based
//! timeout; without one it blocks until the co-processor answers.

use crate::config;
use crate::error::PingError;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Open the data device read/write.
pub fn open_device(path: &Path) -> Result<File, PingError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| PingError::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `message` and wait for exactly one reply of at most 1023 bytes.
///
/// With a timeout, the read is preceded by a poll and an elapsed wait is a
/// [`PingError::ReplyTimeout`]; without one the read blocks indefinitely.
pub fn exchange<D: Read + Write + AsRawFd>(
    dev: &mut D,
    message: &[u8],
    timeout: Option<Duration>,
) -> Result<Vec<u8>, PingError> {
    let written = dev.write(message).map_err(PingError::Write)?;
    if written < message.len() {
        return Err(PingError::PartialWrite {
            written,
            expected: message.len(),
        });
    }
    debug!("sent {} bytes", written);

    if let Some(limit) = timeout {
        if !wait_readable(dev.as_raw_fd(), limit)? {
            return Err(PingError::ReplyTimeout(limit));
        }
    }

    let mut buf = vec![0u8; config::REPLY_BUF_SIZE];
    let limit = config::REPLY_BUF_SIZE - 1;
    let received = dev.read(&mut buf[..limit]).map_err(PingError::Read)?;
    buf.truncate(received);

    debug!("received {} bytes", received);
    Ok(buf)
}

/// Poll the fd for readability, returning false when the timeout elapses.
fn wait_readable(fd: RawFd, timeout: Duration) -> Result<bool, PingError> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

    let result = unsafe { libc::poll(&mut fds, 1, millis) };
    if result < 0 {
        return Err(PingError::Poll(io::Error::last_os_error()));
    }

    Ok(result > 0 && (fds.revents & libc::POLLIN) != 0)
}
