//! # rpmsg-ping
//!
//! Single-shot diagnostic tool for the Linux rpmsg character-device
//! interface. Creates an endpoint bound to a co-processor address, waits for
//! the matching `/dev/rpmsgN` node to appear, sends one message and prints
//! the single reply.

mod config;
mod endpoint;
mod error;
mod exchange;
mod lookup;
mod wait;

use anyhow::Result;
use clap::Parser;
use error::PingError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// rpmsg-ping - one request/reply exchange with a co-processor
#[derive(Parser, Debug)]
#[command(name = "rpmsg-ping", version, about)]
struct Args {
    /// Service name registered by the co-processor
    #[arg(default_value = config::DEFAULT_SERVICE)]
    service: String,

    /// Destination endpoint address, decimal or 0x-prefixed hex
    #[arg(value_parser = addr_value, default_value_t = config::DEFAULT_DST_ADDR)]
    dst: u32,

    /// Message to send
    #[arg(default_value = config::DEFAULT_MESSAGE)]
    message: String,

    /// Control device used to create the endpoint
    #[arg(long, default_value = config::CTRL_DEVICE)]
    ctrl: PathBuf,

    /// Sysfs class directory scanned for rpmsg devices
    #[arg(long, default_value = config::SYS_CLASS_DIR)]
    sys_dir: PathBuf,

    /// Directory holding the data device nodes
    #[arg(long, default_value = config::DEV_DIR)]
    dev_dir: PathBuf,

    /// Budget in milliseconds for the device node to appear
    #[arg(long, default_value_t = config::DEFAULT_WAIT_MS)]
    wait_ms: u64,

    /// Reply timeout in seconds; blocks forever when omitted
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn addr_value(s: &str) -> Result<u32, std::convert::Infallible> {
    Ok(config::parse_addr(s))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    debug!(
        "creating endpoint '{}' -> dst {:#x} via {}",
        args.service,
        args.dst,
        args.ctrl.display()
    );
    endpoint::create_endpoint(&args.ctrl, &args.service, args.dst)?;

    // The data node appears some time after the ioctl returns.
    let policy = wait::Backoff::with_budget(Duration::from_millis(args.wait_ms));
    let dev_path = wait::wait_for(
        || lookup::find_device(&args.sys_dir, &args.dev_dir, &args.service),
        &policy,
    )
    .ok_or_else(|| PingError::DeviceNotFound(args.service.clone()))?;

    println!("Using endpoint: {}", dev_path.display());

    let mut dev = exchange::open_device(&dev_path)?;
    let reply = exchange::exchange(
        &mut dev,
        args.message.as_bytes(),
        args.timeout.map(Duration::from_secs),
    )?;

    println!("Sent: '{}'", args.message);
    println!("Reply: '{}'", String::from_utf8_lossy(&reply));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_arguments_default() {
        let args = Args::try_parse_from(["rpmsg-ping"]).unwrap();

        assert_eq!(args.service, config::DEFAULT_SERVICE);
        assert_eq!(args.dst, config::DEFAULT_DST_ADDR);
        assert_eq!(args.message, config::DEFAULT_MESSAGE);
        assert_eq!(args.ctrl, PathBuf::from(config::CTRL_DEVICE));
        assert_eq!(args.sys_dir, PathBuf::from(config::SYS_CLASS_DIR));
        assert_eq!(args.wait_ms, config::DEFAULT_WAIT_MS);
        assert_eq!(args.timeout, None);
    }

    #[test]
    fn test_trailing_arguments_default() {
        let args = Args::try_parse_from(["rpmsg-ping", "my-svc"]).unwrap();
        assert_eq!(args.service, "my-svc");
        assert_eq!(args.dst, config::DEFAULT_DST_ADDR);
        assert_eq!(args.message, config::DEFAULT_MESSAGE);

        let args = Args::try_parse_from(["rpmsg-ping", "my-svc", "0x200"]).unwrap();
        assert_eq!(args.dst, 0x200);
        assert_eq!(args.message, config::DEFAULT_MESSAGE);
    }

    #[test]
    fn test_all_arguments_given() {
        let args =
            Args::try_parse_from(["rpmsg-ping", "my-svc", "1024", "hello world"]).unwrap();

        assert_eq!(args.service, "my-svc");
        assert_eq!(args.dst, 1024);
        assert_eq!(args.message, "hello world");
    }

    #[test]
    fn test_invalid_address_parses_to_zero() {
        let args = Args::try_parse_from(["rpmsg-ping", "svc", "garbage"]).unwrap();
        assert_eq!(args.dst, 0);
    }
}
