//! Defaults and fixed paths for the rpmsg diagnostic surface.
//!
//! Everything the kernel side pins down (control device, sysfs class tree,
//! attribute names) lives here as named constants so tests can override the
//! roots and the CLI can surface the defaults.

/// Service name announced by the co-processor firmware.
pub const DEFAULT_SERVICE: &str = "m4-pingpong";

/// Destination endpoint address on the co-processor.
pub const DEFAULT_DST_ADDR: u32 = 0x400;

/// Message sent when none is given on the command line.
pub const DEFAULT_MESSAGE: &str = "ping from linux";

/// Control device used to create endpoints.
pub const CTRL_DEVICE: &str = "/dev/rpmsg_ctrl0";

/// Sysfs class directory holding one subdirectory per rpmsg device.
pub const SYS_CLASS_DIR: &str = "/sys/class/rpmsg";

/// Directory where the kernel places the data device nodes.
pub const DEV_DIR: &str = "/dev";

/// Device-class prefix of rpmsg entries under the sysfs class directory.
pub const DEVICE_PREFIX: &str = "rpmsg";

/// Attribute file carrying a device's registered service name.
pub const NAME_ATTR: &str = "name";

/// Reply buffer size; one byte is reserved so at most 1023 bytes are read.
pub const REPLY_BUF_SIZE: usize = 1024;

/// Default budget for the device node to appear after endpoint creation.
pub const DEFAULT_WAIT_MS: u64 = 2000;

/// Parse an endpoint address with `strtoul(_, _, 0)` semantics.
///
/// `0x`/`0X` prefix selects hex, a leading `0` selects octal, anything else
/// decimal. The longest valid prefix of the digits is consumed; a string with
/// no valid digits yields 0, and overflow saturates.
pub fn parse_addr(input: &str) -> u32 {
    let s = input.trim();
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    let mut value: u64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        value = value
            .saturating_mul(u64::from(radix))
            .saturating_add(u64::from(d));
    }

    value.min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr_hex_and_decimal_agree() {
        assert_eq!(parse_addr("0x400"), 1024);
        assert_eq!(parse_addr("1024"), 1024);
        assert_eq!(parse_addr("0X10"), 16);
    }

    #[test]
    fn test_parse_addr_octal() {
        assert_eq!(parse_addr("0777"), 0o777);
        assert_eq!(parse_addr("0"), 0);
    }

    #[test]
    fn test_parse_addr_invalid_yields_zero() {
        assert_eq!(parse_addr("abc"), 0);
        assert_eq!(parse_addr(""), 0);
        assert_eq!(parse_addr("0x"), 0);
    }

    #[test]
    fn test_parse_addr_stops_at_first_invalid_digit() {
        assert_eq!(parse_addr("12junk"), 12);
        assert_eq!(parse_addr("0x4g"), 4);
    }

    #[test]
    fn test_parse_addr_overflow_saturates() {
        assert_eq!(parse_addr("0xffffffffff"), u32::MAX);
    }
}
