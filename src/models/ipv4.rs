//! IPv4 address and CIDR notation utilities.
//!
//! Converts between dotted-decimal text and `u32`, and between CIDR text and
//! the inclusive [`IpRange`] it covers. Everything here is stateless.

use super::range::IpRange;
use crate::error::RangeError;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse dotted-decimal text such as `192.168.0.10` into a `u32`.
///
/// Exactly four components are required, each made of decimal digits only
/// and no larger than 255. Whitespace, signs and empty components are
/// rejected.
///
/// # Examples
/// ```
/// use ip_range_checker::models::parse_address;
/// assert_eq!(parse_address("192.168.0.0").unwrap(), 3232235520);
/// assert!(parse_address("192.168.0").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<u32, RangeError> {
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != 4 {
        return Err(RangeError::address(
            text,
            format!("expected 4 octets, got {}", octets.len()),
        ));
    }
    octets.iter().try_fold(0u32, |acc, octet| {
        let value = parse_octet(text, octet)?;
        Ok((acc << 8) | u32::from(value))
    })
}

fn parse_octet(text: &str, octet: &str) -> Result<u8, RangeError> {
    if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::address(
            text,
            format!("octet '{octet}' is not a decimal number"),
        ));
    }
    octet
        .parse::<u8>()
        .map_err(|_| RangeError::address(text, format!("octet '{octet}' is out of range 0-255")))
}

/// Format a `u32` address as four dot-separated decimal octets.
pub fn format_address(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}

/// Parse CIDR text such as `10.0.0.0/8` into the inclusive range it covers.
///
/// Host bits of the address part are cleared, so `10.1.2.3/8` covers
/// `10.0.0.0 - 10.255.255.255`.
pub fn parse_cidr(text: &str) -> Result<IpRange, RangeError> {
    Ipv4::new(text)?.range()
}

fn parse_prefix_len(text: &str, len_part: &str) -> Result<u8, RangeError> {
    if len_part.is_empty() || !len_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::cidr(
            text,
            format!("prefix length '{len_part}' is not a decimal number"),
        ));
    }
    match len_part.parse::<u8>() {
        Ok(len) if len <= MAX_LENGTH => Ok(len),
        _ => Err(RangeError::cidr(
            text,
            format!("prefix length '{len_part}' is out of range 0-{MAX_LENGTH}"),
        )),
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ip_range_checker::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, RangeError> {
    if len > MAX_LENGTH {
        Err(RangeError::cidr(&format!("/{len}"), "Network length is too long"))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, RangeError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, RangeError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Smallest prefix length `ip` is aligned to as a network address.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros() as u8;
    assert!(trailing_zeros <= 32, "Trailing zeros exceed 32 bits");
    MAX_LENGTH - trailing_zeros
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// The address keeps its host bits until [`Ipv4::range`] cuts them.
    pub fn new(addr_cidr: &str) -> Result<Ipv4, RangeError> {
        let (addr_part, len_part) = addr_cidr
            .split_once('/')
            .ok_or_else(|| RangeError::cidr(addr_cidr, "missing '/' and prefix length"))?;
        if len_part.contains('/') {
            return Err(RangeError::cidr(addr_cidr, "more than one '/'"));
        }
        let addr =
            parse_address(addr_part).map_err(|e| RangeError::cidr(addr_cidr, e.to_string()))?;
        let mask = parse_prefix_len(addr_cidr, len_part)?;
        Ok(Ipv4 {
            addr: Ipv4Addr::from(addr),
            mask,
        })
    }

    /// Inclusive range from the network address to the broadcast address.
    pub fn range(&self) -> Result<IpRange, RangeError> {
        let lo = cut_addr(self.addr, self.mask)?;
        let hi = broadcast_addr(self.addr, self.mask)?;
        Ok(IpRange {
            start: u32::from(lo),
            end: u32::from(hi),
        })
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
