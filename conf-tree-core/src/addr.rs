use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors raised while normalizing an interface address to CIDR form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddrError {
    /// Not a valid dotted-decimal IPv4 address.
    #[error("invalid IPv4 address `{0}`")]
    Address(String),
    /// Not a valid contiguous network mask.
    #[error("invalid network mask `{0}`")]
    Mask(String),
    /// Prefix length out of the 0..=32 range.
    #[error("invalid prefix length `{0}`")]
    Prefix(String),
    /// Neither `addr mask` nor `addr/prefix` form.
    #[error("unrecognized address form `{0}`")]
    Form(String),
}

/// Normalize an interface address to canonical `a.b.c.d/N` form.
///
/// Accepts both `"192.168.0.3 255.255.255.0"` (dotted mask) and
/// `"192.168.0.3/24"` (already slashed). Dotted masks must be contiguous
/// high bits; the prefix length is the count of set bits.
pub fn normalize_cidr(value: &str) -> Result<String, AddrError> {
    let value = value.trim();

    if let Some((addr, prefix)) = value.split_once('/') {
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| AddrError::Address(addr.to_string()))?;
        let prefix: u8 = prefix
            .parse()
            .ok()
            .filter(|p| *p <= 32)
            .ok_or_else(|| AddrError::Prefix(prefix.to_string()))?;
        return Ok(format!("{addr}/{prefix}"));
    }

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(addr), Some(mask), None) => {
            let addr: Ipv4Addr = addr
                .parse()
                .map_err(|_| AddrError::Address(addr.to_string()))?;
            let prefix = mask_to_prefix(mask)?;
            Ok(format!("{addr}/{prefix}"))
        }
        _ => Err(AddrError::Form(value.to_string())),
    }
}

fn mask_to_prefix(mask: &str) -> Result<u8, AddrError> {
    let parsed: Ipv4Addr = mask
        .parse()
        .map_err(|_| AddrError::Mask(mask.to_string()))?;
    let bits = u32::from(parsed);
    let prefix = bits.count_ones();
    // contiguous high bits only: 255.0.255.0 is not a network mask
    if bits != high_bits(prefix) {
        return Err(AddrError::Mask(mask.to_string()));
    }
    Ok(prefix as u8)
}

fn high_bits(count: u32) -> u32 {
    if count == 0 {
        0
    } else {
        u32::MAX << (32 - count)
    }
}
