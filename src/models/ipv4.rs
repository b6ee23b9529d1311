//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 prefixes, along with the
//! block arithmetic used to carve a VPC range into subnets.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Errors raised by CIDR parsing and block arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("invalid CIDR format: {0}")]
    InvalidFormat(String),

    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("invalid subnet mask: {0}")]
    InvalidMask(String),

    #[error("network length /{0} is too long")]
    PrefixTooLong(u8),

    #[error("next subnet after {0} overflows the IPv4 address space")]
    Overflow(Ipv4),

    #[error("cannot split {0} into zero blocks")]
    ZeroBlocks(Ipv4),

    /// `prefix` is the prefix length the split would have needed.
    #[error("insufficient CIDR space: {cidr} cannot be split into {count} blocks (needs /{prefix})")]
    InsufficientSpace { cidr: Ipv4, count: usize, prefix: u32 },
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use aws_subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, CidrError> {
    if len > MAX_LENGTH {
        Err(CidrError::PrefixTooLong(len))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, CidrError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, CidrError> {
    let mask = get_cidr_mask(cidr)?;
    let subnet_size = 1u64 << (MAX_LENGTH - cidr);
    let network_bits = (u32::from(addr) & mask) as u64;
    let next_subnet_bits = network_bits + subnet_size;
    if next_subnet_bits > u32::MAX as u64 {
        return Err(CidrError::Overflow(Ipv4 { addr, mask: cidr }));
    }
    Ok(Ipv4Addr::from(next_subnet_bits as u32))
}

/// Calculate the next subnet after the given [`Ipv4`] subnet.
///
/// If `mask` is provided, the next subnet will use that mask size.
pub fn next_subnet_ipv4(ipv4: Ipv4, mask: Option<u8>) -> Result<Ipv4, CidrError> {
    let current_mask = ipv4.mask;
    let new_mask = mask.unwrap_or(current_mask);
    let next_subnet = if new_mask <= current_mask {
        // eq or larger subnet (smaller mask)
        ip_after_subnet(ipv4.addr, new_mask)?
    } else {
        // smaller subnet, start right after our broadcast
        let current_broadcast = broadcast_addr(ipv4.addr, current_mask)?;
        ip_after_subnet(current_broadcast, new_mask)?
    };
    Ok(Ipv4 {
        addr: next_subnet,
        mask: new_mask,
    })
}

/// Number of prefix bits needed to address `count` equal blocks.
///
/// The count is rounded up to the next power of two.
pub fn split_bits(count: usize) -> u32 {
    count.next_power_of_two().trailing_zeros()
}

/// IPv4 prefix in CIDR notation.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl FromStr for Ipv4 {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, CidrError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| CidrError::InvalidFormat(addr_cidr.to_string()))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| CidrError::InvalidAddress(addr.to_string()))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| CidrError::InvalidMask(mask.to_string()))?;
        if mask > MAX_LENGTH {
            return Err(CidrError::PrefixTooLong(mask));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// The same prefix with host bits cleared, e.g. 10.0.3.7/16 -> 10.0.0.0/16.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        let (lo, size) = self.bounds();
        Ipv4Addr::from((lo + size - 1) as u32)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.bounds().0 as u32)
    }

    fn bounds(&self) -> (u64, u64) {
        let mask = self.mask.min(MAX_LENGTH);
        let size = 1u64 << (MAX_LENGTH - mask);
        let lo = (u32::from(self.addr) as u64 / size) * size;
        (lo, size)
    }

    /// True when `other` lies completely inside this prefix.
    pub fn contains_cidr(&self, other: &Ipv4) -> bool {
        self.lo() <= other.lo() && other.hi() <= self.hi()
    }

    /// True when the two prefixes share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }

    /// Split this prefix into `count` equal blocks.
    ///
    /// The prefix length grows by `log2(count)` rounded up, and only the first
    /// `count` blocks in address order are returned. The trailing blocks of the
    /// power of two stay unallocated.
    pub fn split_into_subnets(&self, count: usize) -> Result<Vec<Ipv4>, CidrError> {
        if count == 0 {
            return Err(CidrError::ZeroBlocks(*self));
        }
        let prefix = self.mask as u32 + split_bits(count);
        if prefix > MAX_LENGTH as u32 {
            return Err(CidrError::InsufficientSpace {
                cidr: *self,
                count,
                prefix,
            });
        }

        let mut blocks = Vec::with_capacity(count);
        let mut current = Ipv4 {
            addr: self.lo(),
            mask: prefix as u8,
        };
        blocks.push(current);
        while blocks.len() < count {
            current = next_subnet_ipv4(current, None)?;
            blocks.push(current);
        }
        Ok(blocks)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
