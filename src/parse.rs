//! String parsing for addresses and subnet specifications.
//!
//! A subnet specification is `ADDRESS/MASK`, `ADDRESS/SUFFIX` or a bare `ADDRESS`. The part after
//! the first `/` is disambiguated by shape: a dotted quad is taken as an explicit subnet mask and
//! must be contiguous, anything else must be a decimal CIDR suffix in 0 through 32. A bare
//! address falls back to the legacy natural-subnet derivation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::{AddressParseError, Ipv4Address};
use crate::net::{Subnet, SubnetError};


static DOTTED_QUAD_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^[0-9]+(?:[.][0-9]+){3}$").unwrap()
);


/// Attempts to parse a single IPv4 address, ignoring surrounding whitespace.
pub fn parse_address(spec: &str) -> Result<Ipv4Address, AddressParseError> {
    spec.trim().parse()
}

/// Attempts to parse a subnet specification, ignoring surrounding whitespace.
pub fn parse_subnet(spec: &str) -> Result<Subnet, SubnetError> {
    let spec = spec.trim();
    match spec.split_once('/') {
        None => {
            let addr: Ipv4Address = spec.parse()
                .map_err(SubnetError::Address)?;
            Ok(Subnet::natural(addr))
        },
        Some((addr_spec, subnet_spec)) => {
            let addr: Ipv4Address = addr_spec.parse()
                .map_err(SubnetError::Address)?;
            if DOTTED_QUAD_REGEX.is_match(subnet_spec) {
                let mask: Ipv4Address = subnet_spec.parse()
                    .map_err(SubnetError::MaskSyntax)?;
                Subnet::with_mask(addr, mask)
            } else {
                let suffix: u32 = subnet_spec.parse()
                    .map_err(SubnetError::SuffixParse)?;
                Subnet::with_prefix(addr, suffix)
            }
        },
    }
}

/// Attempts to parse a subnet from an address token and a separately supplied mask-or-suffix
/// token, applying the same disambiguation as [`parse_subnet`].
pub fn parse_subnet_parts(addr_spec: &str, subnet_spec: &str) -> Result<Subnet, SubnetError> {
    parse_subnet(&format!("{}/{}", addr_spec.trim(), subnet_spec.trim()))
}
