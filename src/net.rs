use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

use once_cell::sync::Lazy;

use crate::addr::{AddressParseError, Ipv4Address};
use crate::bits;


/// Loopback range 127.0.0.0/8.
pub static LOOPBACK_NET: Lazy<Subnet> = Lazy::new(||
    Subnet::with_prefix(Ipv4Address::from_octets(127, 0, 0, 0), 8).expect("reserved range")
);
/// Private range 10.0.0.0/8.
pub static PRIVATE_NET_10: Lazy<Subnet> = Lazy::new(||
    Subnet::with_prefix(Ipv4Address::from_octets(10, 0, 0, 0), 8).expect("reserved range")
);
/// Private range 172.16.0.0/12.
pub static PRIVATE_NET_172: Lazy<Subnet> = Lazy::new(||
    Subnet::with_prefix(Ipv4Address::from_octets(172, 16, 0, 0), 12).expect("reserved range")
);
/// Private range 192.168.0.0/16.
pub static PRIVATE_NET_192: Lazy<Subnet> = Lazy::new(||
    Subnet::with_prefix(Ipv4Address::from_octets(192, 168, 0, 0), 16).expect("reserved range")
);
/// Link-local range 169.254.0.0/16.
pub static LINK_LOCAL_NET: Lazy<Subnet> = Lazy::new(||
    Subnet::with_prefix(Ipv4Address::from_octets(169, 254, 0, 0), 16).expect("reserved range")
);


/// An IPv4 network: a base address and a contiguous subnet mask.
///
/// The base address is always canonical, i.e. already ANDed with the mask; host bits of the
/// address a subnet was constructed from are discarded at construction time. Subnets order by
/// base address (unsigned), then by mask.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Subnet {
    base_addr: Ipv4Address,
    subnet_mask: Ipv4Address,
}

impl Subnet {
    /// Constructs a subnet from an address and an explicit subnet mask. The mask must be a
    /// contiguous prefix mask.
    pub fn with_mask(
        addr: Ipv4Address,
        subnet_mask: Ipv4Address,
    ) -> Result<Subnet, SubnetError> {
        if !bits::is_prefix_mask(subnet_mask.value()) {
            return Err(SubnetError::NoncontiguousMask(subnet_mask));
        }
        Ok(Subnet {
            base_addr: addr & subnet_mask,
            subnet_mask,
        })
    }

    /// Constructs a subnet from an address and a CIDR prefix length in 0 through 32.
    pub fn with_prefix(
        addr: Ipv4Address,
        prefix: u32,
    ) -> Result<Subnet, SubnetError> {
        if prefix > 32 {
            return Err(SubnetError::SuffixRange(prefix, 32));
        }
        let subnet_mask = Ipv4Address::new(bits::mask_from_prefix(prefix));
        Ok(Subnet {
            base_addr: addr & subnet_mask,
            subnet_mask,
        })
    }

    /// Derives the subnet implied by a host address alone, from the run of zero-valued trailing
    /// octets: one trailing zero octet widens the mask by one octet, starting from /24 for a host
    /// with none. An address whose last three octets are all zero maps to the /0 mask.
    ///
    /// This is pre-CIDR legacy behavior, kept for callers that supply no mask at all.
    pub fn natural(addr: Ipv4Address) -> Subnet {
        let octets = addr.octets();
        let mut trailing_zero_octets = 0;
        while trailing_zero_octets < 3 && octets[3 - trailing_zero_octets] == 0 {
            trailing_zero_octets += 1;
        }
        let prefix = 32 - 8 * (trailing_zero_octets as u32 + 1);

        let subnet_mask = Ipv4Address::new(bits::mask_from_prefix(prefix));
        Subnet {
            base_addr: addr & subnet_mask,
            subnet_mask,
        }
    }

    pub fn base_addr(&self) -> Ipv4Address { self.base_addr }
    pub fn subnet_mask(&self) -> Ipv4Address { self.subnet_mask }

    /// The number of leading 1 bits in the subnet mask.
    pub fn prefix_len(&self) -> u32 {
        bits::prefix_length(self.subnet_mask.value())
    }

    /// The highest address of the subnet: base address with all host bits set.
    pub fn broadcast_addr(&self) -> Ipv4Address {
        self.base_addr | self.subnet_mask.complement()
    }

    /// The host count as the 32-bit two's-complement value of (inverted mask) - 1.
    ///
    /// This yields 254 for a /24 but 0 for a /31, -1 for a /32 and -2 for a /0; the underflow at
    /// the short suffixes is long-standing observable behavior and is kept as-is rather than
    /// clamped.
    pub fn host_count(&self) -> i32 {
        (self.subnet_mask.complement().value() as i32).wrapping_sub(1)
    }

    /// The first usable host address: base address plus one, wrapping.
    pub fn first_host_addr(&self) -> Ipv4Address {
        self.base_addr.wrapping_add(1)
    }

    /// The last usable host address: broadcast address minus one, wrapping.
    pub fn last_host_addr(&self) -> Ipv4Address {
        self.broadcast_addr().wrapping_sub(1)
    }

    /// The adjacent subnet of the same size immediately above this one.
    pub fn next_subnet(&self) -> Subnet {
        Subnet {
            base_addr: self.broadcast_addr().wrapping_add(1) & self.subnet_mask,
            subnet_mask: self.subnet_mask,
        }
    }

    /// Whether the address lies within this subnet.
    pub fn contains(&self, addr: &Ipv4Address) -> bool {
        (*addr & self.subnet_mask) == self.base_addr
    }

    /// Whether this subnet lies entirely within a single private range: base and broadcast
    /// address must both fall into the same one of 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16.
    pub fn is_private_subnet(&self) -> bool {
        let broadcast = self.broadcast_addr();
        (PRIVATE_NET_10.contains(&self.base_addr) && PRIVATE_NET_10.contains(&broadcast))
            || (PRIVATE_NET_172.contains(&self.base_addr) && PRIVATE_NET_172.contains(&broadcast))
            || (PRIVATE_NET_192.contains(&self.base_addr) && PRIVATE_NET_192.contains(&broadcast))
    }

    /// Returns an iterator over every address of the subnet, base through broadcast, in ascending
    /// order. Each call builds a fresh iterator.
    ///
    /// A /0 network would enumerate the entire address space and is rejected instead.
    pub fn addresses(&self) -> Result<Addresses, SubnetError> {
        if self.prefix_len() == 0 {
            return Err(SubnetError::NetworkTooLarge(*self));
        }
        Ok(Addresses {
            next_value: Some(self.base_addr.value()),
            last_value: self.broadcast_addr().value(),
        })
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr, self.prefix_len())
    }
}

/// Iterator over all addresses of a subnet, in ascending order.
pub struct Addresses {
    next_value: Option<u32>,
    last_value: u32,
}
impl Iterator for Addresses {
    type Item = Ipv4Address;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next_value?;
        self.next_value = if current == self.last_value {
            None
        } else {
            Some(current + 1)
        };
        Some(Ipv4Address::new(current))
    }
}

/// An error that occurs when constructing or parsing a subnet, or when enumerating one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubnetError {
    /// The address part could not be parsed.
    Address(AddressParseError),

    /// The mask part looked like a dotted quad but could not be parsed as one.
    MaskSyntax(AddressParseError),

    /// The mask parsed as an address but is not a contiguous prefix mask. The contained address
    /// is the offending mask.
    NoncontiguousMask(Ipv4Address),

    /// The suffix part is neither a dotted-quad mask nor a decimal number.
    SuffixParse(ParseIntError),

    /// The suffix is a number but lies outside the valid range. The first value is the suffix
    /// that was given and the second value is the maximum.
    SuffixRange(u32, u32),

    /// Enumerating the addresses of the contained subnet was rejected as unbounded.
    NetworkTooLarge(Subnet),
}
impl fmt::Display for SubnetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetError::Address(e)
                => write!(f, "failed to parse address: {}", e),
            SubnetError::MaskSyntax(e)
                => write!(f, "failed to parse subnet mask: {}", e),
            SubnetError::NoncontiguousMask(mask)
                => write!(f, "subnet mask {} is not a contiguous prefix mask", mask),
            SubnetError::SuffixParse(e)
                => write!(f, "failed to parse CIDR suffix: {}", e),
            SubnetError::SuffixRange(got, max)
                => write!(f, "CIDR suffix {} is greater than the maximum ({})", got, max),
            SubnetError::NetworkTooLarge(net)
                => write!(f, "network {} is too large to enumerate", net),
        }
    }
}
impl Error for SubnetError {
}

#[cfg(test)]
mod test {
    use super::*;

    fn addr(s: &str) -> Ipv4Address {
        s.parse().unwrap()
    }

    fn net(addr_str: &str, prefix: u32) -> Subnet {
        Subnet::with_prefix(addr(addr_str), prefix).unwrap()
    }

    #[test]
    fn test_canonicalization() {
        let subnet = net("192.168.1.10", 24);
        assert_eq!(addr("192.168.1.0"), subnet.base_addr());
        assert_eq!(addr("255.255.255.0"), subnet.subnet_mask());
        assert_eq!(24, subnet.prefix_len());

        // a subnet constructed from its own base address is the same subnet
        assert_eq!(subnet, net("192.168.1.0", 24));
    }

    #[test]
    fn test_with_mask() {
        let subnet = Subnet::with_mask(addr("10.1.2.3"), addr("255.255.0.0")).unwrap();
        assert_eq!(addr("10.1.0.0"), subnet.base_addr());
        assert_eq!(16, subnet.prefix_len());

        assert_eq!(
            Err(SubnetError::NoncontiguousMask(addr("255.0.255.0"))),
            Subnet::with_mask(addr("10.1.2.3"), addr("255.0.255.0")),
        );
        // degenerate masks are fine
        assert_eq!(0, Subnet::with_mask(addr("10.1.2.3"), addr("0.0.0.0")).unwrap().prefix_len());
        assert_eq!(32, Subnet::with_mask(addr("10.1.2.3"), addr("255.255.255.255")).unwrap().prefix_len());
    }

    #[test]
    fn test_with_prefix_range() {
        assert_eq!(Err(SubnetError::SuffixRange(33, 32)), Subnet::with_prefix(addr("1.2.3.4"), 33));
        assert!(Subnet::with_prefix(addr("1.2.3.4"), 0).is_ok());
        assert!(Subnet::with_prefix(addr("1.2.3.4"), 32).is_ok());
    }

    #[test]
    fn test_derived_values() {
        // 192.168.1.10/24
        let subnet = net("192.168.1.10", 24);
        assert_eq!(addr("192.168.1.0"), subnet.base_addr());
        assert_eq!(addr("255.255.255.0"), subnet.subnet_mask());
        assert_eq!(addr("192.168.1.255"), subnet.broadcast_addr());
        assert_eq!(254, subnet.host_count());
        assert_eq!(addr("192.168.1.1"), subnet.first_host_addr());
        assert_eq!(addr("192.168.1.254"), subnet.last_host_addr());
        assert!(subnet.is_private_subnet());
        assert_eq!(net("192.168.2.0", 24), subnet.next_subnet());
    }

    #[test]
    fn test_host_count_edge_suffixes() {
        // the (inverted mask) - 1 underflow at short suffixes is kept verbatim
        assert_eq!(254, net("10.0.0.0", 24).host_count());
        assert_eq!(0, net("10.0.0.0", 31).host_count());
        assert_eq!(-1, net("10.0.0.0", 32).host_count());
        assert_eq!(-2, net("10.0.0.0", 0).host_count());
    }

    #[test]
    fn test_host_network() {
        // 8.8.8.8/32
        let subnet = net("8.8.8.8", 32);
        assert_eq!(addr("8.8.8.8"), subnet.base_addr());
        assert_eq!(addr("8.8.8.8"), subnet.broadcast_addr());
        assert_eq!(-1, subnet.host_count());
        assert!(subnet.contains(&addr("8.8.8.8")));
        assert!(!subnet.contains(&addr("8.8.8.9")));
    }

    #[test]
    fn test_next_subnet() {
        assert_eq!(net("10.0.1.0", 24), net("10.0.0.0", 24).next_subnet());
        assert_eq!(net("10.0.0.128", 25), net("10.0.0.0", 25).next_subnet());
        assert_eq!(net("11.0.0.0", 8), net("10.0.0.0", 8).next_subnet());
        // the very top of the address space wraps around to the bottom
        assert_eq!(net("0.0.0.0", 24), net("255.255.255.0", 24).next_subnet());
    }

    #[test]
    fn test_contains() {
        let subnet = net("192.168.1.0", 24);
        assert!(subnet.contains(&addr("192.168.1.0")));
        assert!(subnet.contains(&addr("192.168.1.1")));
        assert!(subnet.contains(&addr("192.168.1.255")));
        assert!(!subnet.contains(&addr("192.168.2.0")));
        assert!(!subnet.contains(&addr("192.168.0.255")));
    }

    #[test]
    fn test_is_private_subnet() {
        assert!(net("192.168.1.0", 24).is_private_subnet());
        assert!(net("10.1.2.3", 16).is_private_subnet());
        assert!(net("172.31.255.0", 24).is_private_subnet());
        assert!(net("10.0.0.0", 8).is_private_subnet());

        assert!(!net("8.8.8.0", 24).is_private_subnet());
        assert!(!net("172.32.0.0", 24).is_private_subnet());
        // broadcast spills out of 192.168.0.0/16
        assert!(!net("192.168.0.0", 15).is_private_subnet());
        // broadcast spills into 11.0.0.0/8
        assert!(!net("10.0.0.0", 7).is_private_subnet());
        assert!(!net("0.0.0.0", 0).is_private_subnet());
    }

    #[test]
    fn test_natural_subnet() {
        assert_eq!(net("1.2.3.4", 24), Subnet::natural(addr("1.2.3.4")));
        assert_eq!(net("1.2.3.0", 16), Subnet::natural(addr("1.2.3.0")));
        assert_eq!(net("1.2.0.0", 8), Subnet::natural(addr("1.2.0.0")));
        assert_eq!(net("1.0.0.0", 0), Subnet::natural(addr("1.0.0.0")));
        assert_eq!(net("0.0.0.0", 0), Subnet::natural(addr("0.0.0.0")));
        // only the trailing zero run counts
        assert_eq!(net("1.0.3.4", 24), Subnet::natural(addr("1.0.3.4")));
    }

    #[test]
    fn test_addresses() {
        let collected: Vec<Ipv4Address> = net("192.0.2.64", 29).addresses().unwrap().collect();
        let expected: Vec<Ipv4Address> = [
            "192.0.2.64", "192.0.2.65", "192.0.2.66", "192.0.2.67",
            "192.0.2.68", "192.0.2.69", "192.0.2.70", "192.0.2.71",
        ].iter().map(|s| addr(s)).collect();
        assert_eq!(expected, collected);

        // every enumerated address is contained, the neighbors are not
        let subnet = net("192.0.2.64", 29);
        for a in subnet.addresses().unwrap() {
            assert!(subnet.contains(&a));
        }
        assert!(!subnet.contains(&addr("192.0.2.63")));
        assert!(!subnet.contains(&addr("192.0.2.72")));
    }

    #[test]
    fn test_addresses_counts() {
        assert_eq!(1, net("8.8.8.8", 32).addresses().unwrap().count());
        assert_eq!(2, net("8.8.8.8", 31).addresses().unwrap().count());
        assert_eq!(256, net("8.8.8.0", 24).addresses().unwrap().count());
    }

    #[test]
    fn test_addresses_restartable() {
        let subnet = net("10.0.0.0", 30);
        let first: Vec<Ipv4Address> = subnet.addresses().unwrap().collect();
        let second: Vec<Ipv4Address> = subnet.addresses().unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_addresses_top_of_address_space() {
        let collected: Vec<Ipv4Address> = net("255.255.255.252", 30).addresses().unwrap().collect();
        assert_eq!(4, collected.len());
        assert_eq!(addr("255.255.255.255"), collected[3]);
    }

    #[test]
    fn test_addresses_too_large() {
        let subnet = net("0.0.0.0", 0);
        assert!(matches!(subnet.addresses(), Err(SubnetError::NetworkTooLarge(s)) if s == subnet));
    }

    #[test]
    fn test_ordering_and_equality() {
        assert!(net("10.0.0.0", 24) < net("10.0.1.0", 24));
        assert!(net("127.255.255.255", 32) < net("128.0.0.0", 32));
        assert_ne!(net("10.0.0.0", 24), net("10.0.0.0", 25));
        assert_eq!(net("10.0.0.0", 24), net("10.0.0.99", 24));
    }

    #[test]
    fn test_display() {
        assert_eq!("192.168.1.0/24", net("192.168.1.10", 24).to_string());
        assert_eq!("0.0.0.0/0", net("0.0.0.0", 0).to_string());
        assert_eq!("8.8.8.8/32", net("8.8.8.8", 32).to_string());
    }

    #[test]
    fn test_reserved_constants() {
        assert_eq!("127.0.0.0/8", LOOPBACK_NET.to_string());
        assert_eq!("10.0.0.0/8", PRIVATE_NET_10.to_string());
        assert_eq!("172.16.0.0/12", PRIVATE_NET_172.to_string());
        assert_eq!("192.168.0.0/16", PRIVATE_NET_192.to_string());
        assert_eq!("169.254.0.0/16", LINK_LOCAL_NET.to_string());
    }
}
