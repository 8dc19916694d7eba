use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::ops::{BitAnd, BitOr, BitXor};
use std::str::FromStr;

use crate::bits;


/// An IPv4 address, stored as its 32-bit value. The leftmost octet of the canonical string
/// representation is the most significant byte (i.e. `"1.2.3.4"` -> `0x01020304`).
///
/// The value is immutable once constructed; deriving a related address (e.g. the next one up)
/// produces a new value. The derived ordering is the unsigned ordering of the 32-bit value, so
/// `128.0.0.0` sorts after `127.255.255.255`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Address {
    addr_value: u32,
}

impl Ipv4Address {
    pub fn new(
        addr_value: u32,
    ) -> Ipv4Address {
        Ipv4Address {
            addr_value,
        }
    }

    /// Composes an address from its four octets, most significant first.
    pub fn from_octets(o0: u8, o1: u8, o2: u8, o3: u8) -> Ipv4Address {
        let addr_value =
            (u32::from(o0) << 24) |
            (u32::from(o1) << 16) |
            (u32::from(o2) <<  8) |
            u32::from(o3)
        ;
        Ipv4Address::new(addr_value)
    }

    pub fn value(&self) -> u32 { self.addr_value }

    /// Returns the four octets of this address, most significant first.
    pub fn octets(&self) -> [u8; 4] {
        self.addr_value.to_be_bytes()
    }

    /// Returns the octet at the given index, where index 0 is the first dotted segment (the most
    /// significant octet).
    pub fn octet(&self, index: usize) -> Result<u8, OctetIndexError> {
        if index > 3 {
            return Err(OctetIndexError { index });
        }
        Ok(self.octets()[index])
    }

    /// Returns this address with each bit negated.
    pub fn complement(&self) -> Ipv4Address {
        Ipv4Address::new(!self.addr_value)
    }

    /// Returns this address plus an offset, wrapping around at the top of the address space.
    pub fn wrapping_add(&self, offset: u32) -> Ipv4Address {
        Ipv4Address::new(self.addr_value.wrapping_add(offset))
    }

    /// Returns this address minus an offset, wrapping around at the bottom of the address space.
    pub fn wrapping_sub(&self, offset: u32) -> Ipv4Address {
        Ipv4Address::new(self.addr_value.wrapping_sub(offset))
    }

    /// Masks this address down to the network address of the subnet with the given CIDR suffix.
    ///
    /// A suffix of 0 yields `0.0.0.0`; the shift-by-32 case is handled explicitly instead of
    /// relying on the machine's shift-amount behavior.
    pub fn network_address(&self, suffix: u32) -> Result<Ipv4Address, SuffixRangeError> {
        if suffix > 32 {
            return Err(SuffixRangeError { suffix });
        }
        Ok(Ipv4Address::new(self.addr_value & bits::mask_from_prefix(suffix)))
    }

    /// Returns the classful address class (`'A'` through `'E'`) implied by the first octet.
    pub fn address_class(&self) -> char {
        let o0 = self.octets()[0];
        if o0 < 128 {
            'A'
        } else if o0 < 192 {
            'B'
        } else if o0 < 224 {
            'C'
        } else if o0 < 240 {
            'D'
        } else {
            'E'
        }
    }

    /// Whether this address lies in 127.0.0.0/8.
    pub fn is_loopback(&self) -> bool {
        crate::net::LOOPBACK_NET.contains(self)
    }

    /// Whether this address lies in 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16.
    pub fn is_private(&self) -> bool {
        crate::net::PRIVATE_NET_10.contains(self)
            || crate::net::PRIVATE_NET_172.contains(self)
            || crate::net::PRIVATE_NET_192.contains(self)
    }

    /// Whether this address lies in 169.254.0.0/16.
    pub fn is_link_local(&self) -> bool {
        crate::net::LINK_LOCAL_NET.contains(self)
    }
}

impl FromStr for Ipv4Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() != 4 {
            return Err(AddressParseError::IncorrectSegmentCount(segments.len(), 4));
        }

        let mut addr_value: u32 = 0;
        for i in 0..4 {
            let shift_count = 24 - (i*8);

            if segments[i].len() == 0 {
                return Err(AddressParseError::EmptySegment(i));
            }

            let segment_value: u32 = segments[i].parse()
                .map_err(|e| AddressParseError::SegmentParseError(i, String::from(segments[i]), e))?;
            if segment_value > 255 {
                return Err(AddressParseError::SegmentOutOfRange(i, segment_value, 0, 255));
            }

            addr_value |= segment_value << shift_count;
        }

        Ok(Ipv4Address::new(addr_value))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octets = self.octets();
        write!(f, "{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
    }
}

impl BitAnd for Ipv4Address {
    type Output = Ipv4Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value & rhs.addr_value)
    }
}

impl BitOr for Ipv4Address {
    type Output = Ipv4Address;

    fn bitor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value | rhs.addr_value)
    }
}

impl BitXor for Ipv4Address {
    type Output = Ipv4Address;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value ^ rhs.addr_value)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressParseError {
    IncorrectSegmentCount(usize, usize),
    EmptySegment(usize),
    SegmentParseError(usize, String, ParseIntError),
    SegmentOutOfRange(usize, u32, u32, u32),
}
impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressParseError::IncorrectSegmentCount(got, expected)
                => write!(f, "address has {} segment(s); expected {}", got, expected),
            AddressParseError::EmptySegment(segment_idx)
                => write!(f, "address segment with index {} is empty", segment_idx),
            AddressParseError::SegmentParseError(segment_idx, segment, error)
                => write!(f, "failed to parse address segment with index {} ({:?}): {}", segment_idx, segment, error),
            AddressParseError::SegmentOutOfRange(segment_idx, got, min, max)
                => write!(f, "address segment with index {} ({}) is out of range {} <= n <= {}", segment_idx, got, min, max),
        }
    }
}
impl Error for AddressParseError {
}

/// An octet index outside the range 0 through 3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OctetIndexError {
    pub index: usize,
}
impl fmt::Display for OctetIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "octet index {} is out of range 0 <= n <= 3", self.index)
    }
}
impl Error for OctetIndexError {
}

/// A CIDR suffix outside the range 0 through 32.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuffixRangeError {
    pub suffix: u32,
}
impl fmt::Display for SuffixRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CIDR suffix {} is out of range 0 <= n <= 32", self.suffix)
    }
}
impl Error for SuffixRangeError {
}
