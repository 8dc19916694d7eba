//! IPv4 subnet arithmetic: address parsing and classification, subnet masks, and the values
//! derived from an (address, mask) pair such as broadcast address, host range and the adjacent
//! subnet. The computation core is pure and performs no I/O; the `quadcalc` binary wraps it in an
//! interactive prompt.

pub mod addr;
pub mod bits;
pub mod console;
pub mod net;
pub mod parse;
