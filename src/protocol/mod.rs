//! High-level components of the GMLAN protocol: constant lookup tables and the
//! CAN transport layer.
pub mod lookups;
pub mod transport;
