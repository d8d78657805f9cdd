//! Generic structures and algorithms, independent of the protocol.

pub mod index_heap;
pub mod luby;
pub mod random;
