//! Hash collections using AHash.

pub use ahash::AHashSet as HashSet;
