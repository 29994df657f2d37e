//! Fixed-size subset enumeration.
//!
//! [`Combinations`] walks the C(n, k) index subsets of a pool lazily and in
//! lexicographic order; [`binomial`] sizes the search up front.

mod generator;

pub use generator::{binomial, subsets_of, Combinations};
