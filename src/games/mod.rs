//! Game implementations.

pub mod ataxx;
