#![crate_name = "mendelian"]
//! Mendelian inheritance for small crosses: parents with a handful of
//! genes, offspring produced by simulated meiosis and mutation, and the
//! statistics used to check the offspring against Mendel's ratios.
//!
//! All randomness comes from a caller supplied `rand::Rng`, so a seeded
//! generator reproduces an experiment exactly.

pub mod prelude;

pub mod catalog;
pub mod chi_square;
pub mod chromosome;
pub mod error;
pub mod experiment;
pub mod index_of_association;
pub mod io;
pub mod matrix;
pub mod meiosis;
pub mod mutation;
pub mod phenotype;
pub mod punnett;
pub mod statistics;
