//! # Core Module
//!
//! The stateless foundation of cgswap: how a coarse-grained molecule is
//! represented, where its force-field parameters come from, and how it is
//! read from and written to disk.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Beads, bonded interactions and the `Topology` aggregate
//! - **Force Field** ([`forcefield`]) - Martini 2.2 residue templates, backbone rules and bead placement
//! - **File I/O** ([`io`]) - GROMACS `.gro`, `.itp` and `.top` formats
//!
//! Every edit keeps bead numbers dense (`1..=N` in order) and every interaction
//! pointing at beads that still exist; [`Topology::verify`](models::topology::Topology::verify)
//! checks both.

pub mod forcefield;
pub mod io;
pub mod models;
