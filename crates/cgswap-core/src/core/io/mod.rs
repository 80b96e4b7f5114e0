//! Provides input/output functionality for the GROMACS file formats a
//! coarse-grained molecule is described by.
//!
//! A molecule is read from a coordinate file (`.gro`) and a molecule topology
//! (`.itp`), and written back as a complete output set that also includes a
//! system topology (`.top`). Files written by this module load back into an
//! identical [`Topology`](crate::core::models::topology::Topology), so the
//! round trip is byte-stable.

pub mod gro;
pub mod itp;
pub mod loader;
pub mod top;
pub mod traits;
pub mod writer;
