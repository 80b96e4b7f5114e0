//! # cgswap Core Library
//!
//! Residue substitution for coarse-grained Martini topologies of
//! `DXXX-OPV3-XXXD` peptide amphiphiles: load a molecule from GROMACS
//! coordinate and topology files, replace residues in place, and write a
//! consistent, simulation-ready output set.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Topology`, `Bead`,
//!   `Interaction`), the Martini 2.2 force-field table, and the `.gro`/`.itp`/`.top`
//!   readers and writers.
//!
//! - **[`engine`]: The Logic Core.** The residue substitution engine: removal with
//!   renumbering, template-driven insertion, and backbone connectivity synthesis.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that apply a
//!   substitution plan or design both peptide arms from three residue names.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_fixtures;
