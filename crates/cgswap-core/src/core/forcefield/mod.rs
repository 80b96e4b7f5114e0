//! # Force Field Module
//!
//! The static parameter source consulted when a residue is inserted: per-residue
//! bead templates, the secondary-structure dependent backbone rules, and the
//! placement geometry for new beads.
//!
//! ## Overview
//!
//! The built-in table follows Martini 2.2. Backbone parameters are selected by
//! the DSSP-style secondary structure code of the residues involved; side-chain
//! terms are fixed per residue and addressed by residue-local bead index, with
//! index 0 standing for the residue's own backbone bead.
//!
//! ## Key Components
//!
//! - [`table`] - [`table::ForceField`], template lookup and TOML overrides
//! - [`template`] - Template record types
//! - [`backbone`] - Backbone bead types, bonds, angles and dihedrals
//! - [`geometry`] - Initial positions for inserted beads
//!
//! ## Usage
//!
//! ```ignore
//! use cgswap::core::forcefield::table::ForceField;
//!
//! let ff = ForceField::martini22().with_overrides(Path::new("extra.toml"))?;
//! let phe = ff.template("PHE", SecondaryStructure::Coil).unwrap();
//! assert_eq!(phe.beads[0].name, "BB");
//! ```

pub mod backbone;
pub mod geometry;
mod martini;
pub mod table;
pub mod template;
