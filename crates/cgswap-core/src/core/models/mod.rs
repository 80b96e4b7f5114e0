//! # Core Models Module
//!
//! Data structures representing a single coarse-grained molecule: its beads,
//! the bonded interactions between them, and the molecule-level metadata.
//!
//! ## Overview
//!
//! Beads live in a [`slotmap`] store owned by the [`topology::Topology`] and are
//! referenced everywhere else through [`ids::BeadId`] handles. Interactions hold
//! handles, never serial numbers, so renumbering beads after an edit never
//! invalidates a reference. Serial numbers are a derived, always dense labelling
//! used for lookup and for the written files.
//!
//! ## Key Components
//!
//! - [`bead`] - A single particle and its secondary-structure code
//! - [`interaction`] - Bonds, constraints, angles and dihedrals, and their ordered collection
//! - [`topology`] - The aggregate root and its consistency check
//! - [`builder`] - Serial-keyed construction used by the file readers
//! - [`ids`] - Handle types
//!
//! ## Usage
//!
//! ```ignore
//! use cgswap::core::models::{bead::Bead, interaction::Interaction, topology::Topology};
//!
//! let mut topology = Topology::new();
//! let a = topology.push_bead(Bead::new(1, "GLY", "BB", 0, origin, zero, "P5"));
//! let b = topology.push_bead(Bead::new(2, "ALA", "BB", 0, origin, zero, "P4"));
//! topology.add_interaction(Interaction::bond(a, b, params));
//! topology.verify()?;
//! ```

pub mod bead;
pub mod builder;
pub mod ids;
pub mod interaction;
pub mod topology;
