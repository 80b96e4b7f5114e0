//! # Engine Module
//!
//! This module implements the residue substitution engine: the stateful edits
//! that replace one residue of a coarse-grained topology by another while
//! keeping the bead numbering dense and every bonded term consistent.
//!
//! ## Overview
//!
//! A substitution is a removal followed by an insertion at the same place.
//! Removal drops the residue's beads and every interaction that touches them,
//! then closes the numbering gap. Insertion opens a gap, creates the new beads
//! from a force-field template and synthesizes the bonded terms that connect
//! them to the rest of the chain.
//!
//! ## Architecture
//!
//! - **Substitution** ([`substitution`]) - `remove_residue`, `insert_residue` and `res_swap`
//! - **Connectivity** ([`connectivity`]) - Martini backbone bonds, angles and dihedrals for a new residue
//! - **Configuration** ([`config`]) - Substitution plans and the mutation configuration builder
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub(crate) mod connectivity;
pub mod config;
pub mod error;
pub mod progress;
pub mod substitution;
