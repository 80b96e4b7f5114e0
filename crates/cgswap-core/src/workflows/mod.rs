//! # Workflows Module
//!
//! High-level procedures that drive the substitution engine from start to
//! finish. Each workflow validates its input, applies the edits in order,
//! checks the topology after every step when asked to, and reports progress
//! through a [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! - **Mutation Workflow** ([`mutate`]) - Applies an ordered substitution plan.
//! - **Design Workflow** ([`design`]) - Rewrites both peptide arms of a
//!   `DXXX-OPV3-XXXD` molecule from three residue names.

pub mod design;
pub mod mutate;
