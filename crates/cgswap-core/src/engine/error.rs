use thiserror::Error;

use crate::core::models::interaction::InteractionError;
use crate::core::models::topology::IntegrityError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Residue {index} does not exist (topology has {residue_count} residues)")]
    InvalidResidue { index: usize, residue_count: usize },

    #[error("No residue template named '{name}'")]
    UnknownResidueTemplate { name: String },

    #[error("Cannot insert a residue at bead {number} (topology has {atom_count} beads)")]
    InvalidInsertionPoint { number: usize, atom_count: usize },

    #[error("Topology became inconsistent after editing residue {residue}: {source}")]
    Integrity {
        residue: usize,
        #[source]
        source: IntegrityError,
    },

    #[error(transparent)]
    Interaction(#[from] InteractionError),

    #[error("Design needs at least {required} residues but the topology has {residue_count}")]
    ChainTooShort {
        required: usize,
        residue_count: usize,
    },
}
