use super::mutate::{self, MutationSummary};
use crate::core::forcefield::table::ForceField;
use crate::core::models::bead::SecondaryStructure;
use crate::core::models::topology::Topology;
use crate::engine::config::{MutationConfig, Substitution};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

/// Fewest residues a chain needs for the two arms not to overlap.
pub const MIN_DESIGN_RESIDUES: usize = 8;

/// Prefix of every designed chemical name; the terminal aspartate.
const CHEMICAL_PREFIX: char = 'D';

/// Three arm residues `X Y Z` for a `DXYZ-OPV3-...D` molecule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    pub residues: [String; 3],
    /// `DXYZ-OPV3-ZYXD` when set, `DXYZ-OPV3-XYZD` otherwise.
    pub symmetric: bool,
    pub structure: SecondaryStructure,
}

impl DesignRequest {
    pub fn new(residues: [&str; 3], symmetric: bool) -> Self {
        Self {
            residues: residues.map(|name| name.to_uppercase()),
            symmetric,
            structure: SecondaryStructure::Coil,
        }
    }

    pub fn with_structure(mut self, structure: SecondaryStructure) -> Self {
        self.structure = structure;
        self
    }
}

/// Residue positions for the request on a chain of `residue_count` residues:
/// 2, 3, 4 on the first arm, and on the second arm either the mirror image
/// (N-1, N-2, N-3) or the same order (N-3, N-2, N-1).
pub fn plan(topology: &Topology, request: &DesignRequest) -> Result<Vec<Substitution>, EngineError> {
    let n = topology.residue_count();
    if n < MIN_DESIGN_RESIDUES {
        return Err(EngineError::ChainTooShort {
            required: MIN_DESIGN_RESIDUES,
            residue_count: n,
        });
    }

    let second_arm = if request.symmetric {
        [n - 1, n - 2, n - 3]
    } else {
        [n - 3, n - 2, n - 1]
    };
    let substitutions = [2, 3, 4]
        .into_iter()
        .zip(&request.residues)
        .chain(second_arm.into_iter().zip(&request.residues))
        .map(|(index, name)| Substitution::new(index, name, request.structure))
        .collect();
    Ok(substitutions)
}

/// `D` followed by the one-letter codes of the arm residues, e.g. `DFAG`.
/// Residues without a code contribute `X`.
pub fn chemical_name(request: &DesignRequest, forcefield: &ForceField) -> String {
    std::iter::once(CHEMICAL_PREFIX)
        .chain(
            request
                .residues
                .iter()
                .map(|name| forcefield.one_letter_code(name).unwrap_or('X')),
        )
        .collect()
}

/// Rewrites both arms of `topology` and renames its chemistry accordingly.
#[instrument(skip_all, name = "design_workflow", fields(residues = ?request.residues, symmetric = request.symmetric))]
pub fn run(
    topology: &mut Topology,
    request: &DesignRequest,
    forcefield: &ForceField,
    reporter: &ProgressReporter,
) -> Result<MutationSummary, EngineError> {
    let config = MutationConfig {
        substitutions: plan(topology, request)?,
        template_path: None,
        verify_each_step: true,
    };
    let summary = mutate::run(topology, &config, forcefield, reporter)?;

    topology.chemical_name = chemical_name(request, forcefield);
    info!(chemical_name = %topology.chemical_name, "Design complete.");
    Ok(summary)
}
