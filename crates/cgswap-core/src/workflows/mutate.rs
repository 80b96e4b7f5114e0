use crate::core::forcefield::table::{ForceField, ForceFieldLoadError};
use crate::core::models::topology::Topology;
use crate::engine::config::{MutationConfig, Substitution};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::substitution::{InsertedResidue, res_swap};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct MutationSummary {
    /// One entry per applied substitution, in plan order.
    pub applied: Vec<(Substitution, InsertedResidue)>,
    pub atoms_before: usize,
    pub atoms_after: usize,
}

/// The built-in Martini 2.2 table, extended by the configured template file
/// if there is one.
pub fn load_forcefield(config: &MutationConfig) -> Result<ForceField, ForceFieldLoadError> {
    let forcefield = ForceField::martini22();
    match &config.template_path {
        Some(path) => forcefield.with_overrides(path),
        None => Ok(forcefield),
    }
}

/// Applies every substitution of `config` to `topology`, in order.
///
/// A swap keeps every residue index in place, so later entries of the plan
/// can use the indices of the input topology even when an earlier swap
/// changed a residue's size. On error the topology holds every edit made
/// before the failing substitution.
#[instrument(skip_all, name = "mutation_workflow")]
pub fn run(
    topology: &mut Topology,
    config: &MutationConfig,
    forcefield: &ForceField,
    reporter: &ProgressReporter,
) -> Result<MutationSummary, EngineError> {
    let atoms_before = topology.atom_count();
    info!(
        substitutions = config.substitutions.len(),
        beads = atoms_before,
        residues = topology.residue_count(),
        "Starting residue substitution."
    );

    reporter.report(Progress::PhaseStart {
        name: "Substitution",
    });
    reporter.report(Progress::TaskStart {
        total_steps: config.substitutions.len() as u64,
    });

    let mut applied = Vec::with_capacity(config.substitutions.len());
    for substitution in &config.substitutions {
        debug!(%substitution, "Applying substitution");
        let inserted = res_swap(
            topology,
            forcefield,
            &substitution.residue_name,
            substitution.structure,
            substitution.residue_index,
        )?;

        if config.verify_each_step {
            topology
                .verify()
                .map_err(|source| EngineError::Integrity {
                    residue: substitution.residue_index,
                    source,
                })?;
        }

        reporter.report(Progress::Substituted {
            residue_index: substitution.residue_index,
            residue_name: substitution.residue_name.clone(),
        });
        reporter.report(Progress::TaskIncrement);
        applied.push((substitution.clone(), inserted));
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let atoms_after = topology.atom_count();
    info!(
        applied = applied.len(),
        beads = atoms_after,
        "Residue substitution complete."
    );

    Ok(MutationSummary {
        applied,
        atoms_before,
        atoms_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bead::SecondaryStructure;
    use crate::engine::config::MutationConfigBuilder;
    use crate::test_fixtures::dfag_chain;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[test]
    fn applies_substitutions_in_order_and_reports_each() {
        let mut topology = dfag_chain();
        let config = MutationConfigBuilder::new()
            .add_substitution(Substitution::new(2, "ALA", SecondaryStructure::Coil))
            .add_substitution(Substitution::new(8, "ala", SecondaryStructure::Coil))
            .build()
            .unwrap();
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Substituted { residue_index, .. } = event {
                seen.lock().unwrap().push(residue_index);
            }
        }));

        let summary = run(&mut topology, &config, &ForceField::martini22(), &reporter).unwrap();
        drop(reporter);

        assert_eq!(summary.applied.len(), 2);
        assert_eq!(summary.atoms_before - summary.atoms_after, 6);
        assert_eq!(seen.into_inner().unwrap(), vec![2, 8]);
        assert_eq!(
            topology.sequence(),
            vec!["ASP", "ALA", "ALA", "GLY", "OPV", "GLY", "ALA", "ALA", "ASP"]
        );
    }

    #[test]
    fn stops_at_the_first_failing_substitution() {
        let mut topology = dfag_chain();
        let config = MutationConfigBuilder::new()
            .add_substitution(Substitution::new(2, "ALA", SecondaryStructure::Coil))
            .add_substitution(Substitution::new(3, "NOPE", SecondaryStructure::Coil))
            .add_substitution(Substitution::new(4, "ALA", SecondaryStructure::Coil))
            .build()
            .unwrap();

        let err = run(
            &mut topology,
            &config,
            &ForceField::martini22(),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::UnknownResidueTemplate { ref name } if name == "NOPE"));
        assert_eq!(topology.residue_name(2), Some("ALA"));
        assert_eq!(topology.residue_name(4), Some("GLY"));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut topology = dfag_chain();
        let config = MutationConfigBuilder::new()
            .add_substitution(Substitution::new(42, "ALA", SecondaryStructure::Coil))
            .build()
            .unwrap();
        let err = run(
            &mut topology,
            &config,
            &ForceField::martini22(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidResidue {
                index: 42,
                residue_count: 9
            }
        ));
    }

    #[test]
    fn load_forcefield_applies_configured_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("templates.toml");
        fs::write(
            &path,
            "[XXA]\ncode = \"X\"\nsidechain = [{ name = \"SC1\", type = \"P5\" }]\nbonds = [{ beads = [0, 1], length = 0.3, force-constant = 5000.0 }]\n",
        )
        .unwrap();
        let config = MutationConfigBuilder::new()
            .substitutions(vec![])
            .template_path(path)
            .build()
            .unwrap();

        let forcefield = load_forcefield(&config).unwrap();
        assert!(forcefield.has_template("XXA"));
        assert!(forcefield.has_template("PHE"));
    }
}
