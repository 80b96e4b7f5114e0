use crate::core::models::bead::SecondaryStructure;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid entry on row {row} of '{path}': {reason}")]
    InvalidRow {
        path: String,
        row: usize,
        reason: String,
    },
}

/// Replace residue `residue_index` with a fresh `residue_name` residue in
/// secondary structure `structure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub residue_index: usize,
    pub residue_name: String,
    pub structure: SecondaryStructure,
}

impl Substitution {
    pub fn new(residue_index: usize, residue_name: &str, structure: SecondaryStructure) -> Self {
        Self {
            residue_index,
            residue_name: residue_name.to_uppercase(),
            structure,
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.residue_index, self.residue_name, self.structure
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PlanRow {
    residue_index: usize,
    residue_name: String,
    #[serde(default)]
    structure: Option<String>,
}

/// Reads an ordered substitution plan from a CSV file with the header
/// `residue-index,residue-name,structure`. The structure column may be left
/// empty for coil.
pub fn read_plan(path: &Path) -> Result<Vec<Substitution>, PlanError> {
    let display = path.to_string_lossy().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| PlanError::Csv {
            path: display.clone(),
            source: e,
        })?;

    let mut plan = Vec::new();
    for (i, result) in reader.deserialize::<PlanRow>().enumerate() {
        let row = result.map_err(|e| PlanError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let structure = match row.structure.as_deref() {
            None | Some("") => SecondaryStructure::default(),
            Some(code) => code.parse().map_err(|e| PlanError::InvalidRow {
                path: display.clone(),
                row: i + 1,
                reason: format!("{e}"),
            })?,
        };
        if row.residue_index == 0 {
            return Err(PlanError::InvalidRow {
                path: display,
                row: i + 1,
                reason: "residue indices start at 1".into(),
            });
        }
        plan.push(Substitution::new(row.residue_index, &row.residue_name, structure));
    }
    Ok(plan)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationConfig {
    /// Applied in order; later entries see the renumbering of earlier ones.
    pub substitutions: Vec<Substitution>,
    pub template_path: Option<PathBuf>,
    /// Run the topology consistency check after every substitution.
    pub verify_each_step: bool,
}

#[derive(Default)]
pub struct MutationConfigBuilder {
    substitutions: Option<Vec<Substitution>>,
    template_path: Option<PathBuf>,
    verify_each_step: Option<bool>,
}

impl MutationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn substitutions(mut self, substitutions: Vec<Substitution>) -> Self {
        self.substitutions = Some(substitutions);
        self
    }
    pub fn add_substitution(mut self, substitution: Substitution) -> Self {
        self.substitutions
            .get_or_insert_with(Vec::new)
            .push(substitution);
        self
    }
    pub fn template_path(mut self, path: PathBuf) -> Self {
        self.template_path = Some(path);
        self
    }
    pub fn verify_each_step(mut self, verify: bool) -> Self {
        self.verify_each_step = Some(verify);
        self
    }

    pub fn build(self) -> Result<MutationConfig, ConfigError> {
        Ok(MutationConfig {
            substitutions: self
                .substitutions
                .ok_or(ConfigError::MissingParameter("substitutions"))?,
            template_path: self.template_path,
            verify_each_step: self.verify_each_step.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builder_requires_substitutions() {
        assert_eq!(
            MutationConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("substitutions"))
        );
    }

    #[test]
    fn builder_collects_substitutions_and_defaults_verification_on() {
        let config = MutationConfigBuilder::new()
            .add_substitution(Substitution::new(2, "ala", SecondaryStructure::Coil))
            .add_substitution(Substitution::new(3, "GLY", SecondaryStructure::Helix))
            .build()
            .unwrap();
        assert_eq!(config.substitutions.len(), 2);
        assert_eq!(config.substitutions[0].residue_name, "ALA");
        assert!(config.verify_each_step);
        assert_eq!(config.template_path, None);
        assert_eq!(config.substitutions[1].to_string(), "3:GLY:H");
    }

    #[test]
    fn read_plan_parses_rows_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        fs::write(
            &path,
            "residue-index,residue-name,structure\n2, PHE ,H\n3,ala,\n4,GLY,c\n",
        )
        .unwrap();

        let plan = read_plan(&path).unwrap();
        assert_eq!(
            plan,
            vec![
                Substitution::new(2, "PHE", SecondaryStructure::Helix),
                Substitution::new(3, "ALA", SecondaryStructure::Coil),
                Substitution::new(4, "GLY", SecondaryStructure::Coil),
            ]
        );
    }

    #[test]
    fn read_plan_rejects_bad_structure_and_zero_index() {
        let dir = tempdir().unwrap();
        let bad_ss = dir.path().join("bad_ss.csv");
        fs::write(&bad_ss, "residue-index,residue-name,structure\n2,PHE,Q\n").unwrap();
        assert!(matches!(
            read_plan(&bad_ss),
            Err(PlanError::InvalidRow { row: 1, .. })
        ));

        let zero = dir.path().join("zero.csv");
        fs::write(&zero, "residue-index,residue-name,structure\n0,PHE,C\n").unwrap();
        assert!(matches!(
            read_plan(&zero),
            Err(PlanError::InvalidRow { row: 1, .. })
        ));

        let not_a_number = dir.path().join("nan.csv");
        fs::write(&not_a_number, "residue-index,residue-name,structure\nx,PHE,C\n").unwrap();
        assert!(matches!(read_plan(&not_a_number), Err(PlanError::Csv { .. })));
    }
}
