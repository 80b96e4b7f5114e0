use super::backbone;
use super::martini::SIDECHAINS;
use super::template::{ResidueTemplate, SidechainTemplate};
use crate::core::models::bead::SecondaryStructure;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ForceFieldLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Template '{residue}' in '{path}' references a bead index it does not define")]
    BadIndex { path: String, residue: String },
}

/// Residue template source: the built-in Martini 2.2 table, optionally
/// extended or overridden per residue from a TOML file.
#[derive(Debug, Clone, Default)]
pub struct ForceField {
    overrides: HashMap<String, SidechainTemplate>,
}

impl ForceField {
    pub fn martini22() -> Self {
        Self::default()
    }

    /// Loads additional residue templates from `path`. An entry with the
    /// name of a built-in residue replaces it.
    pub fn with_overrides(mut self, path: &Path) -> Result<Self, ForceFieldLoadError> {
        let display = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ForceFieldLoadError::Io {
            path: display.clone(),
            source: e,
        })?;
        let entries: HashMap<String, SidechainTemplate> =
            toml::from_str(&content).map_err(|e| ForceFieldLoadError::Toml {
                path: display.clone(),
                source: e,
            })?;

        for (name, entry) in entries {
            let name = name.to_uppercase();
            let check = ResidueTemplate::assemble(&name, SecondaryStructure::Coil, "", &entry);
            if !check.indices_in_range() {
                return Err(ForceFieldLoadError::BadIndex {
                    path: display,
                    residue: name,
                });
            }
            debug!(residue = %name, beads = check.bead_count(), "Loaded template override");
            self.overrides.insert(name, entry);
        }
        Ok(self)
    }

    fn sidechain(&self, name: &str) -> Option<SidechainTemplate> {
        let key = name.to_uppercase();
        self.overrides
            .get(&key)
            .cloned()
            .or_else(|| SIDECHAINS.get(key.as_str()).map(SidechainTemplate::from_static))
    }

    pub fn has_template(&self, name: &str) -> bool {
        let key = name.to_uppercase();
        self.overrides.contains_key(&key) || SIDECHAINS.contains_key(key.as_str())
    }

    /// Resolves the full residue (backbone and side chain) for insertion in
    /// secondary structure `ss`.
    pub fn template(&self, name: &str, ss: SecondaryStructure) -> Option<ResidueTemplate> {
        let key = name.to_uppercase();
        let sidechain = self.sidechain(&key)?;
        Some(ResidueTemplate::assemble(
            &key,
            ss,
            backbone::bead_type(&key, ss),
            &sidechain,
        ))
    }

    pub fn one_letter_code(&self, name: &str) -> Option<char> {
        self.sidechain(name)?.code
    }

    /// All residue names with a template, sorted.
    pub fn residue_names(&self) -> Vec<String> {
        SIDECHAINS
            .keys()
            .map(|k| k.to_string())
            .chain(self.overrides.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
