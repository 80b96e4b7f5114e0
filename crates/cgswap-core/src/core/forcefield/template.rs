use super::martini::{BEAD_CHARGES, StaticSidechain};
use crate::core::models::bead::{BACKBONE_BEAD_NAME, SecondaryStructure};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BeadTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub bead_type: String,
    /// Defaults to the formal charge of the bead type.
    #[serde(default)]
    pub charge: Option<f64>,
}

impl BeadTemplate {
    pub fn new(name: &str, bead_type: &str) -> Self {
        Self {
            name: name.to_string(),
            bead_type: bead_type.to_string(),
            charge: None,
        }
    }

    pub fn charge(&self) -> f64 {
        self.charge
            .or_else(|| BEAD_CHARGES.get(self.bead_type.as_str()).copied())
            .unwrap_or(0.0)
    }
}

/// A two-bead term between residue-local bead indices (0 is the backbone).
/// Without a force constant the pair is written as a constraint.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TemplateBond {
    pub beads: [usize; 2],
    pub length: f64,
    #[serde(default)]
    pub force_constant: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TemplateAngle {
    pub beads: [usize; 3],
    pub angle: f64,
    pub force_constant: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TemplateDihedral {
    pub beads: [usize; 4],
    pub angle: f64,
    pub force_constant: f64,
}

/// Residue-specific part of a template: everything except the backbone bead.
///
/// This is also the shape of a residue entry in a template override file:
///
/// ```toml
/// [SEP]
/// code = "X"
/// sidechain = [{ name = "SC1", type = "P1" }, { name = "SC2", type = "Qa" }]
/// bonds = [{ beads = [0, 1], length = 0.25, force-constant = 7500.0 },
///          { beads = [1, 2], length = 0.28, force-constant = 5000.0 }]
/// angles = [{ beads = [0, 1, 2], angle = 150.0, force-constant = 25.0 }]
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SidechainTemplate {
    /// One-letter code used in chemical names.
    #[serde(default)]
    pub code: Option<char>,
    #[serde(default)]
    pub sidechain: Vec<BeadTemplate>,
    #[serde(default)]
    pub bonds: Vec<TemplateBond>,
    #[serde(default)]
    pub angles: Vec<TemplateAngle>,
    #[serde(default)]
    pub dihedrals: Vec<TemplateDihedral>,
}

impl SidechainTemplate {
    pub(crate) fn from_static(data: &StaticSidechain) -> Self {
        Self {
            code: Some(data.code),
            sidechain: data
                .bead_types
                .iter()
                .enumerate()
                .map(|(i, bead_type)| BeadTemplate::new(&format!("SC{}", i + 1), bead_type))
                .collect(),
            bonds: data
                .bonds
                .iter()
                .map(|&(beads, length, force_constant)| TemplateBond {
                    beads,
                    length,
                    force_constant,
                })
                .collect(),
            angles: data
                .angles
                .iter()
                .map(|&(beads, angle, force_constant)| TemplateAngle {
                    beads,
                    angle,
                    force_constant,
                })
                .collect(),
            dihedrals: data
                .dihedrals
                .iter()
                .map(|&(beads, angle, force_constant)| TemplateDihedral {
                    beads,
                    angle,
                    force_constant,
                })
                .collect(),
        }
    }
}

/// A fully resolved residue ready for insertion: the backbone bead (typed for
/// the requested secondary structure) followed by the side-chain beads, and
/// the residue-internal terms split into bonds and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueTemplate {
    pub name: String,
    pub structure: SecondaryStructure,
    pub beads: Vec<BeadTemplate>,
    pub bonds: Vec<TemplateBond>,
    pub constraints: Vec<TemplateBond>,
    pub angles: Vec<TemplateAngle>,
    pub dihedrals: Vec<TemplateDihedral>,
}

impl ResidueTemplate {
    pub(crate) fn assemble(
        name: &str,
        structure: SecondaryStructure,
        backbone_type: &str,
        sidechain: &SidechainTemplate,
    ) -> Self {
        let mut beads = Vec::with_capacity(sidechain.sidechain.len() + 1);
        beads.push(BeadTemplate::new(BACKBONE_BEAD_NAME, backbone_type));
        beads.extend(sidechain.sidechain.iter().cloned());

        let (bonds, constraints): (Vec<_>, Vec<_>) = sidechain
            .bonds
            .iter()
            .cloned()
            .partition(|bond| bond.force_constant.is_some());

        Self {
            name: name.to_string(),
            structure,
            beads,
            bonds,
            constraints,
            angles: sidechain.angles.clone(),
            dihedrals: sidechain.dihedrals.clone(),
        }
    }

    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    pub fn sidechain_count(&self) -> usize {
        self.beads.len() - 1
    }

    /// Checks that every local index in every term names one of the beads.
    pub(crate) fn indices_in_range(&self) -> bool {
        let n = self.beads.len();
        let ok = |beads: &[usize]| beads.iter().all(|&i| i < n);
        self.bonds.iter().all(|b| ok(&b.beads))
            && self.constraints.iter().all(|b| ok(&b.beads))
            && self.angles.iter().all(|a| ok(&a.beads))
            && self.dihedrals.iter().all(|d| ok(&d.beads))
    }
}
