use nalgebra::{Point3, Vector3};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Secondary structure assignment of a residue, using the one-letter codes
/// understood by the Martini backbone parameter tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryStructure {
    /// Collagenous / free (`F`).
    Free,
    /// Extended strand (`E`).
    Extended,
    /// Alpha helix (`H`).
    Helix,
    /// Helix N-terminus (`1`).
    HelixStart,
    /// Helix C-terminus (`2`).
    HelixEnd,
    /// Single-residue helix, both termini (`3`).
    HelixStartEnd,
    /// Turn (`T`).
    Turn,
    /// Bend (`S`).
    Bend,
    /// Random coil (`C`).
    #[default]
    Coil,
}

impl SecondaryStructure {
    /// All codes in the column order of the backbone parameter tables.
    pub const ALL: [SecondaryStructure; 9] = [
        Self::Free,
        Self::Extended,
        Self::Helix,
        Self::HelixStart,
        Self::HelixEnd,
        Self::HelixStartEnd,
        Self::Turn,
        Self::Bend,
        Self::Coil,
    ];

    pub fn code(self) -> char {
        match self {
            Self::Free => 'F',
            Self::Extended => 'E',
            Self::Helix => 'H',
            Self::HelixStart => '1',
            Self::HelixEnd => '2',
            Self::HelixStartEnd => '3',
            Self::Turn => 'T',
            Self::Bend => 'S',
            Self::Coil => 'C',
        }
    }

    /// Column of this structure in the backbone parameter tables.
    pub fn table_index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid secondary structure code '{0}'")]
pub struct ParseSecondaryStructureError(pub String);

impl TryFrom<char> for SecondaryStructure {
    type Error = ParseSecondaryStructureError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'F' => Ok(Self::Free),
            'E' => Ok(Self::Extended),
            'H' => Ok(Self::Helix),
            '1' => Ok(Self::HelixStart),
            '2' => Ok(Self::HelixEnd),
            '3' => Ok(Self::HelixStartEnd),
            'T' => Ok(Self::Turn),
            'S' => Ok(Self::Bend),
            'C' => Ok(Self::Coil),
            _ => Err(ParseSecondaryStructureError(c.to_string())),
        }
    }
}

impl FromStr for SecondaryStructure {
    type Err = ParseSecondaryStructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(ParseSecondaryStructureError(s.to_string())),
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single coarse-grained particle.
///
/// Beads are owned by a [`Topology`](super::topology::Topology) and referenced
/// everywhere else through their [`BeadId`](super::ids::BeadId) handle. Two
/// handles are the same bead iff they are equal; the record itself has no
/// value equality because relabelled beads can share every field.
#[derive(Debug, Clone)]
pub struct Bead {
    pub residue_index: usize,          // 1-based residue this bead belongs to
    pub residue_name: String,          // e.g. "PHE"
    pub name: String,                  // Role within the residue, e.g. "BB", "SC1"
    pub number: usize,                 // 1-based dense serial number
    pub position: Point3<f64>,         // nm
    pub velocity: Vector3<f64>,        // nm/ps
    pub bead_type: String,             // Force-field type code
    pub charge: f64,                   // e
    pub structure: SecondaryStructure, // Secondary structure of the parent residue
}

impl Bead {
    pub fn new(
        residue_index: usize,
        residue_name: &str,
        name: &str,
        number: usize,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        bead_type: &str,
    ) -> Self {
        Self {
            residue_index,
            residue_name: residue_name.to_string(),
            name: name.to_string(),
            number,
            position,
            velocity,
            bead_type: bead_type.to_string(),
            charge: 0.0,
            structure: SecondaryStructure::default(),
        }
    }

    pub fn is_backbone(&self) -> bool {
        self.name == BACKBONE_BEAD_NAME
    }
}

/// Name of the bead that links a peptide residue to its chain neighbours.
pub const BACKBONE_BEAD_NAME: &str = "BB";
