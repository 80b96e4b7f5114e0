use super::martini::{
    BB_BOND_FORCES, BB_BOND_LENGTHS, BB_TYPES, BB_TYPES_ALA, BB_TYPES_PRO, BBB_ANGLES,
    BBB_ANGLES_PRO, BBB_FORCES, BBB_FORCES_PRO, BBBB_DIHEDRALS, BBBB_MULTIPLICITY, BBS_ANGLE,
};
use crate::core::models::bead::SecondaryStructure;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackboneBond {
    pub length: f64,
    /// `None` for helical structures, where the bond is a constraint.
    pub force_constant: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackboneAngle {
    pub angle: f64,
    pub force_constant: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackboneDihedral {
    pub angle: f64,
    pub force_constant: f64,
    pub multiplicity: u32,
}

/// Backbone bead type for a residue in a given secondary structure.
pub fn bead_type(residue_name: &str, ss: SecondaryStructure) -> &'static str {
    let column = ss.table_index();
    match residue_name {
        "ALA" => BB_TYPES_ALA[column],
        "PRO" => BB_TYPES_PRO[column],
        _ => BB_TYPES[column],
    }
}

/// Structure governing a backbone bond: shared structure of both ends, coil
/// otherwise.
pub fn bond_structure(a: SecondaryStructure, b: SecondaryStructure) -> SecondaryStructure {
    if a == b { a } else { SecondaryStructure::Coil }
}

pub fn bond(ss: SecondaryStructure) -> BackboneBond {
    let column = ss.table_index();
    BackboneBond {
        length: BB_BOND_LENGTHS[column],
        force_constant: BB_BOND_FORCES[column],
    }
}

/// BB-BB-BB angle, selected by the structure and residue of the central bead.
pub fn angle(center_residue: &str, ss: SecondaryStructure) -> BackboneAngle {
    let column = ss.table_index();
    let (angles, forces) = if center_residue == "PRO" {
        (&BBB_ANGLES_PRO, &BBB_FORCES_PRO)
    } else {
        (&BBB_ANGLES, &BBB_FORCES)
    };
    BackboneAngle {
        angle: angles[column],
        force_constant: forces[column],
    }
}

/// BB-BB-BB-BB dihedral. Only defined when all four beads share a structure
/// that carries one.
pub fn dihedral(structures: [SecondaryStructure; 4]) -> Option<BackboneDihedral> {
    let first = structures[0];
    if structures.iter().any(|&ss| ss != first) {
        return None;
    }
    BBBB_DIHEDRALS[first.table_index()].map(|(angle, force_constant)| BackboneDihedral {
        angle,
        force_constant,
        multiplicity: BBBB_MULTIPLICITY,
    })
}

/// BB-BB-SC1 angle linking a side chain to the preceding backbone bead.
pub fn sidechain_angle() -> BackboneAngle {
    BackboneAngle {
        angle: BBS_ANGLE.0,
        force_constant: BBS_ANGLE.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SecondaryStructure::*;

    #[test]
    fn bead_type_uses_residue_overrides() {
        assert_eq!(bead_type("GLY", Coil), "P5");
        assert_eq!(bead_type("PHE", Helix), "N0");
        assert_eq!(bead_type("ALA", Coil), "P4");
        assert_eq!(bead_type("ALA", Helix), "C5");
        assert_eq!(bead_type("PRO", HelixEnd), "Na");
        assert_eq!(bead_type("LEU", Extended), "Nda");
    }

    #[test]
    fn helical_bonds_are_constraints() {
        assert_eq!(
            bond(Coil),
            BackboneBond {
                length: 0.350,
                force_constant: Some(1250.0)
            }
        );
        assert_eq!(bond(Helix).force_constant, None);
        assert_eq!(bond(Helix).length, 0.310);
        assert_eq!(bond(Free).length, 0.365);
    }

    #[test]
    fn mixed_bond_structure_falls_back_to_coil() {
        assert_eq!(bond_structure(Helix, Helix), Helix);
        assert_eq!(bond_structure(Helix, Extended), Coil);
    }

    #[test]
    fn proline_angle_override() {
        assert_eq!(angle("GLY", Helix).angle, 96.0);
        assert_eq!(angle("GLY", Helix).force_constant, 700.0);
        assert_eq!(angle("PRO", Helix).angle, 98.0);
        assert_eq!(angle("PRO", Helix).force_constant, 100.0);
        assert_eq!(angle("PRO", Coil), angle("GLY", Coil).with_force(25.0));
    }

    #[test]
    fn dihedral_requires_uniform_bearing_structure() {
        assert_eq!(dihedral([Coil; 4]), None);
        assert_eq!(dihedral([Helix, Helix, Helix, Extended]), None);
        let helix = dihedral([Helix; 4]).unwrap();
        assert_eq!(helix.angle, -120.0);
        assert_eq!(helix.force_constant, 400.0);
        assert_eq!(helix.multiplicity, 1);
        assert!(dihedral([Free; 4]).is_some());
    }

    impl BackboneAngle {
        fn with_force(self, force_constant: f64) -> Self {
            Self {
                force_constant,
                ..self
            }
        }
    }
}
