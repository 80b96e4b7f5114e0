use phf::{Map, phf_map};

/// Side-chain definition of one residue in the built-in table. Bead index 0
/// is the residue's backbone bead; side-chain beads are numbered from 1.
#[derive(Debug)]
pub(crate) struct StaticSidechain {
    pub code: char,
    pub bead_types: &'static [&'static str],
    /// Participants, length (nm), force constant. No force constant means the
    /// pair is held by a constraint.
    pub bonds: &'static [([usize; 2], f64, Option<f64>)],
    /// Participants, equilibrium angle (deg), force constant.
    pub angles: &'static [([usize; 3], f64, f64)],
    /// Improper dihedrals: participants, equilibrium angle (deg), force constant.
    pub dihedrals: &'static [([usize; 4], f64, f64)],
}

const NO_ANGLES: &[([usize; 3], f64, f64)] = &[];
const NO_DIHEDRALS: &[([usize; 4], f64, f64)] = &[];

const RING3_ANGLES_150: [([usize; 3], f64, f64); 2] = [([0, 1, 2], 150.0, 50.0), ([0, 1, 3], 150.0, 50.0)];

#[rustfmt::skip]
pub(crate) static SIDECHAINS: Map<&'static str, StaticSidechain> = phf_map! {
    "ALA" => StaticSidechain { code: 'A', bead_types: &[], bonds: &[], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "GLY" => StaticSidechain { code: 'G', bead_types: &[], bonds: &[], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },

    // --- Single side-chain bead ---
    "CYS" => StaticSidechain { code: 'C', bead_types: &["C5"],  bonds: &[([0, 1], 0.310, Some(7500.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "ASP" => StaticSidechain { code: 'D', bead_types: &["Qa"],  bonds: &[([0, 1], 0.320, Some(7500.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "GLU" => StaticSidechain { code: 'E', bead_types: &["Qa"],  bonds: &[([0, 1], 0.400, Some(5000.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "ILE" => StaticSidechain { code: 'I', bead_types: &["AC1"], bonds: &[([0, 1], 0.310, None)],         angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "LEU" => StaticSidechain { code: 'L', bead_types: &["AC1"], bonds: &[([0, 1], 0.330, Some(7500.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "MET" => StaticSidechain { code: 'M', bead_types: &["C5"],  bonds: &[([0, 1], 0.400, Some(2500.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "ASN" => StaticSidechain { code: 'N', bead_types: &["P5"],  bonds: &[([0, 1], 0.320, Some(5000.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "PRO" => StaticSidechain { code: 'P', bead_types: &["C3"],  bonds: &[([0, 1], 0.300, Some(7500.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "GLN" => StaticSidechain { code: 'Q', bead_types: &["P4"],  bonds: &[([0, 1], 0.400, Some(5000.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "SER" => StaticSidechain { code: 'S', bead_types: &["P1"],  bonds: &[([0, 1], 0.250, Some(7500.0))], angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "THR" => StaticSidechain { code: 'T', bead_types: &["P1"],  bonds: &[([0, 1], 0.260, None)],         angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },
    "VAL" => StaticSidechain { code: 'V', bead_types: &["AC2"], bonds: &[([0, 1], 0.265, None)],         angles: NO_ANGLES, dihedrals: NO_DIHEDRALS },

    // --- Two-bead chains ---
    "ARG" => StaticSidechain {
        code: 'R', bead_types: &["N0", "Qd"],
        bonds: &[([0, 1], 0.330, Some(5000.0)), ([1, 2], 0.340, Some(5000.0))],
        angles: &[([0, 1, 2], 180.0, 25.0)], dihedrals: NO_DIHEDRALS,
    },
    "LYS" => StaticSidechain {
        code: 'K', bead_types: &["C3", "Qd"],
        bonds: &[([0, 1], 0.330, Some(5000.0)), ([1, 2], 0.280, Some(5000.0))],
        angles: &[([0, 1, 2], 180.0, 25.0)], dihedrals: NO_DIHEDRALS,
    },

    // --- Rings ---
    "PHE" => StaticSidechain {
        code: 'F', bead_types: &["SC5", "SC5", "SC5"],
        bonds: &[([0, 1], 0.310, Some(7500.0)), ([1, 2], 0.270, None), ([1, 3], 0.270, None), ([2, 3], 0.270, None)],
        angles: &RING3_ANGLES_150, dihedrals: &[([0, 2, 3, 1], 0.0, 50.0)],
    },
    "TYR" => StaticSidechain {
        code: 'Y', bead_types: &["SC4", "SC4", "SP1"],
        bonds: &[([0, 1], 0.320, Some(5000.0)), ([1, 2], 0.270, None), ([1, 3], 0.270, None), ([2, 3], 0.270, None)],
        angles: &RING3_ANGLES_150, dihedrals: &[([0, 2, 3, 1], 0.0, 50.0)],
    },
    "HIS" => StaticSidechain {
        code: 'H', bead_types: &["SC4", "SP1", "SP1"],
        bonds: &[([0, 1], 0.320, Some(7500.0)), ([1, 2], 0.270, None), ([1, 3], 0.270, None), ([2, 3], 0.270, None)],
        angles: &RING3_ANGLES_150, dihedrals: &[([0, 2, 3, 1], 0.0, 50.0)],
    },
    "HIH" => StaticSidechain {
        code: 'H', bead_types: &["SC4", "SP1", "SQd"],
        bonds: &[([0, 1], 0.320, Some(7500.0)), ([1, 2], 0.270, None), ([1, 3], 0.270, None), ([2, 3], 0.270, None)],
        angles: &RING3_ANGLES_150, dihedrals: &[([0, 2, 3, 1], 0.0, 50.0)],
    },
    "TRP" => StaticSidechain {
        code: 'W', bead_types: &["SC4", "SNd", "SC5", "SC5"],
        bonds: &[
            ([0, 1], 0.300, Some(5000.0)), ([1, 2], 0.270, None), ([1, 3], 0.270, None),
            ([2, 3], 0.270, None), ([2, 4], 0.270, None), ([3, 4], 0.270, None),
        ],
        angles: &[([0, 1, 2], 210.0, 50.0), ([0, 1, 3], 90.0, 50.0)],
        dihedrals: &[([0, 2, 3, 1], 0.0, 50.0), ([1, 2, 4, 3], 0.0, 200.0)],
    },
};

/// Formal charge carried by each charged bead type.
#[rustfmt::skip]
pub(crate) static BEAD_CHARGES: Map<&'static str, f64> = phf_map! {
    "Qd" => 1.0, "SQd" => 1.0,
    "Qa" => -1.0, "SQa" => -1.0,
};

// Backbone tables. Columns follow `SecondaryStructure::ALL`: F E H 1 2 3 T S C.

#[rustfmt::skip]
pub(crate) const BB_TYPES: [&str; 9]     = ["N0", "Nda", "N0", "Nd", "Na", "Nda", "Nda", "P5", "P5"];
#[rustfmt::skip]
pub(crate) const BB_TYPES_ALA: [&str; 9] = ["C5", "N0",  "C5", "N0", "N0", "N0",  "N0",  "P4", "P4"];
#[rustfmt::skip]
pub(crate) const BB_TYPES_PRO: [&str; 9] = ["C5", "N0",  "C5", "N0", "Na", "N0",  "N0",  "P4", "P4"];

#[rustfmt::skip]
pub(crate) const BB_BOND_LENGTHS: [f64; 9] = [0.365, 0.350, 0.310, 0.310, 0.310, 0.310, 0.350, 0.350, 0.350];
#[rustfmt::skip]
pub(crate) const BB_BOND_FORCES: [Option<f64>; 9] = [
    Some(1250.0), Some(1250.0), None, None, None, None, Some(1250.0), Some(1250.0), Some(1250.0),
];

#[rustfmt::skip]
pub(crate) const BBB_ANGLES: [f64; 9]      = [119.2, 134.0, 96.0, 96.0, 96.0, 96.0, 100.0, 130.0, 127.0];
#[rustfmt::skip]
pub(crate) const BBB_FORCES: [f64; 9]      = [150.0, 25.0, 700.0, 700.0, 700.0, 700.0, 20.0, 20.0, 20.0];
#[rustfmt::skip]
pub(crate) const BBB_ANGLES_PRO: [f64; 9]  = [119.2, 134.0, 98.0, 98.0, 98.0, 98.0, 100.0, 130.0, 127.0];
#[rustfmt::skip]
pub(crate) const BBB_FORCES_PRO: [f64; 9]  = [150.0, 25.0, 100.0, 100.0, 100.0, 100.0, 25.0, 25.0, 25.0];

/// Backbone dihedrals exist only for F, E, H, 1, 2 and 3.
#[rustfmt::skip]
pub(crate) const BBBB_DIHEDRALS: [Option<(f64, f64)>; 9] = [
    Some((90.7, 100.0)), Some((0.0, 10.0)),
    Some((-120.0, 400.0)), Some((-120.0, 400.0)), Some((-120.0, 400.0)), Some((-120.0, 400.0)),
    None, None, None,
];
pub(crate) const BBBB_MULTIPLICITY: u32 = 1;

/// Backbone-backbone-sidechain angle: equilibrium (deg), force constant.
pub(crate) const BBS_ANGLE: (f64, f64) = (100.0, 25.0);
