use crate::core::forcefield::table::ForceField;
use crate::core::models::bead::{Bead, SecondaryStructure};
use crate::core::models::interaction::Interaction;
use crate::core::models::topology::Topology;
use crate::engine::substitution::insert_residue;
use nalgebra::Vector3;

fn append(topology: &mut Topology, forcefield: &ForceField, name: &str, ss: SecondaryStructure) {
    let end = topology.atom_count() + 1;
    insert_residue(topology, forcefield, name, ss, end).unwrap();
}

/// `n` residues of `name`, built by appending one residue at a time.
pub(crate) fn homopolymer(name: &str, n: usize, ss: SecondaryStructure) -> Topology {
    let forcefield = ForceField::martini22();
    let mut topology = Topology::new();
    for _ in 0..n {
        append(&mut topology, &forcefield, name, ss);
    }
    topology
}

/// DFAG-OPV3-GAFD: two four-residue peptide arms joined by a three-bead
/// `OPV` core residue that has no backbone bead.
pub(crate) fn dfag_chain() -> Topology {
    let forcefield = ForceField::martini22();
    let mut topology = Topology::new();
    topology.title = "DFAG-OPV3-GAFD fixture".to_string();
    topology.box_dimensions = Vector3::new(10.0, 10.0, 10.0);
    topology.chemical_name = "DFAG".to_string();

    for name in ["ASP", "PHE", "ALA", "GLY"] {
        append(&mut topology, &forcefield, name, SecondaryStructure::Coil);
    }

    let gly_bb = topology.backbone(4).unwrap();
    let anchor = topology.bead(gly_bb).unwrap().position;
    let core: Vec<_> = (1..=3)
        .map(|k| {
            let position = anchor + Vector3::x() * (0.3 * k as f64);
            topology.push_bead(Bead::new(
                5,
                "OPV",
                &format!("B{k}"),
                0,
                position,
                Vector3::zeros(),
                "SC4",
            ))
        })
        .collect();
    let bond = |a, b| Interaction::bond(a, b, vec!["1".into(), "0.3".into(), "5000".into()]);
    topology.add_interaction(bond(gly_bb, core[0]).with_note("BB")).unwrap();
    topology.add_interaction(bond(core[0], core[1]).with_note("OPV")).unwrap();
    topology.add_interaction(bond(core[1], core[2]).with_note("OPV")).unwrap();

    for name in ["GLY", "ALA", "PHE", "ASP"] {
        append(&mut topology, &forcefield, name, SecondaryStructure::Coil);
    }
    topology.verify().unwrap();
    topology
}
