use crate::core::forcefield::backbone;
use crate::core::forcefield::template::ResidueTemplate;
use crate::core::models::bead::SecondaryStructure;
use crate::core::models::ids::BeadId;
use crate::core::models::interaction::Interaction;
use crate::core::models::topology::Topology;
use tracing::trace;

pub(crate) const BACKBONE_NOTE: &str = "BB";
pub(crate) const BACKBONE_ANGLE_NOTE: &str = "BBB";
pub(crate) const BACKBONE_DIHEDRAL_NOTE: &str = "BBBB";
pub(crate) const SIDECHAIN_ANGLE_NOTE: &str = "BBS";

/// Which end of a neighbouring residue faces the residue being connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// The neighbour precedes; link to its last bead.
    Before,
    /// The neighbour follows; link to its first bead.
    After,
}

/// Bead through which `residue_index` is chained to a neighbour: its backbone
/// bead, or for residues without one the bead at the facing end.
pub(crate) fn link_bead(topology: &Topology, residue_index: usize, side: Side) -> Option<BeadId> {
    if residue_index == 0 {
        return None;
    }
    topology.backbone(residue_index).or_else(|| {
        let beads = topology.residue_beads(residue_index);
        match side {
            Side::Before => beads.last().copied(),
            Side::After => beads.first().copied(),
        }
    })
}

fn structure_of(topology: &Topology, id: BeadId) -> SecondaryStructure {
    topology
        .bead(id)
        .map(|bead| bead.structure)
        .unwrap_or_default()
}

fn real_backbone(topology: &Topology, residue_index: usize) -> Option<BeadId> {
    if residue_index == 0 {
        return None;
    }
    topology.backbone(residue_index)
}

fn first_sidechain(topology: &Topology, residue_index: usize) -> Option<BeadId> {
    topology
        .residue_beads(residue_index)
        .into_iter()
        .find(|&id| !topology.is_backbone(id))
}

fn param(value: f64) -> String {
    format!("{value}")
}

fn two_body(a: BeadId, b: BeadId, length: f64, force_constant: Option<f64>) -> Interaction {
    match force_constant {
        Some(kb) => Interaction::bond(a, b, vec!["1".into(), param(length), param(kb)]),
        None => Interaction::constraint(a, b, vec!["1".into(), param(length)]),
    }
}

fn push(topology: &mut Topology, interaction: Interaction, added: &mut usize) {
    trace!(kind = %interaction.kind, note = %interaction.note, "Adding interaction");
    topology.interactions_mut(interaction.kind).append(interaction);
    *added += 1;
}

/// Synthesizes every bonded term that involves the freshly inserted residue
/// `residue_index`, whose beads (backbone first, in template order) are
/// `beads`. Returns the number of interactions added.
///
/// Backbone terms follow the Martini rules: BB bonds to both neighbours, BBB
/// angles for each window of three consecutive backbone beads containing the
/// new one, BBBB dihedrals for each window of four, and BBS angles for the new
/// side chain and for the side chain of the following residue. The template's
/// own side-chain terms come last.
pub(crate) fn connect_residue(
    topology: &mut Topology,
    residue_index: usize,
    beads: &[BeadId],
    template: &ResidueTemplate,
) -> usize {
    let mut added = 0;
    let Some(&bb) = beads.first() else {
        return added;
    };
    let residue_count = topology.residue_count();

    // Backbone bonds to the neighbours.
    let prev_link = link_bead(topology, residue_index - 1, Side::Before);
    let next_link = (residue_index < residue_count)
        .then(|| link_bead(topology, residue_index + 1, Side::After))
        .flatten();
    for (a, b) in [prev_link.map(|p| (p, bb)), next_link.map(|n| (bb, n))]
        .into_iter()
        .flatten()
    {
        let ss = backbone::bond_structure(structure_of(topology, a), structure_of(topology, b));
        let rule = backbone::bond(ss);
        let interaction =
            two_body(a, b, rule.length, rule.force_constant).with_note(BACKBONE_NOTE);
        push(topology, interaction, &mut added);
    }

    let backbones: Vec<Option<BeadId>> = (0..=residue_count + 3)
        .map(|r| {
            if r + 3 < residue_index || r > residue_index + 3 {
                None
            } else {
                real_backbone(topology, r)
            }
        })
        .collect();
    let bb_at = |r: isize| -> Option<BeadId> {
        usize::try_from(r)
            .ok()
            .and_then(|r| backbones.get(r).copied().flatten())
    };
    let i = residue_index as isize;

    // BBB angles, parameters from the central bead.
    for start in (i - 2)..=i {
        let (Some(a), Some(b), Some(c)) = (bb_at(start), bb_at(start + 1), bb_at(start + 2)) else {
            continue;
        };
        let (center_name, center_ss) = topology
            .bead(b)
            .map(|bead| (bead.residue_name.clone(), bead.structure))
            .unwrap_or_default();
        let rule = backbone::angle(&center_name, center_ss);
        let interaction = Interaction::angle(
            a,
            b,
            c,
            vec!["2".into(), param(rule.angle), param(rule.force_constant)],
        )
        .with_note(BACKBONE_ANGLE_NOTE);
        push(topology, interaction, &mut added);
    }

    // BBBB dihedrals where all four backbone beads share a bearing structure.
    for start in (i - 3)..=i {
        let window = [
            bb_at(start),
            bb_at(start + 1),
            bb_at(start + 2),
            bb_at(start + 3),
        ];
        let [Some(a), Some(b), Some(c), Some(d)] = window else {
            continue;
        };
        let structures = [a, b, c, d].map(|id| structure_of(topology, id));
        let Some(rule) = backbone::dihedral(structures) else {
            continue;
        };
        let interaction = Interaction::dihedral(
            a,
            b,
            c,
            d,
            vec![
                "1".into(),
                param(rule.angle),
                param(rule.force_constant),
                rule.multiplicity.to_string(),
            ],
        )
        .with_note(BACKBONE_DIHEDRAL_NOTE);
        push(topology, interaction, &mut added);
    }

    // BBS angles: the new side chain, then the following residue's.
    let bbs = backbone::sidechain_angle();
    let bbs_params = || vec!["2".into(), param(bbs.angle), param(bbs.force_constant)];
    if let (Some(prev_bb), Some(&sc1)) = (bb_at(i - 1), beads.get(1)) {
        let interaction = Interaction::angle(prev_bb, bb, sc1, bbs_params()).with_note(SIDECHAIN_ANGLE_NOTE);
        push(topology, interaction, &mut added);
    }
    if let Some(next_bb) = bb_at(i + 1) {
        if let Some(next_sc1) = first_sidechain(topology, residue_index + 1) {
            let interaction =
                Interaction::angle(bb, next_bb, next_sc1, bbs_params()).with_note(SIDECHAIN_ANGLE_NOTE);
            push(topology, interaction, &mut added);
        }
    }

    // Residue-internal side-chain terms.
    let note = format!("SC {}", template.name);
    for bond in &template.bonds {
        let interaction = two_body(
            beads[bond.beads[0]],
            beads[bond.beads[1]],
            bond.length,
            bond.force_constant,
        )
        .with_note(note.clone());
        push(topology, interaction, &mut added);
    }
    for constraint in &template.constraints {
        let interaction = two_body(
            beads[constraint.beads[0]],
            beads[constraint.beads[1]],
            constraint.length,
            None,
        )
        .with_note(note.clone());
        push(topology, interaction, &mut added);
    }
    for angle in &template.angles {
        let [a, b, c] = angle.beads.map(|k| beads[k]);
        let interaction = Interaction::angle(
            a,
            b,
            c,
            vec!["2".into(), param(angle.angle), param(angle.force_constant)],
        )
        .with_note(note.clone());
        push(topology, interaction, &mut added);
    }
    for dihedral in &template.dihedrals {
        let [a, b, c, d] = dihedral.beads.map(|k| beads[k]);
        let interaction = Interaction::dihedral(
            a,
            b,
            c,
            d,
            vec!["2".into(), param(dihedral.angle), param(dihedral.force_constant)],
        )
        .with_note(note.clone());
        push(topology, interaction, &mut added);
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_use_shortest_decimal_form() {
        assert_eq!(param(0.35), "0.35");
        assert_eq!(param(1250.0), "1250");
        assert_eq!(param(-120.0), "-120");
        assert_eq!(param(119.2), "119.2");
        assert_eq!(param(0.0), "0");
    }

    #[test]
    fn two_body_without_force_constant_is_a_constraint() {
        let mut beads = slotmap::SlotMap::<BeadId, ()>::with_key();
        let (a, b) = (beads.insert(()), beads.insert(()));
        let bond = two_body(a, b, 0.35, Some(1250.0));
        assert_eq!(bond.kind, crate::core::models::interaction::InteractionKind::Bond);
        assert_eq!(bond.params, vec!["1", "0.35", "1250"]);
        let constraint = two_body(a, b, 0.31, None);
        assert_eq!(
            constraint.kind,
            crate::core::models::interaction::InteractionKind::Constraint
        );
        assert_eq!(constraint.params, vec!["1", "0.31"]);
    }
}
