use super::connectivity::{self, Side};
use super::error::EngineError;
use crate::core::forcefield::geometry::{place_backbone, place_sidechain};
use crate::core::forcefield::table::ForceField;
use crate::core::forcefield::template::ResidueTemplate;
use crate::core::models::bead::{Bead, SecondaryStructure};
use crate::core::models::ids::BeadId;
use crate::core::models::topology::Topology;
use nalgebra::Vector3;
use tracing::debug;

/// Outcome of inserting one residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedResidue {
    pub residue_index: usize,
    /// Number of the new backbone bead; the side chain follows it.
    pub first_number: usize,
    pub beads: Vec<BeadId>,
    /// Bonded terms synthesized for the new residue.
    pub interactions: usize,
}

/// Deletes residue `index` together with every interaction touching one of
/// its beads, then closes the gap: later beads are renumbered down and later
/// residues move down by one index.
///
/// Returns the number the removed residue's first bead had, which is where a
/// replacement must be inserted to take its place.
pub fn remove_residue(topology: &mut Topology, index: usize) -> Result<usize, EngineError> {
    let removed: Vec<(BeadId, usize)> = topology
        .beads()
        .filter(|(_, bead)| bead.residue_index == index)
        .map(|(id, bead)| (id, bead.number))
        .collect();
    let Some(first_number) = removed.iter().map(|&(_, number)| number).min() else {
        return Err(EngineError::InvalidResidue {
            index,
            residue_count: topology.residue_count(),
        });
    };

    let purged: usize = removed
        .iter()
        .map(|&(_, number)| topology.purge_interactions_with(number))
        .sum();

    let mut shift = 0;
    let mut survivors = Vec::with_capacity(topology.order.len() - removed.len());
    for id in std::mem::take(&mut topology.order) {
        let bead = &mut topology.beads[id];
        if bead.residue_index == index {
            shift += 1;
            continue;
        }
        bead.number -= shift;
        if bead.residue_index > index {
            bead.residue_index -= 1;
        }
        survivors.push(id);
    }
    topology.order = survivors;
    for (id, _) in removed {
        topology.beads.remove(id);
    }

    debug!(
        residue = index,
        beads = shift,
        interactions = purged,
        "Removed residue"
    );
    Ok(first_number)
}

/// Inserts a fresh `name` residue in secondary structure `ss` so that its
/// backbone bead gets number `number`, and synthesizes its bonded terms.
///
/// `number` must lie between residues (or be one past the last bead); later
/// beads and residues shift up to make room.
pub fn insert_residue(
    topology: &mut Topology,
    forcefield: &ForceField,
    name: &str,
    ss: SecondaryStructure,
    number: usize,
) -> Result<InsertedResidue, EngineError> {
    let template = forcefield
        .template(name, ss)
        .ok_or_else(|| EngineError::UnknownResidueTemplate {
            name: name.to_uppercase(),
        })?;
    insert_template(topology, &template, number)
}

/// Replaces residue `index` by a fresh `name` residue in structure `ss`,
/// keeping its position in the chain. The template is resolved before
/// anything is removed, so an unknown name leaves the topology untouched.
pub fn res_swap(
    topology: &mut Topology,
    forcefield: &ForceField,
    name: &str,
    ss: SecondaryStructure,
    index: usize,
) -> Result<InsertedResidue, EngineError> {
    let template = forcefield
        .template(name, ss)
        .ok_or_else(|| EngineError::UnknownResidueTemplate {
            name: name.to_uppercase(),
        })?;
    let number = remove_residue(topology, index)?;
    insert_template(topology, &template, number)
}

fn insertion_point_error(topology: &Topology, number: usize) -> EngineError {
    EngineError::InvalidInsertionPoint {
        number,
        atom_count: topology.atom_count(),
    }
}

pub(crate) fn insert_template(
    topology: &mut Topology,
    template: &ResidueTemplate,
    number: usize,
) -> Result<InsertedResidue, EngineError> {
    if number == 0 || number > topology.atom_count() + 1 {
        return Err(insertion_point_error(topology, number));
    }
    let before = number
        .checked_sub(2)
        .and_then(|i| topology.order.get(i).copied());
    let after = topology.order.get(number - 1).copied();
    if let (Some(b), Some(a)) = (before, after) {
        if topology.beads[b].residue_index == topology.beads[a].residue_index {
            return Err(insertion_point_error(topology, number));
        }
    }
    let residue_index = before.map_or(1, |b| topology.beads[b].residue_index + 1);
    let count = template.bead_count();

    for &id in &topology.order[number - 1..] {
        let bead = &mut topology.beads[id];
        bead.number += count;
        bead.residue_index += 1;
    }

    let neighbour_position = |residue: usize, side: Side| {
        connectivity::link_bead(topology, residue, side)
            .and_then(|id| topology.bead(id))
            .map(|bead| bead.position)
    };
    let prev = neighbour_position(residue_index - 1, Side::Before);
    let next = neighbour_position(residue_index + 1, Side::After);
    let backbone = place_backbone(prev.as_ref(), next.as_ref());
    let sidechain = place_sidechain(&backbone, template.sidechain_count());

    let mut ids = Vec::with_capacity(count);
    for (k, (bead_template, position)) in template
        .beads
        .iter()
        .zip(std::iter::once(backbone).chain(sidechain))
        .enumerate()
    {
        let mut bead = Bead::new(
            residue_index,
            &template.name,
            &bead_template.name,
            number + k,
            position,
            Vector3::zeros(),
            &bead_template.bead_type,
        );
        bead.charge = bead_template.charge();
        bead.structure = template.structure;
        ids.push(topology.beads.insert(bead));
    }
    topology
        .order
        .splice(number - 1..number - 1, ids.iter().copied());

    // Terms that chained the two neighbours directly now run across the new
    // residue.
    let prev_link = connectivity::link_bead(topology, residue_index - 1, Side::Before);
    let next_link = connectivity::link_bead(topology, residue_index + 1, Side::After);
    let bridged = match (prev_link, next_link) {
        (Some(prev), Some(next)) => topology.purge_interactions_between(prev, next)?,
        _ => 0,
    };

    let interactions = connectivity::connect_residue(topology, residue_index, &ids, template);
    debug!(
        residue = residue_index,
        name = %template.name,
        structure = %template.structure,
        beads = count,
        interactions,
        bridged,
        "Inserted residue"
    );

    Ok(InsertedResidue {
        residue_index,
        first_number: number,
        beads: ids,
        interactions,
    })
}
