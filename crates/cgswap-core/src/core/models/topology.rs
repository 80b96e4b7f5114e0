use super::bead::{BACKBONE_BEAD_NAME, Bead};
use super::ids::{BeadId, InteractionId};
use super::interaction::{Interaction, InteractionError, InteractionKind, InteractionList};
use nalgebra::Vector3;
use slotmap::SlotMap;
use std::collections::HashSet;
use thiserror::Error;

pub const DEFAULT_MOLECULE_NAME: &str = "Protein";
pub const DEFAULT_CHEMICAL_NAME: &str = "DXXX";

/// Violations of the invariants that every [`Topology`] must satisfy between
/// edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Bead at position {position} carries number {number} (expected {expected})")]
    Numbering {
        position: usize,
        number: usize,
        expected: usize,
    },
    #[error("Bead order and bead storage disagree ({ordered} ordered, {stored} stored)")]
    OrderMismatch { ordered: usize, stored: usize },
    #[error("{kind} #{index} references a bead that is no longer in the topology")]
    DanglingReference { kind: InteractionKind, index: usize },
    #[error("Residue {residue_index} is split around bead {number}")]
    SplitResidue { residue_index: usize, number: usize },
    #[error("Residue index jumps from {previous} to {next} at bead {number}")]
    ResidueGap {
        previous: usize,
        next: usize,
        number: usize,
    },
}

/// A single-molecule coarse-grained topology: beads, the four bonded
/// interaction collections, and the molecule-level metadata written to the
/// coordinate and topology files.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Title line of the coordinate file.
    pub title: String,
    /// Cubic box edge lengths in nm.
    pub box_dimensions: Vector3<f64>,
    /// Name in the `[ moleculetype ]` section.
    pub molecule_name: String,
    /// Number of bonded neighbours excluded from non-bonded interactions.
    pub exclusions: usize,
    /// Short chemistry label, e.g. "DFAG".
    pub chemical_name: String,

    pub(crate) beads: SlotMap<BeadId, Bead>,
    pub(crate) order: Vec<BeadId>,
    pub(crate) bonds: InteractionList,
    pub(crate) constraints: InteractionList,
    pub(crate) angles: InteractionList,
    pub(crate) dihedrals: InteractionList,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            title: String::new(),
            box_dimensions: Vector3::zeros(),
            molecule_name: DEFAULT_MOLECULE_NAME.to_string(),
            exclusions: 1,
            chemical_name: DEFAULT_CHEMICAL_NAME.to_string(),
            beads: SlotMap::with_key(),
            order: Vec::new(),
            bonds: InteractionList::new(),
            constraints: InteractionList::new(),
            angles: InteractionList::new(),
            dihedrals: InteractionList::new(),
        }
    }
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom_count(&self) -> usize {
        self.order.len()
    }

    /// Number of residues, i.e. the highest residue index present.
    pub fn residue_count(&self) -> usize {
        self.order
            .last()
            .map_or(0, |&id| self.beads[id].residue_index)
    }

    pub fn bead(&self, id: BeadId) -> Option<&Bead> {
        self.beads.get(id)
    }

    /// Iterates beads in ascending number order.
    pub fn beads(&self) -> impl Iterator<Item = (BeadId, &Bead)> {
        self.order.iter().map(move |&id| (id, &self.beads[id]))
    }

    pub(crate) fn bead_store(&self) -> &SlotMap<BeadId, Bead> {
        &self.beads
    }

    /// Looks a bead up by its 1-based serial number.
    pub fn bead_by_number(&self, number: usize) -> Option<BeadId> {
        let id = *self.order.get(number.checked_sub(1)?)?;
        (self.beads[id].number == number).then_some(id)
    }

    /// Bead handles of residue `residue_index`, in number order.
    pub fn residue_beads(&self, residue_index: usize) -> Vec<BeadId> {
        self.beads()
            .filter(|(_, bead)| bead.residue_index == residue_index)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn residue_name(&self, residue_index: usize) -> Option<&str> {
        self.beads()
            .find(|(_, bead)| bead.residue_index == residue_index)
            .map(|(_, bead)| bead.residue_name.as_str())
    }

    /// The backbone (`BB`) bead of a residue, if it has one.
    pub fn backbone(&self, residue_index: usize) -> Option<BeadId> {
        self.beads()
            .find(|(_, bead)| bead.residue_index == residue_index && bead.is_backbone())
            .map(|(id, _)| id)
    }

    /// Residue names in residue-index order.
    pub fn sequence(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = 0;
        for (_, bead) in self.beads() {
            if bead.residue_index != current {
                names.push(bead.residue_name.clone());
                current = bead.residue_index;
            }
        }
        names
    }

    pub fn interactions(&self, kind: InteractionKind) -> &InteractionList {
        match kind {
            InteractionKind::Bond => &self.bonds,
            InteractionKind::Constraint => &self.constraints,
            InteractionKind::Angle => &self.angles,
            InteractionKind::Dihedral => &self.dihedrals,
        }
    }

    pub(crate) fn interactions_mut(&mut self, kind: InteractionKind) -> &mut InteractionList {
        match kind {
            InteractionKind::Bond => &mut self.bonds,
            InteractionKind::Constraint => &mut self.constraints,
            InteractionKind::Angle => &mut self.angles,
            InteractionKind::Dihedral => &mut self.dihedrals,
        }
    }

    pub fn interaction_count(&self, kind: InteractionKind) -> usize {
        self.interactions(kind).len()
    }

    /// Appends a bead after the current last bead, assigning it the next number.
    pub fn push_bead(&mut self, mut bead: Bead) -> BeadId {
        bead.number = self.order.len() + 1;
        let id = self.beads.insert(bead);
        self.order.push(id);
        id
    }

    /// Appends an interaction to the collection of its kind. Returns `None`
    /// if a participant is not part of this topology.
    pub fn add_interaction(&mut self, interaction: Interaction) -> Option<InteractionId> {
        if !interaction
            .beads()
            .iter()
            .all(|&id| self.beads.contains_key(id))
        {
            return None;
        }
        Some(self.interactions_mut(interaction.kind).append(interaction))
    }

    /// Drops every interaction of every kind that involves bead `number`.
    pub(crate) fn purge_interactions_with(&mut self, number: usize) -> usize {
        let beads = &self.beads;
        [
            &mut self.bonds,
            &mut self.constraints,
            &mut self.angles,
            &mut self.dihedrals,
        ]
        .into_iter()
        .map(|list| list.remove_by_participant(number, beads))
        .sum()
    }

    /// Drops every interaction of every kind in which both `a` and `b`
    /// take part.
    pub(crate) fn purge_interactions_between(
        &mut self,
        a: BeadId,
        b: BeadId,
    ) -> Result<usize, InteractionError> {
        let mut purged = 0;
        for kind in InteractionKind::ALL {
            let list = self.interactions_mut(kind);
            let spanning: Vec<InteractionId> = list
                .iter_with_ids()
                .filter(|(_, interaction)| interaction.involves(a) && interaction.involves(b))
                .map(|(id, _)| id)
                .collect();
            for id in spanning {
                list.remove(id)?;
                purged += 1;
            }
        }
        Ok(purged)
    }

    /// Checks numbering density, order/storage agreement, referential
    /// integrity of every interaction, and residue contiguity.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        if self.order.len() != self.beads.len() {
            return Err(IntegrityError::OrderMismatch {
                ordered: self.order.len(),
                stored: self.beads.len(),
            });
        }

        let mut finished_residues = HashSet::new();
        let mut current_residue = 0;
        for (position, &id) in self.order.iter().enumerate() {
            let bead = self.beads.get(id).ok_or(IntegrityError::OrderMismatch {
                ordered: self.order.len(),
                stored: self.beads.len(),
            })?;
            if bead.number != position + 1 {
                return Err(IntegrityError::Numbering {
                    position,
                    number: bead.number,
                    expected: position + 1,
                });
            }
            if bead.residue_index != current_residue {
                if finished_residues.contains(&bead.residue_index) {
                    return Err(IntegrityError::SplitResidue {
                        residue_index: bead.residue_index,
                        number: bead.number,
                    });
                }
                if bead.residue_index != current_residue + 1 {
                    return Err(IntegrityError::ResidueGap {
                        previous: current_residue,
                        next: bead.residue_index,
                        number: bead.number,
                    });
                }
                finished_residues.insert(current_residue);
                current_residue = bead.residue_index;
            }
        }

        for kind in InteractionKind::ALL {
            for (index, interaction) in self.interactions(kind).iter().enumerate() {
                if !interaction
                    .beads()
                    .iter()
                    .all(|&id| self.beads.contains_key(id))
                {
                    return Err(IntegrityError::DanglingReference { kind, index });
                }
            }
        }
        Ok(())
    }

    /// Whether `id` names a bead called [`BACKBONE_BEAD_NAME`].
    pub fn is_backbone(&self, id: BeadId) -> bool {
        self.beads
            .get(id)
            .is_some_and(|bead| bead.name == BACKBONE_BEAD_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn bead(residue_index: usize, residue_name: &str, name: &str) -> Bead {
        Bead::new(
            residue_index,
            residue_name,
            name,
            0,
            Point3::origin(),
            Vector3::zeros(),
            "P5",
        )
    }

    fn two_residue_topology() -> (Topology, Vec<BeadId>) {
        let mut topology = Topology::new();
        let ids = vec![
            topology.push_bead(bead(1, "PHE", "BB")),
            topology.push_bead(bead(1, "PHE", "SC1")),
            topology.push_bead(bead(2, "ALA", "BB")),
        ];
        (topology, ids)
    }

    #[test]
    fn push_bead_assigns_dense_numbers() {
        let (topology, ids) = two_residue_topology();
        assert_eq!(topology.atom_count(), 3);
        assert_eq!(topology.residue_count(), 2);
        for (i, &id) in ids.iter().enumerate() {
            assert_eq!(topology.bead(id).unwrap().number, i + 1);
            assert_eq!(topology.bead_by_number(i + 1), Some(id));
        }
        assert_eq!(topology.bead_by_number(0), None);
        assert_eq!(topology.bead_by_number(4), None);
    }

    #[test]
    fn residue_queries_return_expected_beads() {
        let (topology, ids) = two_residue_topology();
        assert_eq!(topology.residue_beads(1), vec![ids[0], ids[1]]);
        assert_eq!(topology.residue_name(2), Some("ALA"));
        assert_eq!(topology.residue_name(3), None);
        assert_eq!(topology.backbone(1), Some(ids[0]));
        assert_eq!(topology.backbone(2), Some(ids[2]));
        assert_eq!(topology.sequence(), vec!["PHE", "ALA"]);
        assert!(topology.is_backbone(ids[0]));
        assert!(!topology.is_backbone(ids[1]));
    }

    #[test]
    fn add_interaction_routes_by_kind_and_rejects_foreign_beads() {
        let (mut topology, ids) = two_residue_topology();
        topology
            .add_interaction(Interaction::bond(ids[0], ids[2], vec![]))
            .unwrap();
        topology
            .add_interaction(Interaction::angle(ids[1], ids[0], ids[2], vec![]))
            .unwrap();
        assert_eq!(topology.interaction_count(InteractionKind::Bond), 1);
        assert_eq!(topology.interaction_count(InteractionKind::Angle), 1);
        assert_eq!(topology.interaction_count(InteractionKind::Dihedral), 0);

        let (mut other, other_ids) = two_residue_topology();
        other.beads.remove(other_ids[2]);
        assert!(
            other
                .add_interaction(Interaction::bond(other_ids[0], other_ids[2], vec![]))
                .is_none()
        );
    }

    #[test]
    fn purge_removes_from_every_collection() {
        let (mut topology, ids) = two_residue_topology();
        topology.add_interaction(Interaction::bond(ids[0], ids[2], vec![]));
        topology.add_interaction(Interaction::constraint(ids[0], ids[1], vec![]));
        topology.add_interaction(Interaction::angle(ids[1], ids[0], ids[2], vec![]));

        assert_eq!(topology.purge_interactions_with(3), 2);
        assert_eq!(topology.interaction_count(InteractionKind::Bond), 0);
        assert_eq!(topology.interaction_count(InteractionKind::Constraint), 1);
        assert_eq!(topology.interaction_count(InteractionKind::Angle), 0);
    }

    #[test]
    fn purge_between_keeps_terms_touching_only_one_bead() {
        let (mut topology, ids) = two_residue_topology();
        topology.add_interaction(Interaction::bond(ids[0], ids[2], vec![]));
        topology.add_interaction(Interaction::constraint(ids[0], ids[1], vec![]));
        topology.add_interaction(Interaction::angle(ids[1], ids[0], ids[2], vec![]));

        assert_eq!(topology.purge_interactions_between(ids[0], ids[2]), Ok(2));
        assert_eq!(topology.interaction_count(InteractionKind::Bond), 0);
        assert_eq!(topology.interaction_count(InteractionKind::Constraint), 1);
        assert_eq!(topology.interaction_count(InteractionKind::Angle), 0);
        assert_eq!(topology.purge_interactions_between(ids[0], ids[2]), Ok(0));
    }

    #[test]
    fn verify_accepts_consistent_topology() {
        let (mut topology, ids) = two_residue_topology();
        topology.add_interaction(Interaction::bond(ids[0], ids[2], vec![]));
        assert_eq!(topology.verify(), Ok(()));
    }

    #[test]
    fn verify_detects_numbering_gap() {
        let (mut topology, ids) = two_residue_topology();
        topology.beads[ids[2]].number = 4;
        assert_eq!(
            topology.verify(),
            Err(IntegrityError::Numbering {
                position: 2,
                number: 4,
                expected: 3
            })
        );
    }

    #[test]
    fn verify_detects_dangling_reference() {
        let (mut topology, ids) = two_residue_topology();
        topology.add_interaction(Interaction::bond(ids[0], ids[2], vec![]));
        topology.beads.remove(ids[2]);
        topology.order.pop();
        assert_eq!(
            topology.verify(),
            Err(IntegrityError::DanglingReference {
                kind: InteractionKind::Bond,
                index: 0
            })
        );
    }

    #[test]
    fn verify_detects_split_and_skipped_residues() {
        let mut split = Topology::new();
        split.push_bead(bead(1, "ALA", "BB"));
        split.push_bead(bead(2, "GLY", "BB"));
        split.push_bead(bead(1, "ALA", "SC1"));
        assert!(matches!(
            split.verify(),
            Err(IntegrityError::SplitResidue { residue_index: 1, .. })
        ));

        let mut gap = Topology::new();
        gap.push_bead(bead(1, "ALA", "BB"));
        gap.push_bead(bead(3, "GLY", "BB"));
        assert!(matches!(
            gap.verify(),
            Err(IntegrityError::ResidueGap {
                previous: 1,
                next: 3,
                ..
            })
        ));
    }
}
