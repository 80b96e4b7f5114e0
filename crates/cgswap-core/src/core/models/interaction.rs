use super::bead::Bead;
use super::ids::{BeadId, InteractionId};
use slotmap::SlotMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Bond,
    Constraint,
    Angle,
    Dihedral,
}

impl InteractionKind {
    /// All kinds, in the order their sections appear in a topology file.
    pub const ALL: [InteractionKind; 4] = [
        InteractionKind::Bond,
        InteractionKind::Constraint,
        InteractionKind::Angle,
        InteractionKind::Dihedral,
    ];

    pub fn arity(self) -> usize {
        match self {
            Self::Bond | Self::Constraint => 2,
            Self::Angle => 3,
            Self::Dihedral => 4,
        }
    }

    /// Name of the `[ section ]` holding this kind in a topology file.
    pub fn section(self) -> &'static str {
        match self {
            Self::Bond => "bonds",
            Self::Constraint => "constraints",
            Self::Angle => "angles",
            Self::Dihedral => "dihedrals",
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid interaction section name")]
pub struct ParseInteractionKindError;

impl FromStr for InteractionKind {
    type Err = ParseInteractionKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bonds" | "bond" => Ok(Self::Bond),
            "constraints" | "constraint" => Ok(Self::Constraint),
            "angles" | "angle" => Ok(Self::Angle),
            "dihedrals" | "dihedral" => Ok(Self::Dihedral),
            _ => Err(ParseInteractionKindError),
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Bond => "Bond",
                Self::Constraint => "Constraint",
                Self::Angle => "Angle",
                Self::Dihedral => "Dihedral",
            }
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
    #[error("{kind} requires {expected} beads but {found} were given")]
    Arity {
        kind: InteractionKind,
        expected: usize,
        found: usize,
    },
    #[error("Interaction {0:?} is not present in the collection")]
    NotFound(InteractionId),
}

/// A bonded term over 2, 3 or 4 beads.
///
/// Bonds, constraints, angles and dihedrals share one record shape; only the
/// number of participants and the meaning of the parameter tokens differ.
/// Parameters are kept as opaque tokens so that a loaded file is written back
/// exactly as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub kind: InteractionKind,
    beads: Vec<BeadId>,       // Participants, in file order
    pub params: Vec<String>,  // Function type followed by its parameters
    pub note: String,         // Trailing comment, without the ';'
}

impl Interaction {
    pub fn new(
        kind: InteractionKind,
        beads: Vec<BeadId>,
        params: Vec<String>,
        note: impl Into<String>,
    ) -> Result<Self, InteractionError> {
        if beads.len() != kind.arity() {
            return Err(InteractionError::Arity {
                kind,
                expected: kind.arity(),
                found: beads.len(),
            });
        }
        Ok(Self {
            kind,
            beads,
            params,
            note: note.into(),
        })
    }

    pub fn bond(a: BeadId, b: BeadId, params: Vec<String>) -> Self {
        Self::with_kind(InteractionKind::Bond, vec![a, b], params)
    }

    pub fn constraint(a: BeadId, b: BeadId, params: Vec<String>) -> Self {
        Self::with_kind(InteractionKind::Constraint, vec![a, b], params)
    }

    pub fn angle(a: BeadId, b: BeadId, c: BeadId, params: Vec<String>) -> Self {
        Self::with_kind(InteractionKind::Angle, vec![a, b, c], params)
    }

    pub fn dihedral(a: BeadId, b: BeadId, c: BeadId, d: BeadId, params: Vec<String>) -> Self {
        Self::with_kind(InteractionKind::Dihedral, vec![a, b, c, d], params)
    }

    fn with_kind(kind: InteractionKind, beads: Vec<BeadId>, params: Vec<String>) -> Self {
        Self {
            kind,
            beads,
            params,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn beads(&self) -> &[BeadId] {
        &self.beads
    }

    /// Whether `bead` is one of the participants (handle identity).
    pub fn involves(&self, bead: BeadId) -> bool {
        self.beads.contains(&bead)
    }

    /// Whether any participant currently carries serial `number`.
    pub fn contains(&self, number: usize, beads: &SlotMap<BeadId, Bead>) -> bool {
        self.beads
            .iter()
            .any(|&id| beads.get(id).is_some_and(|bead| bead.number == number))
    }
}

/// Ordered collection of interactions of one kind.
///
/// Entries keep their insertion order, which is also their order in the
/// written topology file.
#[derive(Debug, Clone, Default)]
pub struct InteractionList {
    entries: SlotMap<InteractionId, Interaction>,
    order: Vec<InteractionId>,
}

impl InteractionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, interaction: Interaction) -> InteractionId {
        let id = self.entries.insert(interaction);
        self.order.push(id);
        id
    }

    /// Removes the entry with handle `id`, failing if it is not present.
    pub fn remove(&mut self, id: InteractionId) -> Result<Interaction, InteractionError> {
        let interaction = self
            .entries
            .remove(id)
            .ok_or(InteractionError::NotFound(id))?;
        if let Some(pos) = self.order.iter().position(|&entry| entry == id) {
            self.order.remove(pos);
        }
        Ok(interaction)
    }

    /// Removes every entry with a participant numbered `number` and returns
    /// how many were dropped. Survivors keep their relative order.
    pub fn remove_by_participant(&mut self, number: usize, beads: &SlotMap<BeadId, Bead>) -> usize {
        let (survivors, dropped): (Vec<InteractionId>, Vec<InteractionId>) = self
            .order
            .iter()
            .partition(|&&id| !self.entries[id].contains(number, beads));

        for id in &dropped {
            self.entries.remove(*id);
        }
        self.order = survivors;
        dropped.len()
    }

    pub fn get(&self, index: usize) -> Option<&Interaction> {
        self.order.get(index).and_then(|&id| self.entries.get(id))
    }

    pub fn id_at(&self, index: usize) -> Option<InteractionId> {
        self.order.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.order.iter().map(move |&id| &self.entries[id])
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (InteractionId, &Interaction)> {
        self.order.iter().map(move |&id| (id, &self.entries[id]))
    }
}
