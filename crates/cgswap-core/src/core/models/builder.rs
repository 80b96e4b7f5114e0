use super::bead::Bead;
use super::ids::BeadId;
use super::interaction::{Interaction, InteractionError, InteractionKind};
use super::topology::{IntegrityError, Topology};
use nalgebra::Vector3;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Bead serial {found} is out of order (expected {expected})")]
    OutOfOrderSerial { expected: usize, found: usize },
    #[error("{kind} references unknown bead serial {serial}")]
    UnknownBead { kind: InteractionKind, serial: usize },
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error("Assembled topology is inconsistent: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Incremental construction of a [`Topology`] from serial-numbered records,
/// the way a file reader encounters them.
///
/// Beads must arrive in ascending, gap-free serial order. Interactions refer
/// to beads by serial and are resolved to handles immediately.
pub struct TopologyBuilder {
    topology: Topology,

    serial_map: HashMap<usize, BeadId>,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self {
            topology: Topology::new(),
            serial_map: HashMap::new(),
        }
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.topology.title = title.into();
        self
    }

    pub fn box_dimensions(&mut self, dimensions: Vector3<f64>) -> &mut Self {
        self.topology.box_dimensions = dimensions;
        self
    }

    pub fn molecule_type(&mut self, name: impl Into<String>, exclusions: usize) -> &mut Self {
        self.topology.molecule_name = name.into();
        self.topology.exclusions = exclusions;
        self
    }

    pub fn chemical_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.topology.chemical_name = name.into();
        self
    }

    pub fn add_bead(&mut self, serial: usize, bead: Bead) -> Result<&mut Self, BuildError> {
        let expected = self.topology.atom_count() + 1;
        if serial != expected {
            return Err(BuildError::OutOfOrderSerial {
                expected,
                found: serial,
            });
        }
        let id = self.topology.push_bead(bead);
        self.serial_map.insert(serial, id);
        Ok(self)
    }

    pub fn add_interaction(
        &mut self,
        kind: InteractionKind,
        serials: &[usize],
        params: Vec<String>,
        note: &str,
    ) -> Result<&mut Self, BuildError> {
        let beads = serials
            .iter()
            .map(|&serial| {
                self.serial_map
                    .get(&serial)
                    .copied()
                    .ok_or(BuildError::UnknownBead { kind, serial })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let interaction = Interaction::new(kind, beads, params, note)?;
        self.topology.interactions_mut(kind).append(interaction);
        Ok(self)
    }

    pub fn build(self) -> Result<Topology, BuildError> {
        self.topology.verify()?;
        Ok(self.topology)
    }
}
