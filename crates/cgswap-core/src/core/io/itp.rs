use super::gro::GroFrame;
use super::traits::TopologyFile;
use crate::core::models::bead::{Bead, SecondaryStructure};
use crate::core::models::builder::{BuildError, TopologyBuilder};
use crate::core::models::interaction::InteractionKind;
use crate::core::models::topology::Topology;
use nalgebra::Vector3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

const HEADER_PREFIX: &str = "; written by ";
const HEADER_SUFFIX: &str = " chemistry";

#[derive(Debug, Error)]
pub enum ItpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ItpParseErrorKind },
    #[error("Inconsistent record on line {line}: {source}")]
    Build {
        line: usize,
        #[source]
        source: BuildError,
    },
    #[error("Topology is inconsistent: {0}")]
    Inconsistent(#[source] BuildError),
    #[error("Bead {number} on line {line} has no coordinate record")]
    MissingCoordinates { line: usize, number: usize },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItpParseErrorKind {
    #[error("Invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Required field '{field}' is missing")]
    MissingField { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    MoleculeType,
    Atoms,
    Interactions(InteractionKind),
    Skipped,
}

fn section_of(header: &str) -> Section {
    match header {
        "moleculetype" => Section::MoleculeType,
        "atoms" => Section::Atoms,
        other => match other.parse::<InteractionKind>() {
            Ok(kind) => Section::Interactions(kind),
            Err(_) => {
                warn!(section = other, "Skipping unsupported topology section");
                Section::Skipped
            }
        },
    }
}

/// Splits a record into its data tokens and the trailing comment.
fn split_record(line: &str) -> (Vec<&str>, &str) {
    match line.split_once(';') {
        Some((data, note)) => (data.split_whitespace().collect(), note.trim()),
        None => (line.split_whitespace().collect(), ""),
    }
}

fn field<'a>(tokens: &[&'a str], index: usize, name: &'static str) -> Result<&'a str, ItpParseErrorKind> {
    tokens
        .get(index)
        .copied()
        .ok_or(ItpParseErrorKind::MissingField { field: name })
}

fn int_field(tokens: &[&str], index: usize, name: &'static str) -> Result<usize, ItpParseErrorKind> {
    let value = field(tokens, index, name)?;
    value.parse().map_err(|_| ItpParseErrorKind::InvalidInt {
        field: name,
        value: value.into(),
    })
}

/// Secondary structure recorded in an `[ atoms ]` comment. Comments that do
/// not start with a structure code are free text and leave the bead in coil.
fn structure_from_note(note: &str) -> SecondaryStructure {
    note.split_whitespace()
        .next()
        .and_then(|code| code.parse().ok())
        .unwrap_or_default()
}

/// Chemistry name from a `; written by <tool> for <NAME> chemistry` header.
fn chemical_name_from_header(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(HEADER_PREFIX)?;
    let (_, tail) = rest.rsplit_once(" for ")?;
    let name = tail.strip_suffix(HEADER_SUFFIX)?.trim();
    (!name.is_empty()).then_some(name)
}

/// GROMACS molecule topology (`.itp`) restricted to the sections a
/// coarse-grained peptide uses.
pub struct ItpFile;

impl ItpFile {
    /// Reads the molecule topology, taking bead positions and velocities from
    /// the coordinate record with the same bead number.
    pub fn read_from(reader: &mut impl BufRead, frame: &GroFrame) -> Result<Topology, ItpError> {
        let mut builder = TopologyBuilder::new();
        builder
            .title(frame.title.clone())
            .box_dimensions(frame.box_dimensions);

        let mut section = Section::Header;
        let mut saw_moleculetype = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if let Some(header) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                section = section_of(header.trim());
                continue;
            }
            if section == Section::Header {
                if let Some(name) = chemical_name_from_header(trimmed) {
                    builder.chemical_name(name);
                }
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            let parse_err = |kind| ItpError::Parse {
                line: line_num,
                kind,
            };
            let (tokens, note) = split_record(trimmed);

            match section {
                Section::Header | Section::Skipped => {}
                Section::MoleculeType => {
                    let name = field(&tokens, 0, "name").map_err(parse_err)?;
                    let exclusions = int_field(&tokens, 1, "exclusions").map_err(parse_err)?;
                    builder.molecule_type(name, exclusions);
                    saw_moleculetype = true;
                }
                Section::Atoms => {
                    let number = int_field(&tokens, 0, "nr").map_err(parse_err)?;
                    let bead_type = field(&tokens, 1, "type").map_err(parse_err)?;
                    let residue_index = int_field(&tokens, 2, "resnr").map_err(parse_err)?;
                    let residue_name = field(&tokens, 3, "residue").map_err(parse_err)?;
                    let name = field(&tokens, 4, "atom").map_err(parse_err)?;
                    let charge = match tokens.get(6) {
                        Some(value) => value.parse::<f64>().map_err(|_| {
                            parse_err(ItpParseErrorKind::InvalidFloat {
                                field: "charge",
                                value: value.to_string(),
                            })
                        })?,
                        None => 0.0,
                    };
                    let structure = structure_from_note(note);

                    let record = frame.record(number).ok_or(ItpError::MissingCoordinates {
                        line: line_num,
                        number,
                    })?;
                    let mut bead = Bead::new(
                        residue_index,
                        residue_name,
                        name,
                        number,
                        record.position,
                        record.velocity.unwrap_or_else(Vector3::zeros),
                        bead_type,
                    );
                    bead.charge = charge;
                    bead.structure = structure;
                    builder
                        .add_bead(number, bead)
                        .map_err(|source| ItpError::Build {
                            line: line_num,
                            source,
                        })?;
                }
                Section::Interactions(kind) => {
                    let arity = kind.arity();
                    if tokens.len() < arity {
                        return Err(parse_err(ItpParseErrorKind::MissingField {
                            field: "participant",
                        }));
                    }
                    let serials = (0..arity)
                        .map(|i| int_field(&tokens, i, "participant"))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(parse_err)?;
                    let params = tokens[arity..].iter().map(|t| t.to_string()).collect();
                    builder
                        .add_interaction(kind, &serials, params, note)
                        .map_err(|source| ItpError::Build {
                            line: line_num,
                            source,
                        })?;
                }
            }
        }

        if !saw_moleculetype {
            return Err(ItpError::MissingRecord("[ moleculetype ] entry".into()));
        }
        builder.build().map_err(ItpError::Inconsistent)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P, frame: &GroFrame) -> Result<Topology, ItpError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, frame)
    }
}

impl TopologyFile for ItpFile {
    type Options = ();
    type Error = ItpError;

    fn write_to(
        topology: &Topology,
        _options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(
            writer,
            "; MARTINI (martini22) Coarse Grained topology file for \"{}\"",
            topology.molecule_name
        )?;
        writeln!(
            writer,
            "{}cgswap for {}{}",
            HEADER_PREFIX, topology.chemical_name, HEADER_SUFFIX
        )?;
        writeln!(writer)?;

        writeln!(writer, "[ moleculetype ]")?;
        writeln!(writer, "; Name         Exclusions")?;
        writeln!(writer, "{}\t\t{}", topology.molecule_name, topology.exclusions)?;
        writeln!(writer)?;

        writeln!(writer, "[ atoms ]")?;
        for (_, bead) in topology.beads() {
            writeln!(
                writer,
                "{:>5}{:>6}{:>6}{:>6}{:>6}{:>6}{:>8.4}; {}",
                bead.number,
                bead.bead_type,
                bead.residue_index,
                bead.residue_name,
                bead.name,
                bead.number,
                bead.charge,
                bead.structure
            )?;
        }
        writeln!(writer)?;

        let beads = topology.bead_store();
        for kind in InteractionKind::ALL {
            writeln!(writer, "[ {} ]", kind.section())?;
            for interaction in topology.interactions(kind).iter() {
                for &id in interaction.beads() {
                    let number = beads.get(id).map(|b| b.number).ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("{kind} references a removed bead"),
                        )
                    })?;
                    write!(writer, "\t{number}")?;
                }
                for param in &interaction.params {
                    write!(writer, "\t{param}")?;
                }
                writeln!(writer, "; {}", interaction.note)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
