use super::traits::TopologyFile;
use crate::core::models::topology::Topology;
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// One bead line of a coordinate file.
#[derive(Debug, Clone, PartialEq)]
pub struct GroRecord {
    pub residue_index: usize,
    pub residue_name: String,
    pub bead_name: String,
    pub number: usize,
    pub position: Point3<f64>,
    pub velocity: Option<Vector3<f64>>,
}

/// Contents of a coordinate file.
#[derive(Debug, Clone, PartialEq)]
pub struct GroFrame {
    pub title: String,
    pub records: Vec<GroRecord>,
    pub box_dimensions: Vector3<f64>,
}

impl GroFrame {
    /// Record of bead `number`, located by its position in the file.
    pub fn record(&self, number: usize) -> Option<&GroRecord> {
        self.records.get(number.checked_sub(1)?)
    }
}

#[derive(Debug, Error)]
pub enum GroError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: GroParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for a bead record (must be at least 44 chars)")]
    LineTooShort,
    #[error("Box line must hold three lengths")]
    InvalidBox,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int(line: &str, start: usize, end: usize, line_num: usize) -> Result<usize, GroError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| GroError::Parse {
        line: line_num,
        kind: GroParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(line: &str, start: usize, end: usize, line_num: usize) -> Result<f64, GroError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| GroError::Parse {
        line: line_num,
        kind: GroParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// GROMACS fixed-column coordinate format.
pub struct GroFile;

impl GroFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<GroFrame, GroError> {
        let mut lines = reader.lines();

        let title = lines
            .next()
            .ok_or_else(|| GroError::MissingRecord("title line".into()))??;
        let count_line = lines
            .next()
            .ok_or_else(|| GroError::MissingRecord("bead count line".into()))??;
        let count: usize = count_line.trim().parse().map_err(|_| GroError::Parse {
            line: 2,
            kind: GroParseErrorKind::InvalidInt {
                columns: "1-".into(),
                value: count_line.trim().into(),
            },
        })?;

        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            let line_num = i + 3;
            let line = lines
                .next()
                .ok_or_else(|| GroError::MissingRecord(format!("bead record {}", i + 1)))??;
            if line.len() < 44 {
                return Err(GroError::Parse {
                    line: line_num,
                    kind: GroParseErrorKind::LineTooShort,
                });
            }

            let position = Point3::new(
                parse_float(&line, 20, 28, line_num)?,
                parse_float(&line, 28, 36, line_num)?,
                parse_float(&line, 36, 44, line_num)?,
            );
            let velocity = if line.len() >= 68 {
                Some(Vector3::new(
                    parse_float(&line, 44, 52, line_num)?,
                    parse_float(&line, 52, 60, line_num)?,
                    parse_float(&line, 60, 68, line_num)?,
                ))
            } else {
                None
            };

            records.push(GroRecord {
                residue_index: parse_int(&line, 0, 5, line_num)?,
                residue_name: slice_and_trim(&line, 5, 10).to_string(),
                bead_name: slice_and_trim(&line, 10, 15).to_string(),
                number: parse_int(&line, 15, 20, line_num)?,
                position,
                velocity,
            });
        }

        let box_line = lines
            .next()
            .ok_or_else(|| GroError::MissingRecord("box line".into()))??;
        let lengths: Vec<f64> = box_line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| GroError::Parse {
                line: count + 3,
                kind: GroParseErrorKind::InvalidBox,
            })?;
        if lengths.len() < 3 {
            return Err(GroError::Parse {
                line: count + 3,
                kind: GroParseErrorKind::InvalidBox,
            });
        }

        Ok(GroFrame {
            title,
            records,
            box_dimensions: Vector3::new(lengths[0], lengths[1], lengths[2]),
        })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<GroFrame, GroError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

impl TopologyFile for GroFile {
    type Options = ();
    type Error = GroError;

    fn write_to(
        topology: &Topology,
        _options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", topology.title)?;
        writeln!(writer, "{}", topology.atom_count())?;
        for (_, bead) in topology.beads() {
            writeln!(
                writer,
                "{:>5}{:<5}{:>5}{:>5}{:>8.3}{:>8.3}{:>8.3}{:>8.4}{:>8.4}{:>8.4}",
                bead.residue_index,
                bead.residue_name,
                bead.name,
                bead.number,
                bead.position.x,
                bead.position.y,
                bead.position.z,
                bead.velocity.x,
                bead.velocity.y,
                bead.velocity.z,
            )?;
        }
        let b = &topology.box_dimensions;
        writeln!(writer, "{:>10.5}{:>10.5}{:>10.5}", b.x, b.y, b.z)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bead::Bead;
    use std::io::Cursor;

    const SAMPLE: &str = "\
DFAG test frame
3
    1PHE     BB    1   1.000   2.000   3.000  0.1000 -0.2000  0.0000
    1PHE    SC1    2   1.100   2.300   3.000
    2ALA     BB    3   1.350   2.000   3.000  0.0000  0.0000  0.0000
   5.00000   5.00000   5.00000
";

    #[test]
    fn reads_records_velocities_and_box() {
        let frame = GroFile::read_from(&mut Cursor::new(SAMPLE)).unwrap();
        assert_eq!(frame.title, "DFAG test frame");
        assert_eq!(frame.records.len(), 3);

        let first = &frame.records[0];
        assert_eq!(first.residue_index, 1);
        assert_eq!(first.residue_name, "PHE");
        assert_eq!(first.bead_name, "BB");
        assert_eq!(first.number, 1);
        assert_eq!(first.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(first.velocity, Some(Vector3::new(0.1, -0.2, 0.0)));

        assert_eq!(frame.records[1].velocity, None);
        assert_eq!(frame.record(3).unwrap().residue_name, "ALA");
        assert!(frame.record(0).is_none());
        assert_eq!(frame.box_dimensions, Vector3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn reports_line_of_bad_coordinate() {
        let text = "t\n1\n    1GLY     BB    1   1.000   abcde   3.000\n 1 1 1\n";
        let err = GroFile::read_from(&mut Cursor::new(text)).unwrap_err();
        match err {
            GroError::Parse { line, kind } => {
                assert_eq!(line, 3);
                assert_eq!(
                    kind,
                    GroParseErrorKind::InvalidFloat {
                        columns: "29-36".into(),
                        value: "abcde".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_missing_records_and_bad_box() {
        let truncated = "t\n2\n    1GLY     BB    1   1.000   2.000   3.000\n";
        assert!(matches!(
            GroFile::read_from(&mut Cursor::new(truncated)),
            Err(GroError::MissingRecord(_))
        ));
        let bad_box = "t\n1\n    1GLY     BB    1   1.000   2.000   3.000\n 1.0 x\n";
        assert!(matches!(
            GroFile::read_from(&mut Cursor::new(bad_box)),
            Err(GroError::Parse {
                line: 4,
                kind: GroParseErrorKind::InvalidBox
            })
        ));
    }

    #[test]
    fn writes_fixed_columns_that_read_back() {
        let mut topology = Topology::new();
        topology.title = "written".into();
        topology.box_dimensions = Vector3::new(4.0, 4.0, 4.0);
        topology.push_bead(Bead::new(
            1,
            "GLY",
            "BB",
            0,
            Point3::new(0.5, -1.25, 2.0),
            Vector3::new(0.01, 0.0, -0.02),
            "P5",
        ));

        let mut out = Vec::new();
        GroFile::write_to(&topology, &(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "written\n1\n    1GLY     BB    1   0.500  -1.250   2.000  0.0100  0.0000 -0.0200\n   4.00000   4.00000   4.00000\n"
        );

        let frame = GroFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(frame.records[0].position, Point3::new(0.5, -1.25, 2.0));
        assert_eq!(frame.records[0].velocity, Some(Vector3::new(0.01, 0.0, -0.02)));
    }
}
