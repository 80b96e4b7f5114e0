use crate::core::models::topology::Topology;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for serializing a [`Topology`] into one of the
/// output file formats.
///
/// Each format decides which part of the topology it writes; formats that
/// need information beyond the topology itself take it through `Options`.
pub trait TopologyFile {
    /// Format-specific inputs that are not part of the topology.
    type Options;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes the topology to a writer.
    ///
    /// # Arguments
    ///
    /// * `topology` - The topology to write.
    /// * `options` - Format-specific inputs.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        topology: &Topology,
        options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes the topology to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        topology: &Topology,
        options: &Self::Options,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(topology, options, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
