use super::traits::TopologyFile;
use crate::core::models::topology::Topology;
use std::io::{self, Write};

/// Generic force-field include every system topology starts from.
pub const FORCEFIELD_INCLUDE: &str = "martini.itp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopOptions {
    /// Path of the molecule topology as it should appear in the `#include`.
    pub itp_include: String,
}

/// System topology (`.top`) tying the force field and the molecule together.
pub struct TopFile;

impl TopologyFile for TopFile {
    type Options = TopOptions;
    type Error = io::Error;

    fn write_to(
        topology: &Topology,
        options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "#include \"{FORCEFIELD_INCLUDE}\"")?;
        writeln!(writer, "#include \"{}\"", options.itp_include)?;
        writeln!(writer, "[ system ]\n")?;
        writeln!(writer, "; name")?;
        writeln!(writer, "{} system\n", topology.chemical_name)?;
        writeln!(writer, "[ molecules ]\n")?;
        writeln!(writer, "; name \t number\n")?;
        writeln!(writer, "{} \t {}", topology.molecule_name, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_includes_system_and_single_molecule() {
        let mut topology = Topology::new();
        topology.chemical_name = "DFAG".into();
        topology.exclusions = 3;
        let options = TopOptions {
            itp_include: "dfag.itp".into(),
        };

        let mut out = Vec::new();
        TopFile::write_to(&topology, &options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "#include \"martini.itp\"\n\
             #include \"dfag.itp\"\n\
             [ system ]\n\n\
             ; name\n\
             DFAG system\n\n\
             [ molecules ]\n\n\
             ; name \t number\n\n\
             Protein \t 1\n"
        );
    }
}
