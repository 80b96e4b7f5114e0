use super::gro::{GroError, GroFile};
use super::itp::{ItpError, ItpFile};
use crate::core::models::topology::Topology;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Malformed coordinate file '{path}': {source}")]
    MalformedCoordinates { path: String, source: GroError },
    #[error("Malformed topology file '{path}': {source}")]
    Malformed { path: String, source: ItpError },
    #[error("'{itp}' defines {itp_beads} beads but '{gro}' holds {gro_beads} coordinates")]
    CountMismatch {
        itp: String,
        gro: String,
        itp_beads: usize,
        gro_beads: usize,
    },
}

/// Builds a topology from a molecule topology and its coordinate file.
///
/// # Errors
///
/// Fails on the first structurally invalid record in either file, or when the
/// two files disagree on the number of beads.
pub fn load_topology(itp: &Path, gro: &Path) -> Result<Topology, LoadError> {
    let gro_display = gro.to_string_lossy().to_string();
    let itp_display = itp.to_string_lossy().to_string();

    let frame = GroFile::read_from_path(gro).map_err(|source| LoadError::MalformedCoordinates {
        path: gro_display.clone(),
        source,
    })?;
    let topology = ItpFile::read_from_path(itp, &frame).map_err(|source| LoadError::Malformed {
        path: itp_display.clone(),
        source,
    })?;

    if topology.atom_count() != frame.records.len() {
        return Err(LoadError::CountMismatch {
            itp: itp_display,
            gro: gro_display,
            itp_beads: topology.atom_count(),
            gro_beads: frame.records.len(),
        });
    }

    info!(
        beads = topology.atom_count(),
        residues = topology.residue_count(),
        chemistry = %topology.chemical_name,
        "Loaded topology"
    );
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GRO: &str = "\
t
2
    1GLY     BB    1   0.000   0.000   0.000
    2GLY     BB    2   0.350   0.000   0.000
   5.00000   5.00000   5.00000
";

    const ITP: &str = "\
[ moleculetype ]
Protein 1
[ atoms ]
1 P5 1 GLY BB 1 0.0 ; C
2 P5 2 GLY BB 2 0.0 ; C
[ bonds ]
1 2 1 0.35 1250 ; BB
";

    #[test]
    fn loads_matching_files() {
        let dir = tempdir().unwrap();
        let gro = dir.path().join("a.gro");
        let itp = dir.path().join("a.itp");
        fs::write(&gro, GRO).unwrap();
        fs::write(&itp, ITP).unwrap();

        let topology = load_topology(&itp, &gro).unwrap();
        assert_eq!(topology.atom_count(), 2);
        assert_eq!(topology.chemical_name, "DXXX");
    }

    #[test]
    fn rejects_count_mismatch() {
        let dir = tempdir().unwrap();
        let gro = dir.path().join("a.gro");
        let itp = dir.path().join("a.itp");
        fs::write(&gro, GRO).unwrap();
        fs::write(&itp, ITP.replace("2 P5 2 GLY BB 2 0.0 ; C\n", "").replace("1 2 1 0.35 1250 ; BB\n", "")).unwrap();

        let err = load_topology(&itp, &gro).unwrap_err();
        assert!(matches!(
            err,
            LoadError::CountMismatch {
                itp_beads: 1,
                gro_beads: 2,
                ..
            }
        ));
    }

    #[test]
    fn reports_malformed_file_path() {
        let dir = tempdir().unwrap();
        let gro = dir.path().join("a.gro");
        let itp = dir.path().join("a.itp");
        fs::write(&gro, GRO).unwrap();
        fs::write(&itp, ITP.replace("1 2 1 0.35", "1 x 1 0.35")).unwrap();

        let err = load_topology(&itp, &gro).unwrap_err();
        match err {
            LoadError::Malformed { path, source } => {
                assert!(path.ends_with("a.itp"));
                assert!(matches!(source, ItpError::Parse { line: 7, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_missing_coordinate_file() {
        let dir = tempdir().unwrap();
        let err = load_topology(&dir.path().join("a.itp"), &dir.path().join("none.gro"))
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedCoordinates { .. }));
    }
}
