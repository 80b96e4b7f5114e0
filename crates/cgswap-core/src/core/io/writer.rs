use super::gro::{GroError, GroFile};
use super::itp::{ItpError, ItpFile};
use super::top::{TopFile, TopOptions};
use super::traits::TopologyFile;
use crate::core::models::topology::Topology;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to write coordinate file: {0}")]
    Gro(#[from] GroError),
    #[error("Failed to write molecule topology: {0}")]
    Itp(#[from] ItpError),
    #[error("Failed to write system topology: {0}")]
    Top(#[source] io::Error),
}

/// The three files making up one output set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub gro: PathBuf,
    pub itp: PathBuf,
    pub top: PathBuf,
}

impl OutputPaths {
    /// `<base>.gro`, `<base>.itp` and `<base>.top`. Any dot already in `base`
    /// is kept.
    pub fn from_base(base: &Path) -> Self {
        let with = |ext: &str| {
            let mut name = OsString::from(base.as_os_str());
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        };
        Self {
            gro: with("gro"),
            itp: with("itp"),
            top: with("top"),
        }
    }
}

/// Writes the coordinate file, the molecule topology and the system topology
/// for `topology` next to each other.
pub fn write_output_set(topology: &Topology, base: &Path) -> Result<OutputPaths, WriteError> {
    let paths = OutputPaths::from_base(base);
    let itp_include = paths
        .itp
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    GroFile::write_to_path(topology, &(), &paths.gro)?;
    ItpFile::write_to_path(topology, &(), &paths.itp)?;
    TopFile::write_to_path(topology, &TopOptions { itp_include }, &paths.top)
        .map_err(WriteError::Top)?;

    info!(
        gro = %paths.gro.display(),
        itp = %paths.itp.display(),
        top = %paths.top.display(),
        "Wrote output files"
    );
    Ok(paths)
}
