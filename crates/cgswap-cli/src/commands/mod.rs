pub mod design;
pub mod inspect;
pub mod swap;

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use cgswap::core::forcefield::table::ForceField;
use cgswap::core::io::loader::load_topology;
use cgswap::core::io::writer::{OutputPaths, write_output_set};
use cgswap::core::models::topology::Topology;
use std::path::Path;
use tracing::info;

fn load_input(input: &InputArgs) -> Result<Topology> {
    info!("Loading input molecule from {:?} and {:?}", &input.itp, &input.gro);
    load_topology(&input.itp, &input.gro).map_err(|e| CliError::FileParsing {
        path: input.itp.clone(),
        source: e.into(),
    })
}

fn load_forcefield(templates: Option<&Path>) -> Result<ForceField> {
    let forcefield = ForceField::martini22();
    match templates {
        Some(path) => {
            info!("Loading residue templates from {:?}", path);
            forcefield
                .with_overrides(path)
                .map_err(|e| CliError::FileParsing {
                    path: path.to_path_buf(),
                    source: e.into(),
                })
        }
        None => Ok(forcefield),
    }
}

fn write_output(topology: &Topology, base: &Path) -> Result<OutputPaths> {
    write_output_set(topology, base).map_err(|e| CliError::Output {
        path: base.to_path_buf(),
        source: e.into(),
    })
}
