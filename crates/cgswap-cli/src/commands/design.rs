use super::{load_forcefield, load_input, write_output};
use crate::cli::DesignArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use cgswap::engine::progress::ProgressReporter;
use cgswap::workflows::design::{self, DesignRequest};
use tracing::info;

pub fn run(args: DesignArgs, quiet: bool) -> Result<()> {
    let [x, y, z] = args.residues.as_slice() else {
        return Err(CliError::Argument(format!(
            "Expected exactly three residues, got {}.",
            args.residues.len()
        )));
    };
    let request =
        DesignRequest::new([x.as_str(), y.as_str(), z.as_str()], args.symmetric)
            .with_structure(args.structure);

    let mut topology = load_input(&args.input)?;
    let forcefield = load_forcefield(args.templates.as_deref())?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Designing {} arms from {:?}",
        if request.symmetric { "symmetric" } else { "asymmetric" },
        request.residues
    );
    let summary = design::run(&mut topology, &request, &forcefield, &reporter)?;

    let paths = write_output(&topology, &args.output)?;
    println!(
        "✓ {} ({} beads) written to {}, {} and {}",
        topology.chemical_name,
        summary.atoms_after,
        paths.gro.display(),
        paths.itp.display(),
        paths.top.display()
    );
    Ok(())
}
