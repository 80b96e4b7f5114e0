use super::{load_forcefield, load_input, write_output};
use crate::cli::SwapArgs;
use crate::config::PartialSwapConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cgswap::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: SwapArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialSwapConfig::from_file(path)?,
        None => PartialSwapConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let app = partial_config.merge_with_cli(&args)?;

    let mut topology = load_input(&args.input)?;
    let forcefield = load_forcefield(app.mutation.template_path.as_deref())?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Applying {} substitution(s) to {} residues...",
        app.mutation.substitutions.len(),
        topology.residue_count()
    );
    let summary = workflows::mutate::run(&mut topology, &app.mutation, &forcefield, &reporter)?;

    if let Some(title) = app.output.title {
        topology.title = title;
    }
    if let Some(name) = app.output.molecule_name {
        topology.molecule_name = name;
    }

    let paths = write_output(&topology, &args.output)?;
    for (substitution, inserted) in &summary.applied {
        println!(
            "  residue {:>3} -> {} ({}), beads {}..{}",
            substitution.residue_index,
            substitution.residue_name,
            substitution.structure,
            inserted.first_number,
            inserted.first_number + inserted.beads.len() - 1
        );
    }
    println!(
        "✓ {} beads -> {} beads, written to {}, {} and {}",
        summary.atoms_before,
        summary.atoms_after,
        paths.gro.display(),
        paths.itp.display(),
        paths.top.display()
    );
    Ok(())
}
