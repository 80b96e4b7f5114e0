use crate::utils::parser;
use cgswap::core::models::bead::SecondaryStructure;
use cgswap::engine::config::Substitution;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "cgswap - Residue substitution for coarse-grained Martini topologies of DXXX-OPV3-XXXD peptides.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace residues of a molecule and write the resulting .gro/.itp/.top set.
    Swap(SwapArgs),
    /// Rewrite both peptide arms of a DXXX-OPV3-XXXD molecule from three residue names.
    Design(DesignArgs),
    /// Print the residue sequence and interaction counts of a molecule.
    Inspect(InspectArgs),
}

/// Input files shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Molecule topology (.itp).
    #[arg(long, required = true, value_name = "PATH")]
    pub itp: PathBuf,

    /// Coordinates (.gro) matching the topology bead for bead.
    #[arg(long, required = true, value_name = "PATH")]
    pub gro: PathBuf,
}

/// Arguments for the `swap` subcommand.
#[derive(Args, Debug)]
pub struct SwapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output base path; `.gro`, `.itp` and `.top` are appended.
    #[arg(short, long, required = true, value_name = "BASE")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// A substitution as IDX:RES[:SS], e.g. 3:ALA or 3:ALA:H. Can be used multiple times.
    #[arg(long = "swap", value_name = "IDX:RES[:SS]", value_parser = parser::parse_substitution)]
    pub swaps: Vec<Substitution>,

    /// CSV substitution plan with the header `residue-index,residue-name,structure`.
    #[arg(long, value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Additional or replacement residue templates in TOML format.
    #[arg(long, value_name = "PATH")]
    pub templates: Option<PathBuf>,

    /// Override the title line of the written coordinate file.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Override the molecule type name of the written topology.
    #[arg(long, value_name = "NAME")]
    pub molecule_name: Option<String>,

    /// Skip the topology consistency check after each substitution.
    #[arg(long)]
    pub no_verify: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.title=DFAG
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output base path; `.gro`, `.itp` and `.top` are appended.
    #[arg(short, long, required = true, value_name = "BASE")]
    pub output: PathBuf,

    /// The three arm residues X Y Z, in order from the terminal aspartate inward.
    #[arg(required = true, num_args = 3, value_name = "RES")]
    pub residues: Vec<String>,

    /// Build DXYZ-OPV3-ZYXD instead of DXYZ-OPV3-XYZD.
    #[arg(long)]
    pub symmetric: bool,

    /// Secondary structure code for the new residues.
    #[arg(long, default_value = "C", value_name = "SS")]
    pub structure: SecondaryStructure,

    /// Additional or replacement residue templates in TOML format.
    #[arg(long, value_name = "PATH")]
    pub templates: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
