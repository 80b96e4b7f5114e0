use crate::cli::SwapArgs;
use crate::error::{CliError, Result};
use cgswap::core::models::bead::SecondaryStructure;
use cgswap::engine::config::{self as core_config, MutationConfigBuilder, Substitution};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSubstitution {
    residue: usize,
    name: String,
    structure: Option<String>,
}

impl TryFrom<PartialSubstitution> for Substitution {
    type Error = CliError;

    fn try_from(p: PartialSubstitution) -> Result<Self> {
        if p.residue == 0 {
            return Err(CliError::Config(
                "`substitutions.residue` must be at least 1.".to_string(),
            ));
        }
        let structure = match p.structure.as_deref() {
            None | Some("") => SecondaryStructure::default(),
            Some(code) => code
                .parse()
                .map_err(|e| CliError::Config(format!("`substitutions.structure`: {e}")))?,
        };
        Ok(Substitution::new(p.residue, &p.name, structure))
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialForcefieldConfig {
    templates: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    title: Option<String>,
    molecule_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSwapConfig {
    forcefield: Option<PartialForcefieldConfig>,
    output: Option<PartialOutputConfig>,
    verify_each_step: Option<bool>,
    substitutions: Option<Vec<PartialSubstitution>>,
}

/// Metadata overrides applied to the topology before it is written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub title: Option<String>,
    pub molecule_name: Option<String>,
}

pub struct AppConfig {
    pub mutation: core_config::MutationConfig,
    pub output: OutputSettings,
}

impl PartialSwapConfig {
    /// Reads a config file. A relative `forcefield.templates` path is taken
    /// relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(templates) = config
            .forcefield
            .as_mut()
            .and_then(|ff| ff.templates.as_mut())
        {
            if templates.is_relative() {
                if let Some(dir) = path.parent() {
                    *templates = dir.join(&*templates);
                }
            }
        }
        Ok(config)
    }

    /// Combines the file with the command line. Flags win over the file and
    /// `--set` wins over both; substitutions given on the command line
    /// (`--plan` rows, then `--swap` entries) replace those of the file.
    pub fn merge_with_cli(mut self, args: &SwapArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let ff_config = self.forcefield.take().unwrap_or_default();
        let output_config = self.output.take().unwrap_or_default();

        let mut cli_substitutions = Vec::new();
        if let Some(plan) = &args.plan {
            cli_substitutions.extend(core_config::read_plan(plan).map_err(|e| {
                CliError::FileParsing {
                    path: plan.clone(),
                    source: e.into(),
                }
            })?);
        }
        cli_substitutions.extend(args.swaps.iter().cloned());

        let substitutions = if cli_substitutions.is_empty() {
            self.substitutions
                .take()
                .unwrap_or_default()
                .into_iter()
                .map(Substitution::try_from)
                .collect::<Result<Vec<_>>>()?
        } else {
            cli_substitutions
        };
        if substitutions.is_empty() {
            return Err(CliError::Config(
                "No substitutions given. Use --swap, --plan or `[[substitutions]]` in the config file."
                    .to_string(),
            ));
        }

        let mut builder = MutationConfigBuilder::new()
            .substitutions(substitutions)
            .verify_each_step(!args.no_verify && self.verify_each_step.unwrap_or(true));
        if let Some(templates) = args.templates.clone().or(ff_config.templates) {
            builder = builder.template_path(templates);
        }
        let mutation = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(AppConfig {
            mutation,
            output: OutputSettings {
                title: args.title.clone().or(output_config.title),
                molecule_name: args.molecule_name.clone().or(output_config.molecule_name),
            },
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "forcefield.templates" => {
                    self.forcefield
                        .get_or_insert_with(Default::default)
                        .templates = Some(PathBuf::from(value));
                }
                "output.title" => {
                    self.output.get_or_insert_with(Default::default).title =
                        Some(value.to_string());
                }
                "output.molecule-name" => {
                    self.output
                        .get_or_insert_with(Default::default)
                        .molecule_name = Some(value.to_string());
                }
                "verify-each-step" => {
                    self.verify_each_step = Some(value.parse().map_err(|_| {
                        CliError::Config(format!("Invalid boolean value for {}: {}", key, value))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn swap_args(extra: &[&str]) -> SwapArgs {
        let mut argv = vec![
            "cgswap", "swap", "--itp", "in.itp", "--gro", "in.gro", "-o", "out",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Swap(args) => args,
            _ => unreachable!(),
        }
    }

    const FILE: &str = r#"
verify-each-step = false

[forcefield]
templates = "extra.toml"

[output]
title = "From file"
molecule-name = "Peptide"

[[substitutions]]
residue = 2
name = "ala"

[[substitutions]]
residue = 8
name = "PHE"
structure = "H"
"#;

    #[test]
    fn file_values_are_used_when_cli_is_silent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, FILE).unwrap();

        let app = PartialSwapConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&swap_args(&[]))
            .unwrap();

        assert_eq!(
            app.mutation.substitutions,
            vec![
                Substitution::new(2, "ALA", SecondaryStructure::Coil),
                Substitution::new(8, "PHE", SecondaryStructure::Helix),
            ]
        );
        assert!(!app.mutation.verify_each_step);
        assert_eq!(app.mutation.template_path, Some(dir.path().join("extra.toml")));
        assert_eq!(app.output.title.as_deref(), Some("From file"));
        assert_eq!(app.output.molecule_name.as_deref(), Some("Peptide"));
    }

    #[test]
    fn cli_overrides_file_and_set_overrides_both() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, FILE).unwrap();

        let args = swap_args(&[
            "--swap",
            "3:GLY",
            "--title",
            "From flag",
            "--templates",
            "/abs/templates.toml",
            "-S",
            "output.molecule-name=Set",
        ]);
        let app = PartialSwapConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(
            app.mutation.substitutions,
            vec![Substitution::new(3, "GLY", SecondaryStructure::Coil)]
        );
        assert_eq!(
            app.mutation.template_path,
            Some(PathBuf::from("/abs/templates.toml"))
        );
        assert_eq!(app.output.title.as_deref(), Some("From flag"));
        assert_eq!(app.output.molecule_name.as_deref(), Some("Set"));
    }

    #[test]
    fn plan_rows_come_before_swap_flags() {
        let dir = tempdir().unwrap();
        let plan = dir.path().join("plan.csv");
        fs::write(&plan, "residue-index,residue-name,structure\n2,VAL,\n").unwrap();
        let plan_arg = plan.to_string_lossy().to_string();

        let app = PartialSwapConfig::default()
            .merge_with_cli(&swap_args(&["--plan", &plan_arg, "--swap", "8:VAL"]))
            .unwrap();
        let indices: Vec<_> = app
            .mutation
            .substitutions
            .iter()
            .map(|s| s.residue_index)
            .collect();
        assert_eq!(indices, vec![2, 8]);
        assert!(app.mutation.verify_each_step);
    }

    #[test]
    fn missing_substitutions_and_bad_keys_are_config_errors() {
        assert!(matches!(
            PartialSwapConfig::default().merge_with_cli(&swap_args(&[])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            PartialSwapConfig::default().merge_with_cli(&swap_args(&["--swap", "2:ALA", "-S", "output.colour=red"])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            PartialSwapConfig::default().merge_with_cli(&swap_args(&["--swap", "2:ALA", "-S", "novalue"])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\ncolour = \"red\"\n").unwrap();
        assert!(matches!(
            PartialSwapConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
