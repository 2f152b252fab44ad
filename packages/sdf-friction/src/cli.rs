//! Command-line interface for the friction patcher.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;

use crate::config::FrictionProfile;
use crate::error::Result;
use crate::patch::PatchReport;
use crate::patcher::patch_file;

/// Patch wheel/caster friction into an SDF file and remove invalid link-level <surface> tags.
#[derive(Debug, Parser)]
#[command(name = "patch-friction")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input SDF file
    pub input: PathBuf,

    /// Output SDF file (may be the same as INPUT)
    pub output: PathBuf,

    /// YAML friction profile to use instead of the built-in one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only patch the model with this name (overrides the profile)
    #[arg(short, long, value_name = "NAME", conflicts_with = "all_models")]
    pub model: Option<String>,

    /// Patch every model regardless of name
    #[arg(long)]
    pub all_models: bool,
}

impl Cli {
    /// Build the effective friction profile from the options.
    pub fn profile(&self) -> Result<FrictionProfile> {
        let profile = match &self.config {
            Some(path) => FrictionProfile::from_yaml_file(path)?,
            None => FrictionProfile::default(),
        };

        Ok(if self.all_models {
            profile.with_target_model(None)
        } else if let Some(model) = &self.model {
            profile.with_target_model(Some(model.clone()))
        } else {
            profile
        })
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let profile = cli.profile()?;
    let report = patch_file(&cli.input, &cli.output, &profile)?;
    print_summary(&report, &cli.output);
    Ok(())
}

/// Print the final status lines to stderr.
fn print_summary(report: &PatchReport, output: &Path) {
    let ok = style("[OK]").green().bold().for_stderr();
    eprintln!(
        "{ok} Patched {} link(s), removed {} invalid <surface> tag(s).",
        report.patched_links, report.removed_surfaces
    );
    eprintln!("{ok} Wrote cleaned SDF: {}", output.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_positionals() {
        let cli = Cli::parse_from(["patch-friction", "in.sdf", "out.sdf"]);
        assert_eq!(cli.input, PathBuf::from("in.sdf"));
        assert_eq!(cli.output, PathBuf::from("out.sdf"));
        assert!(cli.config.is_none());
        assert!(!cli.all_models);
    }

    #[test]
    fn test_cli_rejects_wrong_argument_count() {
        assert!(Cli::try_parse_from(["patch-friction", "in.sdf"]).is_err());
        assert!(Cli::try_parse_from(["patch-friction", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_cli_model_conflicts_with_all_models() {
        let result = Cli::try_parse_from([
            "patch-friction",
            "in.sdf",
            "out.sdf",
            "--model",
            "k9_robot",
            "--all-models",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_overrides() {
        let cli = Cli::parse_from(["patch-friction", "in.sdf", "out.sdf", "--model", "rover"]);
        assert_eq!(cli.profile().unwrap().target(), Some("rover"));

        let cli = Cli::parse_from(["patch-friction", "in.sdf", "out.sdf", "--all-models"]);
        assert_eq!(cli.profile().unwrap().target(), None);

        let cli = Cli::parse_from(["patch-friction", "in.sdf", "out.sdf"]);
        assert_eq!(cli.profile().unwrap(), FrictionProfile::default());
    }
}
