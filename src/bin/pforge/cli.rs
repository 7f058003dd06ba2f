use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pforge",
    about = "Resolve particle symbols and inspect their physical attributes",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show every attribute of a particle
    #[command(visible_alias = "s")]
    Show(ShowArgs),

    /// Write the JSON envelope of a particle
    #[command(visible_alias = "j")]
    Json(JsonArgs),

    /// Read a JSON envelope and summarise the particle it holds
    #[command(visible_alias = "d")]
    Decode(DecodeArgs),

    /// Test a particle against a category query
    #[command(visible_alias = "c")]
    Category(CategoryArgs),
}

/// Options shared by all commands.
#[derive(Args)]
pub struct GlobalOptions {
    /// Reference tables (TOML) used instead of the embedded data
    #[arg(long, value_name = "FILE", global = true)]
    pub data: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the banner and all logging below errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// The particle a command operates on.
#[derive(Args)]
#[command(next_help_heading = "Particle")]
pub struct ParticleSpec {
    /// Symbol, name, alias, or atomic number (e.g. "Fe-56 3+", alpha, 26)
    #[arg(value_name = "PARTICLE")]
    pub particle: String,

    /// Charge number applied to an element or isotope
    #[arg(
        short = 'Z',
        long = "charge",
        value_name = "Z",
        allow_hyphen_values = true
    )]
    pub charge: Option<i32>,

    /// Mass number applied to an element
    #[arg(short = 'A', long = "mass-number", value_name = "A")]
    pub mass_number: Option<u16>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub particle: ParticleSpec,
}

#[derive(Args)]
pub struct JsonArgs {
    #[command(flatten)]
    pub particle: ParticleSpec,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Input file holding the envelope (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args)]
pub struct CategoryArgs {
    #[command(flatten)]
    pub particle: ParticleSpec,

    #[command(flatten)]
    pub query: QueryOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Query")]
pub struct QueryOptions {
    /// Categories that must all be present (comma separated)
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub require: Vec<String>,

    /// Categories of which at least one must be present
    #[arg(long = "any-of", value_name = "TAGS", value_delimiter = ',')]
    pub any_of: Vec<String>,

    /// Categories that must be absent
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub exclude: Vec<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_charge_is_accepted() {
        let cli = Cli::try_parse_from(["pforge", "show", "Fe", "-Z", "-2", "-A", "56"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.particle.charge, Some(-2));
        assert_eq!(args.particle.mass_number, Some(56));
    }

    #[test]
    fn query_tags_split_on_commas() {
        let cli = Cli::try_parse_from([
            "pforge",
            "category",
            "p+",
            "--require",
            "baryon,fermion",
            "--exclude",
            "lepton",
        ])
        .unwrap();
        let Command::Category(args) = cli.command else {
            panic!("expected category");
        };
        assert_eq!(args.query.require, ["baryon", "fermion"]);
        assert_eq!(args.query.exclude, ["lepton"]);
        assert!(args.query.any_of.is_empty());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["pforge", "decode", "-vv", "-q"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.quiet);
    }
}
