use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitver::config;
use gitver::git::{Git2Repository, SituationProvider};
use gitver::ui;
use gitver::VersionComposer;

#[derive(clap::Parser)]
#[command(
    name = "gitver",
    version,
    about = "Derive a version string from the current git branch, tag or commit"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, default_value = ".", help = "Repository directory")]
    dir: PathBuf,

    #[arg(
        short,
        long,
        env = "GITVER_BRANCH",
        help = "Use this branch instead of the checked out one"
    )]
    branch: Option<String>,

    #[arg(
        short,
        long,
        env = "GITVER_TAG",
        help = "Use this tag instead of the tags pointing at HEAD"
    )]
    tag: Option<String>,

    #[arg(
        long,
        env = "GITVER_PREFER_TAGS",
        value_parser = FalseyValueParser::new(),
        help = "Prefer tag descriptors over branch descriptors"
    )]
    prefer_tags: bool,

    #[arg(
        short,
        long,
        default_value = "",
        help = "Version currently declared by the project, available as ${version}"
    )]
    declared_version: String,

    #[arg(
        short,
        long = "property",
        value_name = "KEY=VALUE",
        value_parser = parse_property,
        help = "Property to rewrite with matching property descriptors (repeatable)"
    )]
    properties: Vec<(String, String)>,

    #[arg(short, long, help = "Show the selected ref and debug logs")]
    verbose: bool,
}

fn parse_property(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid property '{}', expected KEY=VALUE", s))?;
    if key.is_empty() {
        return Err(format!("invalid property '{}', empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "gitver=debug" } else { "gitver=warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    config.prefer_tags |= args.prefer_tags;

    let selector = config.compile().context("Invalid version descriptors")?;

    let repo = Git2Repository::open(&args.dir)
        .with_context(|| format!("Git repository error in {}", args.dir.display()))?;
    let situation = repo
        .situation()
        .context("Failed to read repository state")?
        .with_overrides(args.branch.as_deref(), args.tag.as_deref());

    if args.verbose && (args.branch.is_some() || args.tag.is_some()) {
        ui::display_status("Using ref overrides from arguments or environment");
    }

    let properties: BTreeMap<String, String> = args.properties.iter().cloned().collect();
    let composed =
        VersionComposer::new(&selector).compose(&situation, &args.declared_version, &properties);

    ui::display_result(&composed, !properties.is_empty(), args.verbose);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("app.url=http://x/?a=b").unwrap(),
            ("app.url".to_string(), "http://x/?a=b".to_string())
        );
        assert_eq!(
            parse_property("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=x").is_err());
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
