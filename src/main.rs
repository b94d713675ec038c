use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use clap::error::{
    ContextKind,
    ErrorKind,
};
use envcheck::{
    EnvCheckError,
    EnvSnapshot,
    ProjectPaths,
    TerminalPrompter,
    commands,
    logging,
};
use tracing::{
    debug,
    error,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "envcheck",
    version,
    about = "Track required environment variables and prompt for missing ones",
    long_about = "Without a command, checks that every variable listed in the manifest's \
                  envCheck field is set, prompting for missing values and appending them \
                  to the env file."
)]
struct Cli {
    /// Add variable names to the manifest's envCheck list
    #[arg(long, value_name = "NAME", num_args = 0.., conflicts_with = "sync")]
    add: Option<Vec<String>>,
    /// Add every variable assigned in the env file to the envCheck list
    #[arg(long)]
    sync: bool,
    /// Project directory that relative paths resolve against
    #[arg(short = 'C', long, env = "ENVCHECK_DIR", value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Manifest file (default: package.json)
    #[arg(long, env = "ENVCHECK_MANIFEST", value_name = "PATH")]
    manifest: Option<PathBuf>,
    /// Environment file (default: .env)
    #[arg(long, env = "ENVCHECK_ENV_FILE", value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only report errors
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
    #[arg(hide = true)]
    unknown: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Check,
    Add(Vec<String>),
    Sync,
}

impl Cli {
    fn command(&self) -> Result<Command, EnvCheckError> {
        if let Some(first) = self.unknown.first() {
            return Err(EnvCheckError::UnknownCommand(first.clone()));
        }
        Ok(match (&self.add, self.sync) {
            (Some(names), _) => Command::Add(names.clone()),
            (None, true) => Command::Sync,
            (None, false) => Command::Check,
        })
    }

    fn paths(&self) -> ProjectPaths {
        ProjectPaths::resolve(
            self.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            self.manifest.as_deref(),
            self.env_file.as_deref(),
        )
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };
    logging::init(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "command failed");
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<EnvCheckError>()
                .map_or(1, EnvCheckError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn parse_failure(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            ExitCode::SUCCESS
        }
        ErrorKind::UnknownArgument => {
            let arg = e
                .get(ContextKind::InvalidArg)
                .map(ToString::to_string)
                .unwrap_or_default();
            eprintln!("Error: {}", EnvCheckError::UnknownCommand(arg));
            ExitCode::FAILURE
        }
        _ => {
            let _ = e.print();
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let paths = cli.paths();
    debug!(manifest = %paths.manifest.display(), env_file = %paths.env_file.display(), "resolved paths");
    match cli.command()? {
        Command::Add(names) => {
            commands::add(&paths, &names)?;
        }
        Command::Sync => {
            commands::sync(&paths)?;
        }
        Command::Check => check(&paths)?,
    }
    Ok(())
}

fn check(paths: &ProjectPaths) -> Result<()> {
    let snapshot = EnvSnapshot::capture(&paths.env_file)
        .with_context(|| format!("Failed to load {}", paths.env_file.display()))?;
    let mut prompter = TerminalPrompter::new().context("Failed to open terminal prompt")?;
    envcheck::check(paths, &snapshot, &mut prompter)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("envcheck").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_args_is_check() {
        assert_eq!(parse(&[]).command().unwrap(), Command::Check);
    }

    #[test]
    fn add_collects_names() {
        assert_eq!(
            parse(&["--add", "FOO", "BAR"]).command().unwrap(),
            Command::Add(vec!["FOO".to_string(), "BAR".to_string()])
        );
        assert_eq!(parse(&["--add"]).command().unwrap(), Command::Add(vec![]));
    }

    #[test]
    fn sync_flag() {
        assert_eq!(parse(&["--sync"]).command().unwrap(), Command::Sync);
    }

    #[test]
    fn stray_word_is_unknown_command() {
        let err = parse(&["deploy"]).command().unwrap_err();
        assert!(matches!(err, EnvCheckError::UnknownCommand(ref c) if c == "deploy"));
    }

    #[test]
    fn stray_word_before_add_is_unknown_command() {
        let err = parse(&["deploy", "--add", "X"]).command().unwrap_err();
        assert!(matches!(err, EnvCheckError::UnknownCommand(ref c) if c == "deploy"));
    }

    #[test]
    fn add_conflicts_with_sync() {
        let err = Cli::try_parse_from(["envcheck", "--add", "FOO", "--sync"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["envcheck", "--remove"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn paths_resolve_against_dir() {
        let cli = parse(&["-C", "/srv/app", "--env-file", ".env.local"]);
        let paths = cli.paths();
        assert_eq!(paths.manifest, PathBuf::from("/srv/app/package.json"));
        assert_eq!(paths.env_file, PathBuf::from("/srv/app/.env.local"));
    }
}
