//! CLI argument parsing and pipeline dispatch

use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::debug;

use repo_sweep::cloner::{CloneOrchestrator, FailureMode, GitCloneRunner};
use repo_sweep::output::OutputConfig;
use repo_sweep::reader::FileStreamer;
use repo_sweep::remote::RepoLister;

/// Repo Sweep - Clone every public repository of a GitHub account
#[derive(Parser, Debug)]
#[command(name = "repo-sweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Organization or user whose public repositories are cloned; also the
    /// name of the destination directory
    #[arg(short, long, value_name = "ACCOUNT")]
    name: String,

    /// Print the contents of every file in the cloned repositories
    #[arg(short, long)]
    read: bool,

    /// Forward the output of each `git clone` line-by-line
    #[arg(short = 'd', long)]
    echo_clone: bool,

    /// Skip cloning and read an existing local directory instead
    #[arg(short, long)]
    local: bool,

    /// Attempt every clone and report all failures at the end, instead of
    /// aborting on the first one
    #[arg(long)]
    keep_going: bool,

    /// Bearer credential for the repository listing
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the pipeline: list, clone, and optionally read.
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(Env::default().default_filter_or(self.log_level.as_str()))
            .init();
        let output = OutputConfig::from_env_and_flag(&self.color);
        let start_time = Instant::now();

        if !self.local {
            let lister = RepoLister::new(self.token.as_deref())?;
            let repositories = lister.list_public_repos(&self.name)?;
            println!(
                "{} {} public repositories listed for {}",
                output.emoji("🔍", "[LIST]"),
                repositories.len(),
                self.name
            );

            let runner = GitCloneRunner::locate(self.echo_clone)?;
            let failure_mode = if self.keep_going {
                FailureMode::KeepGoing
            } else {
                FailureMode::FailFast
            };
            let orchestrator = CloneOrchestrator::new(failure_mode, output.clone());
            orchestrator.run(&runner, &repositories, Path::new(&self.name))?;

            println!(
                "{} Cloned {} repositories in {:.2}s",
                output.emoji("✅", "[DONE]"),
                repositories.len(),
                start_time.elapsed().as_secs_f64()
            );
        } else {
            debug!("local mode: skipping listing and cloning");
        }

        if self.read {
            let streamer = FileStreamer::new()?;
            let stdout = io::stdout();
            streamer.stream(Path::new(&self.name), &mut stdout.lock())?;
        }

        Ok(())
    }
}
