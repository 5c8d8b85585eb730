mod commands;
mod core;
mod release;

use clap::Parser;
use core::error::{ShipError, print_error};
use std::path::PathBuf;

/// Publish a desktop release: bump manifests, bind the signed installer,
/// rewrite the auto-update feed, and cut the hosted release
#[derive(Parser)]
#[command(name = "shipway")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Semver to apply to package.json, Cargo.toml, tauri.conf.json, and the update feed
  #[arg(value_name = "VERSION")]
  release_version: String,

  /// Release notes for the update feed and the hosted release body
  #[arg(long, value_name = "TEXT")]
  notes: Option<String>,

  /// Read release notes from a file instead of --notes
  #[arg(long, value_name = "FILE")]
  notes_file: Option<PathBuf>,

  /// RFC3339 publish timestamp (defaults to the current UTC time)
  #[arg(long, value_name = "TIMESTAMP")]
  pub_date: Option<String>,

  /// Skip `npm run tauri build` (only when the installer already exists)
  #[arg(long)]
  skip_build: bool,

  /// Explicit path to the built installer
  #[arg(long, value_name = "PATH")]
  artifact: Option<PathBuf>,

  /// Directory that contains the generated installers
  #[arg(long, value_name = "DIR", default_value = core::config::DEFAULT_BUNDLE_DIR)]
  bundle_dir: PathBuf,

  /// Update feed file to rewrite
  #[arg(long, value_name = "FILE", default_value = core::config::DEFAULT_FEED_PATH)]
  feed: PathBuf,

  /// Override the base download URL (example: https://github.com/acme/cooler/releases/download)
  #[arg(long, value_name = "URL")]
  download_base: Option<String>,

  /// Do not create a hosted release with gh
  #[arg(long)]
  skip_release: bool,

  /// Do not commit and push the updated feed
  #[arg(long)]
  skip_push: bool,

  /// Print the run summary as JSON
  #[arg(long)]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // Build the run configuration once at the process boundary; the pipeline
  // never reads ambient state after this point.
  let notes = match core::config::resolve_notes(cli.notes, cli.notes_file) {
    Ok(notes) => notes,
    Err(err) => handle_error(err),
  };

  let config = core::config::ReleaseConfig {
    version: cli.release_version,
    notes,
    pub_date: cli.pub_date,
    skip_build: cli.skip_build,
    artifact_path: cli.artifact,
    bundle_dir: cli.bundle_dir,
    feed_path: cli.feed,
    download_base: cli.download_base,
    skip_release: cli.skip_release,
    skip_push: cli.skip_push,
  };

  if let Err(err) = commands::run_release(&root, &config, cli.json) {
    handle_error(err);
  }
}

fn handle_error(err: ShipError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code());
}
