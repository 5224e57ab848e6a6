//! Maven repackager CLI entrypoint.
//!
//! This binary stages an AAR or JAR into a Maven repository layout, zips it,
//! and removes the staging directory.

use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;
use maven_repackager::cli::Cli;
use maven_repackager::config::RepackageConfig;
use maven_repackager::error::Result;
use maven_repackager::pipeline::{plan, repackage, template_provider};
use std::io::Write;

const USAGE_HINT: &str = "Run with -h for usage details";

fn main() {
    let mut stderr = std::io::stderr();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(exit_code_for_parse_error(&err, &mut stderr)),
    };

    init_logging(&cli);
    let exit_code = exit_code_for_run_result(run(&cli, &mut stderr), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = RepackageConfig::from_cli(cli)?;

    if cli.dry_run {
        print_dry_run_info(&config, stderr);
        return Ok(());
    }

    if !cli.quiet {
        write_stderr_line(
            stderr,
            format!("Staging repository in {}...", config.staging_root),
        );
    }

    let templates = template_provider(&config);
    let outcome = repackage(&config, templates.as_ref())?;

    if !cli.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Wrote {} ({} files, {} archive entries)",
                outcome.archive_path,
                outcome.staged.len(),
                outcome.entries.len()
            ),
        );
    }
    Ok(())
}

fn print_dry_run_info(config: &RepackageConfig, stderr: &mut dyn Write) {
    write_stderr_line(stderr, "Dry run - no files will be written");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Input: {} ({})", config.input, config.packaging));
    if let Some(sources) = &config.sources {
        write_stderr_line(stderr, format!("Sources: {sources}"));
    }
    write_stderr_line(stderr, format!("Staging directory: {}", config.staging_root));
    write_stderr_line(stderr, format!("Archive: {}", config.archive_path));
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, "Files to stage:");
    for path in plan(config) {
        write_stderr_line(stderr, format!("  - {path}"));
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn exit_code_for_parse_error(err: &clap::Error, stderr: &mut dyn Write) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp => {
            if err.print().is_err() {
                // Best-effort output; nothing else to report to.
            }
            0
        }
        _ => {
            write_stderr_line(stderr, err);
            write_stderr_line(stderr, USAGE_HINT);
            2
        }
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
