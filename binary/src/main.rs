use std::{
    error::Error,
    fmt::Write as _,
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use alpha_relations::{
    discover_maximal_groupings, event_log::ActivitySeparator, import_trace_log_from_path,
    AlphaRelationsConfig,
};
use tracing::Level;

const USAGE: &str = "Usage: alpha-relations <LOG_FILE> [--config <FILE>] [--separator <CHAR>] \
[--parallel] [--relations] [--json] [--output <FILE>] [--verbose]";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    log_path: PathBuf,
    config_path: Option<PathBuf>,
    separator: Option<ActivitySeparator>,
    parallel: bool,
    print_relations: bool,
    json: bool,
    output_path: Option<PathBuf>,
    verbose: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut log_path: Option<PathBuf> = None;
    let mut args_iter = args.into_iter();
    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--parallel" => cli.parallel = true,
            "--relations" => cli.print_relations = true,
            "--json" => cli.json = true,
            "--verbose" | "-v" => cli.verbose = true,
            "--config" | "--output" | "--separator" => {
                let value = args_iter
                    .next()
                    .ok_or_else(|| format!("Missing value for {arg}"))?;
                match arg.as_str() {
                    "--config" => cli.config_path = Some(value.into()),
                    "--output" => cli.output_path = Some(value.into()),
                    _ => {
                        let mut chars = value.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => {
                                cli.separator = Some(ActivitySeparator::Delimiter(c))
                            }
                            _ => return Err(format!("Separator must be a single character, got {value:?}")),
                        }
                    }
                }
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option {flag}")),
            path => {
                if log_path.replace(path.into()).is_some() {
                    return Err("Expected exactly one log file".to_string());
                }
            }
        }
    }
    cli.log_path = log_path.ok_or_else(|| "You should call the program with a log file".to_string())?;
    Ok(cli)
}

fn build_config(cli: &CliArgs) -> Result<AlphaRelationsConfig, Box<dyn Error>> {
    let mut config = match &cli.config_path {
        Some(path) => AlphaRelationsConfig::from_path(path)?,
        None => AlphaRelationsConfig::default(),
    };
    if cli.parallel {
        config.parallel = true;
    }
    if let Some(separator) = cli.separator {
        config.separator = separator;
    }
    Ok(config)
}

fn run(cli: &CliArgs) -> Result<String, Box<dyn Error>> {
    let config = build_config(cli)?;
    tracing::debug!("Using config {:?}", config);
    let log = import_trace_log_from_path(&cli.log_path, config.separator)?;
    let (res, durations) = discover_maximal_groupings(&log, &config)?;
    tracing::debug!("Durations: {:?}", durations);

    if let Some(output_path) = &cli.output_path {
        let mut writer = BufWriter::new(File::create(output_path)?);
        serde_json::to_writer(&mut writer, &res)?;
        writer.flush()?;
        tracing::info!("Wrote output to {:?}", output_path);
    }

    if cli.json {
        return Ok(serde_json::to_string_pretty(&res)?);
    }
    let mut out = String::new();
    if cli.print_relations {
        writeln!(out, "{}", res.footprint)?;
    }
    for grouping in &res.maximal {
        writeln!(out, "{grouping}")?;
    }
    Ok(out)
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match run(&cli) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
