//! testforge command-line interface

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::path::PathBuf;
use testforge_engine::{CodeInput, EngineFactory, SourceFile, TestGenerationService};
use testforge_types::{
    ComplexityTier, ConfigOverrides, Framework, GenerationConfig, GenerationResult, ModelId,
    ProgressEvent,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn cli() -> Command {
    Command::new("testforge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate prioritized test scenarios from source code")
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(
            Command::new("generate")
                .about("Analyze source files and print the generation result as JSON")
                .arg(
                    Arg::new("files")
                        .num_args(0..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Source files; reads stdin when none are given"),
                )
                .arg(
                    Arg::new("framework")
                        .long("framework")
                        .short('f')
                        .help("Framework key (react, vue, angular, nodejs, python)"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .short('m')
                        .help("Model id (gpt-4, claude, gemini, local)"),
                )
                .arg(
                    Arg::new("complexity")
                        .long("complexity")
                        .help("Complexity tier (basic, medium, advanced)"),
                )
                .arg(
                    Arg::new("focus")
                        .long("focus")
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .help("Focus areas, comma separated"),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .short('c')
                        .help("Free-form application context"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("budget")
                        .long("budget")
                        .value_parser(value_parser!(u32).range(1..))
                        .help("Time budget in minutes"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print the JSON result"),
                )
                .arg(
                    Arg::new("progress")
                        .long("progress")
                        .action(ArgAction::SetTrue)
                        .help("Print stage progress to stderr"),
                ),
        )
        .subcommand(Command::new("frameworks").about("List supported frameworks and models"))
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(args: &ArgMatches) -> Result<GenerationConfig> {
    let base = match args.get_one::<PathBuf>("config") {
        Some(path) => GenerationConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GenerationConfig::default(),
    };

    let overrides = ConfigOverrides {
        framework: args
            .get_one::<String>("framework")
            .map(|s| Framework::from(s.as_str())),
        model_id: args
            .get_one::<String>("model")
            .map(|s| ModelId::from(s.as_str())),
        complexity: args
            .get_one::<String>("complexity")
            .map(|s| s.parse::<ComplexityTier>())
            .transpose()?,
        focus_areas: args
            .get_many::<String>("focus")
            .map(|areas| areas.cloned().collect()),
        time_budget_minutes: args.get_one::<u32>("budget").copied(),
        ..ConfigOverrides::default()
    };
    Ok(base.merged(&overrides))
}

fn read_input(args: &ArgMatches) -> Result<CodeInput> {
    let Some(paths) = args.get_many::<PathBuf>("files") else {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading source from stdin")?;
        return Ok(CodeInput::Text(text));
    };

    let files = paths
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(SourceFile::new(path.display().to_string(), content))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CodeInput::Files(files))
}

fn print_result(result: &GenerationResult, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

async fn generate(args: &ArgMatches) -> Result<i32> {
    let config = load_config(args)?;
    let pretty = args.get_flag("pretty");

    let mut service = TestGenerationService::new();
    if let Err(e) = service.initialize(config) {
        tracing::error!(error = %e, "engine construction failed");
        print_result(&GenerationResult::failed(e.to_string()), pretty)?;
        return Ok(1);
    }

    let input = read_input(args)?;
    let context = args.get_one::<String>("context").map(String::as_str);

    let result = if args.get_flag("progress") {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();
        let printer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                eprintln!("[{:>3}%] {}", event.percent, event.label);
            }
        });
        let result = service.generate_tests(input, context, Some(&tx)).await;
        drop(tx);
        let _ = printer.await;
        result
    } else {
        service.generate_tests(input, context, None).await
    };

    print_result(&result, pretty)?;
    Ok(if result.success { 0 } else { 1 })
}

fn list_supported() {
    println!("Frameworks:");
    for framework in EngineFactory::supported_frameworks() {
        println!("  {framework}");
    }
    println!("Models:");
    for model in EngineFactory::supported_models() {
        println!("  {model}");
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("json-logs"));

    let outcome = match matches.subcommand() {
        Some(("generate", args)) => generate(args).await,
        Some(("frameworks", _)) => {
            list_supported();
            Ok(0)
        }
        _ => cli().print_help().map(|()| 0).map_err(Into::into),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}
