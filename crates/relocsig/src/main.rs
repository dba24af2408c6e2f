use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod config;
mod logging;
mod rename;
mod render;
mod report;
mod signature;

use config::{OutputFormat, RelocsigConfig};
use rename::Renamer;
use signature::{ParsedSignature, SignatureKind};

/// JVM signature inspector for class relocation.
#[derive(Parser)]
#[command(
    name = "relocsig",
    version,
    about,
    long_about = "JVM signature inspector for class relocation.\n\nParses generic signatures, lists the classes they mention, rewrites them\nunder a rename map, and shows the reflection lookups a relocator tracks.\n\nExamples:\n  relocsig parse method '<T:Ljava/lang/Object;>(TT;)V'\n  relocsig classes type 'Ljava/util/Map<Ljava/lang/String;TV;>;'\n  relocsig rename type 'Lcom/example/Foo;' --map com/example/Foo=shaded/Foo\n  relocsig reflection --format json"
)]
struct Cli {
    /// Path to Relocsig.toml (default: nearest one above the current directory).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (default: [output] format from Relocsig.toml, else text).
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a signature and show its structure.
    Parse {
        #[arg(value_enum)]
        kind: SignatureKind,
        text: String,
    },
    /// List the distinct class names a signature mentions.
    Classes {
        #[arg(value_enum)]
        kind: SignatureKind,
        text: String,
    },
    /// Rewrite a signature with classes renamed.
    Rename {
        #[arg(value_enum)]
        kind: SignatureKind,
        text: String,
        /// Extra OLD=NEW rename, applied over the [rename] table.
        #[arg(short, long = "map", value_parser = rename::parse_mapping)]
        mappings: Vec<(String, String)>,
    },
    /// List the reflection lookups tracked during relocation.
    Reflection,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match config::resolve_config(cli.config.as_deref(), &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "loaded config");
    }
    let format = cli.format.unwrap_or(config.output.format);

    let output = match &cli.command {
        Command::Parse { kind, text } => {
            let parsed = parse_or_exit(*kind, text);
            render::parse_output(&parsed, format)
        }
        Command::Classes { kind, text } => {
            let parsed = parse_or_exit(*kind, text);
            render::classes_output(&parsed, format)
        }
        Command::Rename {
            kind,
            text,
            mappings,
        } => {
            let parsed = parse_or_exit(*kind, text);
            let mut map = config.rename.clone();
            map.extend(mappings.iter().cloned());
            let renamed = match Renamer::new(&map).signature(&parsed) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            };
            render::rename_output(&parsed, &renamed, format)
        }
        Command::Reflection => {
            let mappings = reflection_or_exit(&config);
            render::reflection_output(&mappings, format)
        }
    };

    match output {
        Ok(text) if text.is_empty() => {}
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("error: failed to serialize output: {}", e);
            process::exit(1);
        }
    }
}

fn parse_or_exit(kind: SignatureKind, text: &str) -> ParsedSignature {
    match ParsedSignature::parse(kind, text) {
        Ok(parsed) => parsed,
        Err(e) => {
            report::print_signature_error(&e, text);
            process::exit(1);
        }
    }
}

fn reflection_or_exit(config: &RelocsigConfig) -> relocator_reflect::ReflectionMappings {
    match config.reflection_mappings() {
        Ok(mappings) => mappings,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
