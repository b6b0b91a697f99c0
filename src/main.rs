use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use treequill::config::{Config, OutputFormat};
use treequill::document::node::TreeValue;
use treequill::document::parser::parse_value_literal;
use treequill::document::tree::DataTree;
use treequill::file::loader::{load_shape_file, load_text_file, load_tree_file, load_tree_from_stdin};
use treequill::file::saver::{save_tree_file, serialize_tree};
use treequill::shape::check_full_requirements;
use treequill::template::{data_resolver, placeholders, Interpolator};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "TREEQUILL_LOG";

/// TreeQuill - dot-path access, templating and shape checks for YAML/JSON trees
#[derive(Parser)]
#[command(name = "treequill")]
#[command(version)]
#[command(about = "Dot-path access, templating and shape checks for YAML/JSON trees", long_about = None)]
struct Cli {
    /// Output format for printed trees (overrides the config file)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at a dot path
    Get {
        /// Data file (`-` reads stdin)
        file: String,
        path: String,
    },
    /// Test whether a dot path exists; exits with status 1 if it does not
    Has {
        /// Data file (`-` reads stdin)
        file: String,
        path: String,
        /// Count an explicit null as present
        #[arg(long)]
        allow_null: bool,
    },
    /// Write a value at a dot path, creating intermediate maps
    Set {
        /// Data file (`-` reads stdin)
        file: String,
        path: String,
        /// YAML literal; anything that does not parse, or is blank, is stored as a string (`~` for null)
        value: String,
        /// Save to this file instead of printing the result
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Fill `{{ path }}` placeholders from a data file
    Render {
        /// Data file (`-` reads stdin)
        file: String,
        /// Template text
        #[arg(short, long, conflicts_with = "template_file", required_unless_present = "template_file")]
        template: Option<String>,
        /// File holding the template text
        #[arg(long)]
        template_file: Option<String>,
        /// Leave unresolved placeholders in the output
        #[arg(long)]
        keep_unknown: bool,
    },
    /// Validate a data file against a shape; exits with status 1 on failure
    Check {
        /// Data file (`-` reads stdin)
        file: String,
        /// Shape file: a mapping of path to types, or a list of alternatives
        #[arg(short, long)]
        shape: String,
    },
    /// List the placeholders of a template with their fallback paths
    Placeholders {
        template: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn load_data(file: &str, config: &Config) -> Result<DataTree> {
    let value = if file == "-" {
        load_tree_from_stdin(&config.lineage)?
    } else {
        load_tree_file(file, &config.lineage)?
    };
    Ok(DataTree::new(value))
}

fn print_tree(value: &TreeValue, config: &Config) -> Result<()> {
    let text = serialize_tree(value, config.output_format, config.indent_size)?;
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", text)?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load();
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    debug!(?config, "loaded configuration");

    match cli.command {
        Command::Get { file, path } => {
            let data = load_data(&file, &config)?;
            match data.get(&path) {
                Some(value) => {
                    print_tree(value, &config)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("No value at '{}'", path);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Has {
            file,
            path,
            allow_null,
        } => {
            let data = load_data(&file, &config)?;
            let found = if allow_null {
                data.has_allow_null(&path)
            } else {
                data.has(&path)
            };
            println!("{}", found);
            Ok(if found { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Set {
            file,
            path,
            value,
            output,
        } => {
            let mut data = load_data(&file, &config)?;
            data.set(&path, parse_value_literal(&value))?;
            match output {
                Some(target) => save_tree_file(&target, data.value(), &config)
                    .with_context(|| format!("Failed to save {}", target))?,
                None => print_tree(data.value(), &config)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Render {
            file,
            template,
            template_file,
            keep_unknown,
        } => {
            let data = load_data(&file, &config)?;
            let template = match (template, template_file) {
                (Some(text), _) => text,
                (None, Some(path)) => load_text_file(&path)?,
                (None, None) => anyhow::bail!("Either --template or --template-file is required"),
            };
            let interpolator = if keep_unknown {
                Interpolator::new(false)
            } else {
                config.interpolator()
            };
            let rendered = interpolator.interpolate(&template, &mut data_resolver(&data));
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file, shape } => {
            let data = load_data(&file, &config)?;
            let definition = load_shape_file(&shape)?;
            let outcome = check_full_requirements(&definition, &data);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(if outcome.result {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Placeholders { template } => {
            for placeholder in placeholders(&template) {
                println!("{}\t{}", placeholder.text, placeholder.candidates.join(" | "));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    init_tracing();
    run(Cli::parse())
}
