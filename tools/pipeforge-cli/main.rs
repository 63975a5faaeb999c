use clap::{Parser, Subcommand};
use pipeforge::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Compiles visual ETL pipelines into runnable pandas scripts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML file with a [codegen] section
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a pipeline into a Python script
    Compile {
        /// Path to the pipeline JSON file
        pipeline_path: String,
        /// Write the script here instead of printing it
        #[arg(short, long)]
        output: Option<String>,
        /// Write the dependency list to this requirements file
        #[arg(short, long)]
        requirements: Option<String>,
        /// Also save the compiled script as a binary artifact
        #[arg(long)]
        artifact: Option<String>,
    },
    /// Check a pipeline without generating code
    Validate {
        /// Path to the pipeline JSON file
        pipeline_path: String,
    },
    /// List the available components and their fields
    Components,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => CodegenConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load configuration: {}", e))),
        None => CodegenConfig::default(),
    };
    let registry = ComponentRegistry::with_defaults().unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to register built-in components: {}", e))
    });
    debug!(components = registry.len(), "registry ready");

    match cli.command {
        Command::Compile {
            pipeline_path,
            output,
            requirements,
            artifact,
        } => run_compile(
            &registry,
            config,
            &pipeline_path,
            output,
            requirements,
            artifact,
        ),
        Command::Validate { pipeline_path } => run_validate(&registry, config, &pipeline_path),
        Command::Components => list_components(&registry),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_pipeline(registry: &ComponentRegistry, path: &str) -> Pipeline {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read pipeline file '{}': {}", path, e))
    });
    Pipeline::from_json(&json, registry)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load pipeline: {}", e)))
}

fn run_compile(
    registry: &ComponentRegistry,
    config: CodegenConfig,
    pipeline_path: &str,
    output: Option<String>,
    requirements: Option<String>,
    artifact: Option<String>,
) {
    let total_start = Instant::now();
    let pipeline = load_pipeline(registry, pipeline_path);
    info!(path = pipeline_path, nodes = pipeline.nodes.len(), "pipeline loaded");

    let compile_start = Instant::now();
    let compiler = Compiler::builder(registry).with_config(config).build();
    let script = compiler
        .compile(&pipeline)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    let rendered = script.render();
    match &output {
        Some(path) => {
            fs::write(path, &rendered).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write script '{}': {}", path, e))
            });
            println!("  -> Wrote script to '{}'", path);
        }
        None => println!("{}", rendered),
    }

    if let Some(path) = &requirements {
        fs::write(path, script.requirements()).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write requirements '{}': {}", path, e))
        });
        println!("  -> Wrote {} dependencies to '{}'", script.dependencies.len(), path);
    }

    if let Some(path) = &artifact {
        script
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save artifact: {}", e)));
        println!("  -> Saved compiled artifact to '{}'", path);
    }

    if output.is_some() {
        println!("\n--- Compilation Summary ---");
        println!("Nodes:          {}", script.bodies.len());
        println!("Imports:        {}", script.imports.len());
        println!("Dependencies:   {}", script.dependencies.join(", "));
        println!("Compilation:    {:?}", compile_duration);
        println!("Total:          {:?}", total_start.elapsed());
    }
}

fn run_validate(registry: &ComponentRegistry, config: CodegenConfig, pipeline_path: &str) {
    let pipeline = load_pipeline(registry, pipeline_path);
    let compiler = Compiler::builder(registry).with_config(config).build();
    match compiler.validate(&pipeline) {
        Ok(()) => println!("Pipeline '{}' is valid.", pipeline_path),
        Err(CompileError::Validation(report)) => {
            println!("Pipeline '{}' has {} invalid field(s):", pipeline_path, report.len());
            print!("{}", report);
            std::process::exit(1);
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn list_components(registry: &ComponentRegistry) {
    for category in [Category::Input, Category::Transform, Category::Output] {
        let descriptors: Vec<_> = registry.by_category(category).collect();
        if descriptors.is_empty() {
            continue;
        }
        println!("[{}]", category);
        for descriptor in descriptors {
            println!("  {} ({})", descriptor.name, descriptor.id);
            for field in descriptor.schema.fields() {
                let marker = if field.required { "*" } else { " " };
                println!("    {} {:<32} {}", marker, field.id, field.label);
            }
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
