//! # formsmith
//!
//! Generate React form components, zod schemas and TypeScript types from a
//! JSON form configuration.
//!
//! ## Usage
//!
//! ```bash
//! # Write formsmith.toml and a sample form.json
//! formsmith init
//!
//! # Generate the component, schema and types
//! formsmith generate --config form.json --output ./src/forms
//!
//! # Regenerate on every change
//! formsmith generate --config form.json --watch
//!
//! # Fail when generated files are stale
//! formsmith check --config form.json
//!
//! # Validate a submission against the form's rules
//! formsmith validate --config form.json --data submission.json
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use formsmith::emit::{install_command, REQUIRED_PACKAGES};
use formsmith::DefaultValueTree;
use formsmith_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME, SAMPLE_FORM_FILENAME},
    error::{CliError, ConfigError},
    generator::{Drift, FormGenerator},
    loader::{load_data, load_form},
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "formsmith")]
#[command(author, version, about = "Generate React forms, zod schemas and TypeScript types from JSON form configurations", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command reading a form configuration.
#[derive(Args)]
struct FormArgs {
    /// Form configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Settings file path
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Keep unknown field types and missing options instead of rejecting them
    #[arg(long)]
    permissive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the component, schema and types files
    Generate {
        #[command(flatten)]
        form: FormArgs,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Watch the configuration and regenerate on change
        #[arg(short, long)]
        watch: bool,

        /// Preview output without writing files
        #[arg(long)]
        dry_run: bool,

        /// Also write FieldWrapper.tsx and SelectFieldWrapper.tsx
        #[arg(long)]
        with_support: bool,
    },

    /// Check that generated files are up-to-date
    Check {
        #[command(flatten)]
        form: FormArgs,

        /// Directory holding the generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also check FieldWrapper.tsx and SelectFieldWrapper.tsx
        #[arg(long)]
        with_support: bool,
    },

    /// Validate a JSON submission against the form's rules
    Validate {
        #[command(flatten)]
        form: FormArgs,

        /// Submitted values (JSON)
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Print the form's default values as JSON
    Defaults {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Write a formsmith.toml and a sample form configuration
    Init {
        /// Directory to initialize
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// List the npm packages generated code depends on
    Packages,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            form,
            output,
            watch,
            dry_run,
            with_support,
        } => {
            let config = load_config(&form, output, with_support)?;
            if watch {
                run_watch_mode(&form.config, config, dry_run)
            } else {
                run_generate(&FormGenerator::new(config), &form.config, dry_run)
            }
        }

        Commands::Check {
            form,
            output,
            with_support,
        } => cmd_check(&form, load_config(&form, output, with_support)?),

        Commands::Validate { form, data } => cmd_validate(&form, &data),

        Commands::Defaults { form } => cmd_defaults(&form),

        Commands::Init { dir, force } => cmd_init(&dir, force),

        Commands::Packages => {
            cmd_packages();
            Ok(())
        }
    }
}

fn load_config(
    form: &FormArgs,
    output: Option<PathBuf>,
    with_support: bool,
) -> Result<Config, CliError> {
    let config = ConfigManager::load(form.settings.as_deref())?;
    Ok(ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            support: with_support.then_some(true),
            permissive: form.permissive.then_some(true),
        },
    ))
}

/// Compile once and write every output file.
fn run_generate(generator: &FormGenerator, form_path: &Path, dry_run: bool) -> Result<(), CliError> {
    println!(
        "{} {}",
        "Compiling".cyan(),
        form_path.display().to_string().bold()
    );

    let output = generator.generate(form_path)?;
    for warning in &output.compiled.schema.warnings {
        println!("{} {}: {}", "Warning:".yellow(), warning.field, warning.message);
    }

    let writer = FileWriter::new(dry_run);
    for file in &output.files {
        match writer.write(&file.path, &file.content)? {
            WriteResult::Written { path, bytes } => {
                println!("{} {} ({} bytes)", "✓".green(), path.display(), bytes);
            }
            WriteResult::DryRun { content, path } => {
                println!("{} Would write {}:", "[dry-run]".yellow(), path.display());
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

fn run_watch_mode(form_path: &Path, config: Config, dry_run: bool) -> Result<(), CliError> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", form_path.display());
    println!("  Press Ctrl+C to stop\n");

    let generator = FormGenerator::new(config);
    if let Err(e) = run_generate(&generator, form_path, dry_run) {
        print_error(&e);
    }

    let watcher = FileWatcher::new(form_path);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if let Some(message) = event.error_message() {
            println!("{} {}", "Watch error:".red(), message);
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        // nothing is written when the configuration is invalid
        if let Err(e) = run_generate(&generator, form_path, dry_run) {
            print_error(&e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

fn cmd_check(form: &FormArgs, config: Config) -> Result<(), CliError> {
    println!("{}", "Checking generated files...".cyan());

    let drift = FormGenerator::new(config).check(&form.config)?;
    if drift.is_empty() {
        println!("{} Generated files are up-to-date", "✓".green());
        return Ok(());
    }

    for item in &drift {
        let label = match item {
            Drift::Missing(_) => "missing",
            Drift::Changed(_) => "changed",
        };
        println!("  {} {} ({})", "✗".red(), item.path().display(), label);
    }
    println!("  Run 'formsmith generate' to update");
    Err(CliError::Check(format!(
        "{} file(s) out of date",
        drift.len()
    )))
}

fn cmd_validate(form: &FormArgs, data_path: &Path) -> Result<(), CliError> {
    let config = load_config(form, None, false)?;
    let compiled = FormGenerator::new(config).compile_file(&form.config)?;
    let data = load_data(data_path)?;

    let result = compiled.schema.validate(&data);
    if result.is_valid() {
        println!("{} Submission is valid", "✓".green());
        return Ok(());
    }

    for error in result.errors() {
        let field = if error.field.is_empty() {
            "(root)"
        } else {
            error.field.as_str()
        };
        println!(
            "  {} {}: {} {}",
            "✗".red(),
            field.bold(),
            error.message,
            format!("[{}]", error.code).dimmed()
        );
    }
    Err(CliError::Validation(format!(
        "{} field error(s)",
        result.errors().len()
    )))
}

fn cmd_defaults(form: &FormArgs) -> Result<(), CliError> {
    let config = load_config(form, None, false)?;
    let descriptor = load_form(&form.config, config.load_options())?;
    let defaults = DefaultValueTree::for_form(&descriptor);
    let json = serde_json::to_string_pretty(&defaults).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn cmd_init(dir: &Path, force: bool) -> Result<(), CliError> {
    let files = [
        (
            dir.join(CONFIG_FILENAME),
            ConfigManager::default_config_content(),
        ),
        (
            dir.join(SAMPLE_FORM_FILENAME),
            ConfigManager::sample_form_content(),
        ),
    ];

    if !force {
        if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
            return Err(ConfigError::AlreadyExists { path: path.clone() }.into());
        }
    }

    let writer = FileWriter::new(false);
    for (path, content) in &files {
        writer.write(path, content)?;
        println!("{} Created {}", "✓".green(), path.display());
    }
    println!(
        "\nNext: {}",
        format!("formsmith generate --config {}", files[1].0.display()).bold()
    );
    Ok(())
}

fn cmd_packages() {
    println!("{}", "Required packages:".cyan());
    for package in REQUIRED_PACKAGES {
        println!(
            "  {} {} {}",
            package.name.bold(),
            package.version.green(),
            format!("- {}", package.description).dimmed()
        );
    }
    println!("\n{}", install_command());
}

fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
