use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dcm_app::{AppError, AppResult, OutputFormat, SessionOverrides};
use dcm_sim::IntegrationMethod;

#[derive(Parser)]
#[command(name = "dcm-cli")]
#[command(about = "Shunt DC motor simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the stdin/stdout stepping protocol
    ///
    /// Prints `ia` and `w` on separate lines, then reads `Vt Tlc Tlw` and
    /// advances one sample, until stdin closes.
    Serve {
        /// Project file (YAML or JSON); built-in reference motor if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Integration method: euler, trapezoidal, rk4 (or 0, 1, 2)
        #[arg(short, long)]
        method: Option<String>,
        /// Integration step in seconds
        #[arg(long)]
        step: Option<f64>,
        /// Integration steps per input sample
        #[arg(long)]
        steps_per_sample: Option<u32>,
    },
    /// Run the project's scenario and export the logbook
    Run {
        /// Project file (YAML or JSON); built-in speed-control scenario if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Validate a project file
    Validate {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Write the built-in configuration to a new project file
    Init {
        /// Destination (.yaml, .yml or .json)
        project_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> AppResult<()> {
    // stdout carries the console protocol, so logs go to stderr
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            method,
            step,
            steps_per_sample,
        } => cmd_serve(
            config.as_deref(),
            SessionOverrides {
                method,
                step,
                steps_per_sample,
            },
        ),
        Commands::Run {
            config,
            output,
            format,
        } => cmd_run(config.as_deref(), output.as_deref(), format.into()),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Init {
            project_path,
            force,
        } => cmd_init(&project_path, force),
    }
}

fn cmd_serve(config: Option<&Path>, overrides: SessionOverrides) -> AppResult<()> {
    tracing::debug!(?config, ?overrides, "serve");
    let project = dcm_app::load_project(config)?;
    let project = dcm_app::apply_overrides(project, &overrides)?;
    let mut session = dcm_app::build_session(&project)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    dcm_app::run_console(&mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn cmd_run(config: Option<&Path>, output: Option<&Path>, format: OutputFormat) -> AppResult<()> {
    let project = dcm_app::load_project(config)?;
    let logbook = dcm_app::run_scenario(&project)?;

    match output {
        Some(path) => {
            dcm_app::write_logbook(path, &logbook, format)?;
            eprintln!("✓ Wrote {} samples to {}", logbook.len(), path.display());
        }
        None => {
            let content = dcm_app::render_logbook(&logbook, format)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = dcm_app::load_project(Some(project_path))?;
    let method = dcm_project::parse_method(&project.simulation.method)?;
    println!("✓ Project is valid");
    println!(
        "  {}: h = {} s, kh = {}, method = {}",
        project.name,
        project.simulation.h,
        project.simulation.kh,
        describe(method)
    );
    Ok(())
}

fn cmd_init(project_path: &Path, force: bool) -> AppResult<()> {
    if project_path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            project_path.display()
        )));
    }
    dcm_project::save(project_path, &dcm_project::default_config())?;
    println!("✓ Wrote default project to {}", project_path.display());
    Ok(())
}

fn describe(method: IntegrationMethod) -> String {
    format!("{} (order {})", method, method.order())
}
