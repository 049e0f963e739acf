use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ghverify::{
    ConfigLoader, ConsoleReporter, EnvSource, ReqwestTransport, VerificationReport, Verifier,
    VerifyError,
};

#[derive(Parser)]
#[command(name = "ghverify")]
#[command(about = "Verify the answer and reference files of a GitHub repository")]
#[command(version)]
struct Cli {
    /// YAML file overriding the built-in configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Env file holding the token and organization variables
    #[arg(long)]
    env_file: Option<String>,

    /// Branch or ref to fetch files from
    #[arg(short, long)]
    branch: Option<String>,

    /// Output format for the final report
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("ghverify=debug,warn")
    } else {
        EnvFilter::new("ghverify=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            print_error(e);
            ExitCode::FAILURE
        }
    }
}

fn print_error(err: Box<dyn std::error::Error>) {
    if let Some(VerifyError::InvalidPattern { pattern, .. }) = err.downcast_ref::<VerifyError>() {
        eprintln!("\x1b[31m✗ Error:\x1b[0m {}", err);
        eprintln!("\n\x1b[33mSuggestion:\x1b[0m");
        eprintln!("  Check files.answer_file.content_schema.pattern: {}", pattern);
        return;
    }

    eprintln!("\x1b[31m✗ Error:\x1b[0m {}", err);
}

async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    if let Some(env_file) = cli.env_file {
        config = config.with_env_file(env_file);
    }
    if let Some(branch) = cli.branch {
        config = config.with_branch(branch);
    }
    config.validate()?;

    debug!("Verifying {} on branch {}", config.repo.repo_name, config.repo.target_branch);

    let env = EnvSource::load(&config.env.env_file);
    let transport = ReqwestTransport::new()?;
    let verifier = Verifier::new(&config, &transport)?;

    let mut reporter = ConsoleReporter::new();
    let report = verifier.run(&env, &mut reporter).await;

    if cli.output == OutputFormat::Json {
        print_json_report(&report)?;
    }

    Ok(report.success)
}

fn print_json_report(report: &VerificationReport) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
