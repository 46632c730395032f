use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;

use dbdrift_catalog::{CatalogSource, PostgresCatalog};
use dbdrift_core::{Config, DbConfig, Report};
use dbdrift_engine::compare_databases;

/// dbdrift - structural drift detection between two PostgreSQL databases
///
/// Connects to two databases, compares their base-table schemas and
/// writes a drift report. Useful for migration verification, replica
/// audits and environment-parity checks.
#[derive(Parser)]
#[command(name = "dbdrift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison between the two configured databases
    Compare {
        /// Path to the configuration file
        #[arg(short, long, default_value = "./dbdrift.json")]
        config: PathBuf,

        /// Directory where the report file is written
        #[arg(short, long, default_value = "./")]
        output: PathBuf,

        /// Report file name (without extension)
        #[arg(short, long, default_value = "comparison_result")]
        name: String,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        /// Connect with TLS
        #[arg(long)]
        tls: bool,
    },

    /// Generate a configuration file or a DSN
    #[command(alias = "g")]
    Generate {
        #[command(subcommand)]
        target: GenerateTarget,
    },
}

#[derive(Subcommand)]
enum GenerateTarget {
    /// Print a data source name assembled from connection settings
    Dsn {
        /// Database server hostname or IP address
        #[arg(short = 's', long)]
        host: String,

        /// Username for database authentication
        #[arg(short, long)]
        user: String,

        /// Password for database authentication
        #[arg(short = 'a', long)]
        password: String,

        /// Name of the database to connect to
        #[arg(short, long)]
        database: String,

        /// Port number for the database connection
        #[arg(short, long, default_value_t = 5432)]
        port: u16,

        /// Optional connection parameters (e.g. --param sslmode=require)
        #[arg(short = 'e', long = "param")]
        params: Vec<String>,
    },

    /// Write a template configuration file
    Config {
        /// Path of the generated file
        #[arg(short, long, default_value = "./dbdrift.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            config,
            output,
            name,
            format,
            tls,
        } => compare_command(&config, &output, &name, format, tls, cli.verbose).await,
        Commands::Generate { target } => match target {
            GenerateTarget::Dsn {
                host,
                user,
                password,
                database,
                port,
                params,
            } => dsn_command(host, user, password, database, port, &params),
            GenerateTarget::Config { output } => config_command(&output),
        },
    }
}

async fn compare_command(
    config_path: &PathBuf,
    output: &PathBuf,
    name: &str,
    format: ReportFormat,
    tls: bool,
    verbose: bool,
) -> Result<()> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("reading configuration file {}", config_path.display()))?;

    let left = connect(&config.db1, tls, verbose).await?;
    let right = connect(&config.db2, tls, verbose).await?;

    if verbose {
        eprintln!("{}", "Running comparison...".cyan());
    }

    let result = compare_databases(&left, &right)
        .await
        .context("database comparison failed")?;

    eprintln!("{}", "✔ Comparison finished".green());

    let report = Report::new(result, &config.db1.name, &config.db2.name);

    let rendered = match format {
        ReportFormat::Csv => report.to_csv(),
        ReportFormat::Json => report.to_json().context("serializing report")?,
    };

    let path = output.join(format!("{}.{}", name, format.extension()));
    std::fs::write(&path, rendered)
        .with_context(|| format!("saving report to {}", path.display()))?;

    eprintln!(
        "{} {}",
        "✔ Report saved to".green(),
        path.display()
    );

    print_summary(&report);

    Ok(())
}

async fn connect(db: &DbConfig, tls: bool, verbose: bool) -> Result<PostgresCatalog> {
    if verbose {
        eprintln!("{} {}...", "Connecting to".cyan(), db.name);
    }

    let catalog = if tls {
        PostgresCatalog::connect_tls(db).await
    } else {
        PostgresCatalog::connect(db).await
    }
    .with_context(|| format!("connecting to {}", db.name))?;

    eprintln!("{} {}", "✔ Connected to".green(), catalog.name());
    Ok(catalog)
}

fn print_summary(report: &Report) {
    println!();
    println!("{}", "Drift summary".bold());
    println!(
        "  Tables missing in {}: {}",
        report.left, report.summary.missing_in_left
    );
    println!(
        "  Tables missing in {}: {}",
        report.right, report.summary.missing_in_right
    );
    println!("  Column differences:    {}", report.summary.column_diffs);

    if report.result.has_drift() {
        println!(
            "{}",
            format!("{} differences detected", report.summary.total)
                .yellow()
                .bold()
        );
    } else {
        println!("{}", "✓ No drift detected".green().bold());
    }
}

fn dsn_command(
    host: String,
    user: String,
    password: String,
    database: String,
    port: u16,
    params: &[String],
) -> Result<()> {
    let mut params_map = HashMap::new();
    for param in params {
        let (key, value) = param.split_once('=').with_context(|| {
            format!("param value must be in the format key=value, got: {}", param)
        })?;
        params_map.insert(key.to_string(), value.to_string());
    }

    let db = DbConfig {
        name: String::new(),
        host,
        port,
        database,
        username: user,
        password,
        params: params_map,
    };

    println!("DSN: {:?}", db.dsn());
    Ok(())
}

fn config_command(output: &PathBuf) -> Result<()> {
    let template = Config::template()
        .to_json()
        .context("serializing configuration template")?;

    std::fs::write(output, template)
        .with_context(|| format!("writing configuration file {}", output.display()))?;

    println!(
        "{} {}",
        "✔ Configuration template written to".green(),
        output.display()
    );
    println!("Fill in the connection settings before running `dbdrift compare`.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
