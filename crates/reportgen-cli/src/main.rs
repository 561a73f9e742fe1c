//! reportgen CLI - render a report declared in a metadata workbook

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use reportgen::prelude::*;
use reportgen::{
    AccessToken, ExportClient, JwtBearerConfig, DEFAULT_AUDIENCE, DEFAULT_METADATA_FILE,
    DEFAULT_TOKEN_URL,
};

#[derive(Parser)]
#[command(name = "reportgen")]
#[command(
    author,
    version,
    about = "Render a metadata-driven report to XLSX, PDF or HTML"
)]
struct Cli {
    /// Report name as listed in the metadata workbook
    report_name: String,

    /// Metadata workbook with `Columns` and `Reports` sheets
    #[arg(short, long, env = "REPORTGEN_METADATA", default_value = DEFAULT_METADATA_FILE)]
    metadata: PathBuf,

    /// Directory for the rendered document
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Data source to use instead of the one declared in metadata (csv, xlsx)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output format, overriding the report's `Output Target`
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Download this remote report id and use it as the data source
    #[arg(long, conflicts_with = "source")]
    export_id: Option<String>,

    /// Bearer token for --export-id; without one the JWT sign-in is used
    #[arg(long, env = "REPORTGEN_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Instance URL for --access-token
    #[arg(long, env = "REPORTGEN_INSTANCE_URL")]
    instance_url: Option<String>,

    /// Connected app client id for the JWT sign-in
    #[arg(long, env = "REPORTGEN_CLIENT_ID")]
    client_id: Option<String>,

    /// User to sign in as
    #[arg(long, env = "REPORTGEN_USERNAME")]
    username: Option<String>,

    /// RSA private key (PEM) that signs the JWT assertion
    #[arg(long, env = "REPORTGEN_PRIVATE_KEY")]
    private_key: Option<PathBuf>,

    /// OAuth token endpoint
    #[arg(long, env = "REPORTGEN_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    token_url: String,

    /// Audience claim of the JWT assertion
    #[arg(long, env = "REPORTGEN_AUDIENCE", default_value = DEFAULT_AUDIENCE)]
    audience: String,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Xlsx,
    Pdf,
    Html,
}

impl From<Format> for OutputTarget {
    fn from(format: Format) -> Self {
        match format {
            Format::Xlsx => OutputTarget::Xlsx,
            Format::Pdf => OutputTarget::Pdf,
            Format::Html => OutputTarget::Html,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            println!("Generated {}", report.path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("reportgen: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<RenderedReport> {
    let mut options = render_options(cli);

    if let Some(report_id) = &cli.export_id {
        let path = export_source(cli, report_id, &options.output_dir)?;
        log::info!("Using exported report {} as data source", path.display());
        options.source_override = Some(path);
    }

    render_report(&cli.report_name, &options)
        .with_context(|| format!("Failed to render report '{}'", cli.report_name))
}

fn render_options(cli: &Cli) -> RenderOptions {
    RenderOptions {
        metadata_path: cli.metadata.clone(),
        output_dir: cli.output_dir.clone(),
        source_override: cli.source.clone(),
        target_override: cli.format.map(OutputTarget::from),
    }
}

/// Token given on the command line, if any
fn provided_token(cli: &Cli) -> Option<AccessToken> {
    let token = cli.access_token.as_deref().filter(|t| !t.trim().is_empty())?;
    Some(AccessToken::new(
        token,
        cli.instance_url.as_deref().unwrap_or_default(),
    ))
}

fn jwt_config(cli: &Cli) -> Result<JwtBearerConfig> {
    let (Some(client_id), Some(username), Some(private_key)) =
        (&cli.client_id, &cli.username, &cli.private_key)
    else {
        bail!("--export-id needs --access-token, or --client-id, --username and --private-key");
    };
    Ok(JwtBearerConfig::new(client_id, username, private_key)
        .with_audience(&cli.audience)
        .with_token_url(&cli.token_url))
}

fn export_source(cli: &Cli, report_id: &str, dest_dir: &Path) -> Result<PathBuf> {
    let token = match provided_token(cli) {
        Some(token) => token,
        None => jwt_config(cli)?
            .authenticate()
            .context("JWT sign-in failed")?,
    };
    let client = ExportClient::new().context("Failed to create HTTP client")?;
    client
        .export_report(&token, report_id, dest_dir)
        .with_context(|| format!("Failed to export report {}", report_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["reportgen", "Employee Survey"]).unwrap();
        let options = render_options(&cli);

        assert_eq!(cli.report_name, "Employee Survey");
        assert_eq!(options.output_dir, PathBuf::from("."));
        assert_eq!(options.source_override, None);
        assert_eq!(options.target_override, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "reportgen",
            "Sales",
            "--format",
            "pdf",
            "-s",
            "q1.xlsx",
            "-o",
            "out",
            "-vv",
        ])
        .unwrap();
        let options = render_options(&cli);

        assert_eq!(options.target_override, Some(OutputTarget::Pdf));
        assert_eq!(options.source_override, Some(PathBuf::from("q1.xlsx")));
        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_report_name_required() {
        assert!(Cli::try_parse_from(["reportgen"]).is_err());
    }

    #[test]
    fn test_access_token_skips_jwt_sign_in() {
        let cli = Cli::try_parse_from([
            "reportgen",
            "Sales",
            "--export-id",
            "00O5e000008abcdEAA",
            "--access-token",
            "00Dxx!token",
            "--instance-url",
            "https://example.my.salesforce.com",
        ])
        .unwrap();
        assert_eq!(
            provided_token(&cli),
            Some(AccessToken::new("00Dxx!token", "https://example.my.salesforce.com"))
        );
    }

    #[test]
    fn test_jwt_config_from_args() {
        let cli = Cli::try_parse_from([
            "reportgen",
            "Sales",
            "--client-id",
            "client",
            "--username",
            "reports@example.com",
            "--private-key",
            "key.pem",
            "--token-url",
            "https://login.example.com/services/oauth2/token",
        ])
        .unwrap();
        let config = jwt_config(&cli).unwrap();

        assert_eq!(config.client_id, "client");
        assert_eq!(config.username, "reports@example.com");
        assert_eq!(config.private_key, PathBuf::from("key.pem"));
        assert_eq!(config.token_url, "https://login.example.com/services/oauth2/token");
        assert_eq!(config.audience, DEFAULT_AUDIENCE);
    }

    #[test]
    fn test_jwt_config_requires_key() {
        let cli = Cli::try_parse_from(["reportgen", "Sales", "--client-id", "client"]).unwrap();
        assert!(jwt_config(&cli).is_err());
    }

    #[test]
    fn test_export_conflicts_with_source() {
        assert!(Cli::try_parse_from([
            "reportgen",
            "Sales",
            "--export-id",
            "00O5e000008abcdEAA",
            "--source",
            "a.csv"
        ])
        .is_err());
    }
}
