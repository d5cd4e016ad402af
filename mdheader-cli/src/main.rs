use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use mdheader_cli::command::{GenerateOptions, RenamePolicy, generate};
use mdheader_cli::host::TerminalHost;
use mdheader_cli::logging::init_tracing;
use mdheader_core::GeneratorConfig;

const DEFAULT_CONFIG: &str = "mdheader.toml";

/// Generate a front-matter header for a Markdown blog post.
#[derive(Parser, Debug)]
#[command(name = "mdheader", version, about)]
struct Cli {
    /// The post to update.
    file: PathBuf,

    /// Config file (default: ./mdheader.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rename a non-canonical filename without asking.
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "no_rename")]
    rename: bool,

    /// Never offer to rename.
    #[arg(long = "no-rename", action = ArgAction::SetTrue)]
    no_rename: bool,

    /// Print the updated document instead of writing it.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Prompt language: english, chinese, japanese.
    #[arg(long)]
    language: Option<String>,

    /// Model identifier.
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible base URL.
    #[arg(long = "base-url")]
    base_url: Option<String>,

    /// Author written into the header.
    #[arg(long)]
    author: Option<String>,

    /// Emit logs as JSON.
    #[arg(long = "log-json", action = ArgAction::SetTrue)]
    log_json: bool,
}

impl Cli {
    fn rename_policy(&self) -> RenamePolicy {
        if self.rename {
            RenamePolicy::Always
        } else if self.no_rename {
            RenamePolicy::Never
        } else {
            RenamePolicy::Ask
        }
    }

    fn load_config(&self) -> Result<GeneratorConfig> {
        self.load_config_with_fallback(Path::new(DEFAULT_CONFIG))
    }

    /// Defaults, then `--config` or `fallback` if it exists, then the
    /// environment API key, then flags.
    fn load_config_with_fallback(&self, fallback: &Path) -> Result<GeneratorConfig> {
        let config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None if fallback.is_file() => GeneratorConfig::from_file(fallback)
                .with_context(|| format!("failed to load {}", fallback.display()))?,
            None => GeneratorConfig::default(),
        };
        let mut config = config.with_env_api_key();

        if let Some(language) = &self.language {
            config.language.clone_from(language);
        }
        if let Some(model) = &self.model {
            config.openai.model.clone_from(model);
        }
        if let Some(base_url) = &self.base_url {
            config.openai.base_url.clone_from(base_url);
        }
        if let Some(author) = &self.author {
            config.author.clone_from(author);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_tracing(&config.general.log_level, cli.log_json);

    let mut options = GenerateOptions::from_config(&config);
    options.rename = cli.rename_policy();
    options.dry_run = cli.dry_run;

    let mut host = TerminalHost::stdio();
    match generate(&config, &cli.file, &mut host, options).await {
        Ok(outcome) => {
            if cli.dry_run {
                print!("{}", outcome.text);
            }
            Ok(ExitCode::SUCCESS)
        }
        // Already reported through the host.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
