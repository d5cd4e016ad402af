//! The `generate` command: filename check, optional rename, metadata
//! generation and header update, run as one linear sequence.
//!
//! ```text
//! Idle → AnalyzingFilename ─┬─► PromptingRename ─┬─► Renaming → Renamed ─┐
//!                           │                    └─► SkipRename ─────────┤
//!                           └────────────────────────────────────────────┤
//!                                                                        ▼
//!        Done ◄─ UpdatingDocument ◄─ ComposingHeader ◄─ GeneratingMetadata
//! ```
//!
//! Any step can end in `Error`; nothing is retried.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use mdheader_core::config::GeneratorConfig;
use mdheader_core::filename::{canonical_file_name, format_date, is_markdown, today};
use mdheader_core::header::compose_header;
use mdheader_core::{Document, FrontMatter};
use mdheader_llm::{LlmClient, MetadataOptions};
use tracing::{debug, info, warn};

use crate::error::GenerateError;
use crate::host::EditorHost;

/// Where the command is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Not started.
    Idle,
    /// Reading date and title from the filename.
    AnalyzingFilename,
    /// Waiting for the user to accept or decline a rename.
    PromptingRename,
    /// Moving the file on disk.
    Renaming,
    /// The file now has its canonical name.
    Renamed,
    /// The rename was declined or not offered.
    SkipRename,
    /// Waiting on the completion endpoint.
    GeneratingMetadata,
    /// Rendering the header block.
    ComposingHeader,
    /// Splicing the header into the document and saving it.
    UpdatingDocument,
    /// Finished.
    Done,
    /// Stopped on an error.
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AnalyzingFilename => "analyzing_filename",
            Self::PromptingRename => "prompting_rename",
            Self::Renaming => "renaming",
            Self::Renamed => "renamed",
            Self::SkipRename => "skip_rename",
            Self::GeneratingMetadata => "generating_metadata",
            Self::ComposingHeader => "composing_header",
            Self::UpdatingDocument => "updating_document",
            Self::Done => "done",
            Self::Error => "error",
        };
        write!(f, "{name}")
    }
}

/// What to do when the filename is not canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenamePolicy {
    /// Ask the host.
    #[default]
    Ask,
    /// Rename without asking.
    Always,
    /// Never rename.
    Never,
}

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Author written into the header.
    pub author: String,
    /// Language and limits for the model.
    pub metadata: MetadataOptions,
    /// Rename behaviour for non-canonical filenames.
    pub rename: RenamePolicy,
    /// Build the new text without renaming or writing anything.
    pub dry_run: bool,
    /// Date used for the header default and the suggested filename.
    pub today: NaiveDate,
}

impl GenerateOptions {
    /// Options from configuration, dated today.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            author: config.author.clone(),
            metadata: MetadataOptions::from_config(config),
            rename: RenamePolicy::Ask,
            dry_run: false,
            today: today(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Final location of the post.
    pub path: PathBuf,
    /// Whether the file was renamed.
    pub renamed: bool,
    /// Header fields that were written.
    pub front_matter: FrontMatter,
    /// Full document text after the update.
    pub text: String,
    /// Every stage visited, in order.
    pub stages: Vec<Stage>,
}

/// One execution of the command.
pub struct GenerateHeader<'a, H: EditorHost> {
    client: &'a LlmClient,
    host: &'a mut H,
    options: GenerateOptions,
    stages: Vec<Stage>,
}

impl<'a, H: EditorHost> GenerateHeader<'a, H> {
    /// Prepare a run.
    pub fn new(client: &'a LlmClient, host: &'a mut H, options: GenerateOptions) -> Self {
        Self {
            client,
            host,
            options,
            stages: vec![Stage::Idle],
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug!(%stage, "stage");
        self.stages.push(stage);
    }

    /// Run against the post at `path`.
    ///
    /// # Errors
    ///
    /// Returns the first failure; the host has already been told about it.
    pub async fn run(mut self, path: &Path) -> Result<GenerateOutcome, GenerateError> {
        match self.execute(path).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.enter(Stage::Error);
                warn!(error = %err, "header generation failed");
                self.host.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn execute(&mut self, path: &Path) -> Result<GenerateOutcome, GenerateError> {
        let mut doc = Document::open(path)?;

        self.enter(Stage::AnalyzingFilename);
        let parsed = doc.parsed_name()?;
        let mut renamed = false;

        if !parsed.is_valid_format {
            let suggested = canonical_file_name(&parsed.title, self.options.today);
            let confirmed = if self.options.dry_run {
                info!(suggested = %suggested, "dry run: not renaming");
                false
            } else {
                self.enter(Stage::PromptingRename);
                match self.options.rename {
                    RenamePolicy::Ask => self.host.confirm_rename(doc.file_name()?, &suggested)?,
                    RenamePolicy::Always => true,
                    RenamePolicy::Never => false,
                }
            };

            if confirmed {
                self.enter(Stage::Renaming);
                doc = doc.rename(&suggested).map_err(GenerateError::Rename)?;
                self.enter(Stage::Renamed);
                renamed = true;
                self.host.info("File renamed successfully!");
            } else {
                self.enter(Stage::SkipRename);
            }
        }

        self.enter(Stage::GeneratingMetadata);
        let metadata = self
            .client
            .generate_metadata(doc.body(), &self.options.metadata)
            .await?;

        self.enter(Stage::ComposingHeader);
        let date = parsed
            .date
            .unwrap_or_else(|| format_date(self.options.today));
        let front_matter = FrontMatter::new(parsed.title, date, &self.options.author, metadata);
        let header = compose_header(&front_matter);

        self.enter(Stage::UpdatingDocument);
        doc.apply_header(&header);
        if !self.options.dry_run {
            doc.save()?;
        }

        self.enter(Stage::Done);
        self.host.info("Header generated successfully!");
        info!(path = %doc.path().display(), renamed, "header generated");

        Ok(GenerateOutcome {
            path: doc.path().to_path_buf(),
            renamed,
            front_matter,
            text: doc.text().to_string(),
            stages: self.stages.clone(),
        })
    }
}

/// Check preconditions, then run the command for `path`.
///
/// Fails before touching anything when the path is not an existing
/// Markdown file or no API key is configured.
///
/// # Errors
///
/// Returns a precondition error or the first failure of the run.
pub async fn generate<H: EditorHost>(
    config: &GeneratorConfig,
    path: &Path,
    host: &mut H,
    options: GenerateOptions,
) -> Result<GenerateOutcome, GenerateError> {
    if let Err(err) = check_preconditions(config, path) {
        host.error(&err.to_string());
        return Err(err);
    }

    let client = LlmClient::from_config(config).map_err(|_| GenerateError::MissingApiKey)?;
    GenerateHeader::new(&client, host, options).run(path).await
}

fn check_preconditions(config: &GeneratorConfig, path: &Path) -> Result<(), GenerateError> {
    if !path.is_file() {
        return Err(GenerateError::NoDocument(path.to_path_buf()));
    }
    if !is_markdown(path) {
        return Err(GenerateError::NotMarkdown(path.to_path_buf()));
    }
    config.api_key().map_err(|_| GenerateError::MissingApiKey)?;
    config.validate()?;
    Ok(())
}
