//! Command implementations
//!
//! Each command returns its output instead of printing so the binary stays a
//! thin argument parser.

use anyhow::{Context, Result};
use serde::Serialize;
use signorder_engine::{EditIntent, EditOutcome, RecipientEditor};
use signorder_types::{EditorConfig, RecipientForm, RecipientList};
use std::fmt::Write as _;
use std::path::Path;

/// Read and validate a recipient list file
///
/// # Errors
/// Unreadable file, malformed JSON, or a form that fails validation.
pub fn load_list(path: &Path) -> Result<RecipientList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let form = RecipientForm::from_json(&content)
        .with_context(|| format!("{} is not a recipient form", path.display()))?;
    let list = form
        .validate()
        .with_context(|| format!("{} is not a valid recipient list", path.display()))?;
    tracing::debug!(signers = list.len(), mode = %list.mode(), "loaded recipient list");
    Ok(list)
}

/// Load editor configuration, falling back to defaults
///
/// # Errors
/// Unreadable or invalid config file.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// `validate`: normalized list as pretty JSON
///
/// # Errors
/// See [`load_list`].
pub fn run_validate(input: &Path) -> Result<String> {
    let list = load_list(input)?;
    serde_json::to_string_pretty(&list).context("failed to serialize recipient list")
}

/// `config`: default configuration as TOML
///
/// # Errors
/// Serialization failure.
pub fn default_config_toml() -> Result<String> {
    EditorConfig::default()
        .to_toml()
        .context("failed to serialize default config")
}

/// What happened to one scripted intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// List changed
    Applied {
        /// Revision after the step
        revision: u64,
    },
    /// No-op
    Unchanged,
    /// Editor declined
    Refused {
        /// Reason
        reason: String,
    },
    /// Caller error, e.g. an index outside the list
    Failed {
        /// Reason
        reason: String,
    },
}

/// One line of the replay report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Position in the script
    pub step: usize,
    /// Intent as written
    pub intent: String,
    /// Result
    #[serde(flatten)]
    pub status: StepStatus,
}

/// Result of replaying a script
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    /// Per-step results
    pub steps: Vec<StepReport>,
    /// Final list
    pub list: RecipientList,
}

impl ApplyReport {
    /// No step failed
    #[must_use]
    pub fn passed(&self) -> bool {
        !self
            .steps
            .iter()
            .any(|s| matches!(s.status, StepStatus::Failed { .. }))
    }

    /// Number of refused steps
    #[must_use]
    pub fn refusals(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.status, StepStatus::Refused { .. }))
            .count()
    }

    /// Human-readable step log
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let status = match &step.status {
                StepStatus::Applied { revision } => format!("applied (rev {revision})"),
                StepStatus::Unchanged => "unchanged".to_string(),
                StepStatus::Refused { reason } => format!("refused: {reason}"),
                StepStatus::Failed { reason } => format!("FAILED: {reason}"),
            };
            let _ = writeln!(out, "  [{}] {} => {}", step.step, step.intent, status);
        }
        let _ = writeln!(
            out,
            "{} steps, {} refused, final mode {}, {} signers",
            self.steps.len(),
            self.refusals(),
            self.list.mode(),
            self.list.len()
        );
        out
    }
}

/// `apply`: replay an intent script against a list
///
/// Refused and failed steps are recorded and skipped. With
/// `stop_on_refusal` the replay ends at the first step that did not apply
/// cleanly.
///
/// # Errors
/// Unreadable or invalid input, script or config.
pub fn run_apply(
    input: &Path,
    script: &Path,
    config: Option<&Path>,
    stop_on_refusal: bool,
) -> Result<ApplyReport> {
    let list = load_list(input)?;
    let config = load_config(config)?;
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read {}", script.display()))?;
    let intents = EditIntent::parse_script(&content)
        .with_context(|| format!("{} is not an edit script", script.display()))?;

    Ok(replay(list, config, intents, stop_on_refusal))
}

/// Replay intents through a fresh editing session
#[must_use]
pub fn replay(
    list: RecipientList,
    config: EditorConfig,
    intents: Vec<EditIntent>,
    stop_on_refusal: bool,
) -> ApplyReport {
    let mut editor = RecipientEditor::new(list, config);
    let mut steps = Vec::with_capacity(intents.len());

    for (step, intent) in intents.into_iter().enumerate() {
        let label = intent.to_string();
        let status = match editor.apply(intent) {
            Ok(EditOutcome::Applied { revision }) => StepStatus::Applied { revision },
            Ok(EditOutcome::Unchanged) => StepStatus::Unchanged,
            Err(err) if err.is_refusal() => StepStatus::Refused {
                reason: err.to_string(),
            },
            Err(err) => StepStatus::Failed {
                reason: err.to_string(),
            },
        };

        let clean = matches!(status, StepStatus::Applied { .. } | StepStatus::Unchanged);
        steps.push(StepReport {
            step,
            intent: label,
            status,
        });
        if stop_on_refusal && !clean {
            tracing::info!(step, "stopping replay at first refusal");
            break;
        }
    }

    ApplyReport {
        steps,
        list: editor.into_list(),
    }
}
