//! dcm-project: motor project file format, validation and defaults.

pub mod defaults;
pub mod schema;
pub mod validate;

pub use defaults::{default_config, default_controller, default_motor};
pub use schema::*;
pub use validate::{ValidationError, parse_method, validate_project};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File formats a project can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// Pick a format from the file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let project: ProjectConfig = serde_yaml::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &Path, project: &ProjectConfig) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let project: ProjectConfig = serde_json::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_json(path: &Path, project: &ProjectConfig) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a project, choosing YAML or JSON by extension.
pub fn load(path: &Path) -> ProjectResult<ProjectConfig> {
    match ProjectFormat::from_path(path)? {
        ProjectFormat::Yaml => load_yaml(path),
        ProjectFormat::Json => load_json(path),
    }
}

/// Save a project, choosing YAML or JSON by extension.
pub fn save(path: &Path, project: &ProjectConfig) -> ProjectResult<()> {
    match ProjectFormat::from_path(path)? {
        ProjectFormat::Yaml => save_yaml(path, project),
        ProjectFormat::Json => save_json(path, project),
    }
}
