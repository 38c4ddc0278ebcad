//! Logbook export.

use std::path::Path;

use dcm_sim::Logbook;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

pub fn render_logbook(logbook: &Logbook, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Csv => Ok(logbook.to_csv()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(logbook)?),
    }
}

pub fn write_logbook(path: &Path, logbook: &Logbook, format: OutputFormat) -> AppResult<()> {
    let content = render_logbook(logbook, format)?;
    std::fs::write(path, content).map_err(|e| AppError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), records = logbook.len(), "logbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcm_sim::{LogRecord, MotorInputs, MotorState};

    fn logbook() -> Logbook {
        let mut logbook = Logbook::new();
        logbook.push(LogRecord::new(
            0.0,
            MotorState::new(0.0, 0.0),
            MotorInputs::new(240.0, 0.0, 0.0),
        ));
        logbook.push(LogRecord::new(
            0.001,
            MotorState::new(19.5, 0.25),
            MotorInputs::new(240.0, 40.0, 0.0),
        ));
        logbook
    }

    #[test]
    fn writes_csv_file() {
        let path = std::env::temp_dir()
            .join(format!("dcm_app_export_{}.csv", std::process::id()));
        write_logbook(&path, &logbook(), OutputFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(content.starts_with(Logbook::CSV_HEADER));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn json_parses_back() {
        let json = render_logbook(&logbook(), OutputFormat::Json).unwrap();
        let parsed: Logbook = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, logbook());
    }
}
