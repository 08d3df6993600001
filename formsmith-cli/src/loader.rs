//! Reading form configurations and submissions from disk.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{CliError, CliResult};
use formsmith::{FormDescriptor, FormError, LoadOptions};

/// Read and check a form configuration file.
pub fn load_form(path: &Path, options: LoadOptions) -> CliResult<FormDescriptor> {
    let content = read(path)?;
    let form = FormDescriptor::from_json_str(&content, options).map_err(FormError::from)?;
    debug!(
        path = %path.display(),
        fields = form.field_count(),
        "loaded form configuration"
    );
    Ok(form)
}

/// Read a JSON submission to validate.
pub fn load_data(path: &Path) -> CliResult<Value> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::Data {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_form() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(
            &path,
            r#"{"title": "Tiny", "fields": [{"name": "a", "type": "text", "label": "A"}]}"#,
        )
        .unwrap();

        let form = load_form(&path, LoadOptions::strict()).unwrap();
        assert_eq!(form.title, "Tiny");
    }

    #[test]
    fn test_missing_file() {
        let err = load_form(Path::new("/nonexistent/form.json"), LoadOptions::strict())
            .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_invalid_form_is_form_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"title": "X", "fields": [{"name": "a", "type": "slider", "label": "A"}]}"#)
            .unwrap();

        let err = load_form(&path, LoadOptions::strict()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration: field 'a'"));
    }

    #[test]
    fn test_load_data_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(load_data(&path).unwrap_err(), CliError::Data { .. }));
    }
}
