//! Loading model files and resolving their imports.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{DataModel, Error, Result, validate::validate_model};

/// On-disk format of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Toml,
    Json,
}

impl ModelFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(Box::new(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })),
        }
    }
}

/// A model together with the file it was loaded from.
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub path: PathBuf,
    pub model: DataModel,
}

impl ModelSource {
    /// Directory that relative references in this model resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Parse a model from a string, using `filename` for error reporting.
pub fn parse_str(content: &str, format: ModelFormat, filename: &str) -> Result<DataModel> {
    let model: DataModel = match format {
        ModelFormat::Toml => {
            toml::from_str(content).map_err(|e| Error::toml(e, content, filename))?
        }
        ModelFormat::Json => {
            serde_json::from_str(content).map_err(|e| Error::json(e, content, filename))?
        }
    };
    validate_model(&model, content, filename)?;
    Ok(model)
}

/// Load a single model file.
pub fn load_model(path: impl AsRef<Path>) -> Result<DataModel> {
    let path = path.as_ref();
    let format = ModelFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_str(&content, format, &path.display().to_string())
}

/// Load `root` and every model it imports, transitively.
///
/// Each file is loaded once, even when imported from several places or
/// through a cycle. The root comes first, followed by imports in the order
/// they were discovered.
pub fn resolve_models(root: impl AsRef<Path>) -> Result<Vec<ModelSource>> {
    let root = root.as_ref();
    let root_key = root.canonicalize().map_err(|e| Error::io(root, e))?;

    let mut visited = HashSet::from([root_key]);
    let mut sources = vec![ModelSource {
        path: root.to_path_buf(),
        model: load_model(root)?,
    }];

    let mut next = 0;
    while next < sources.len() {
        let base = sources[next].base_dir().to_path_buf();
        let from = sources[next].path.clone();
        let imports = sources[next].model.imports.clone();
        next += 1;

        for import in imports {
            let path = base.join(&import);
            let wrap = |source: Box<Error>| {
                Box::new(Error::Import {
                    from: from.clone(),
                    import: import.clone(),
                    source,
                })
            };

            let key = path
                .canonicalize()
                .map_err(|e| wrap(Error::io(&path, e)))?;
            if !visited.insert(key) {
                debug!(import = %path.display(), "model already loaded");
                continue;
            }

            let model = load_model(&path).map_err(wrap)?;
            debug!(import = %path.display(), model = %model.name, "loaded imported model");
            sources.push(ModelSource { path, model });
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ModelFormat::from_path(Path::new("a.toml")).unwrap(),
            ModelFormat::Toml
        );
        assert_eq!(
            ModelFormat::from_path(Path::new("a.JSON")).unwrap(),
            ModelFormat::Json
        );
        assert!(ModelFormat::from_path(Path::new("a.yaml")).is_err());
    }

    #[test]
    fn test_load_json_model() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "bank.json",
            r#"{"name": "Bank", "types": [{"kind": "enumeration", "name": "Tier", "fields": ["Gold"]}]}"#,
        );

        let model = load_model(&path).unwrap();
        assert_eq!(model.name, "Bank");
        assert_eq!(model.enumerations().count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_model("/nonexistent/model.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = parse_str("name = ", ModelFormat::Toml, "bad.toml").unwrap_err();
        match *err {
            Error::ParseToml { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_transitive_imports() {
        let temp = TempDir::new().unwrap();
        let root = write(
            temp.path(),
            "service.toml",
            "name = \"Service\"\nimports = [\"domain/bank.toml\"]\n",
        );
        write(
            temp.path(),
            "domain/bank.toml",
            "name = \"Bank\"\nimports = [\"common.toml\"]\n",
        );
        write(temp.path(), "domain/common.toml", "name = \"Common\"\n");

        let sources = resolve_models(&root).unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.model.name.as_str()).collect();
        assert_eq!(names, vec!["Service", "Bank", "Common"]);
    }

    #[test]
    fn test_resolve_handles_cycles() {
        let temp = TempDir::new().unwrap();
        let root = write(
            temp.path(),
            "a.toml",
            "name = \"A\"\nimports = [\"b.toml\"]\n",
        );
        write(temp.path(), "b.toml", "name = \"B\"\nimports = [\"a.toml\"]\n");

        let sources = resolve_models(&root).unwrap();
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_resolve_missing_import() {
        let temp = TempDir::new().unwrap();
        let root = write(
            temp.path(),
            "a.toml",
            "name = \"A\"\nimports = [\"missing.toml\"]\n",
        );

        let err = resolve_models(&root).unwrap_err();
        match *err {
            Error::Import { import, .. } => assert_eq!(import, "missing.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
