use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

/// Where a request document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Json,
    Yaml,
}

impl Syntax {
    /// `.yaml` and `.yml` files are YAML; everything else, stdin included,
    /// is JSON.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Syntax::Yaml
            }
            _ => Syntax::Json,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(p) => write!(f, "'{}'", p.display()),
            Source::Stdin => f.write_str("stdin"),
        }
    }
}

/// Read a typed request from `--input`, falling back to piped stdin.
pub fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn Error>> {
    read_optional_request(path)?
        .ok_or_else(|| format!("--input file or piped JSON is required for {command}").into())
}

/// Like [`read_request`] but returns `None` when neither source is present.
pub fn read_optional_request<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn Error>> {
    let (source, text) = match path {
        Some(p) => {
            let file = resolve_path(p)?;
            let text = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read '{}': {e}", file.display()))?;
            (Source::File(file), text)
        }
        None => match read_piped()? {
            Some(text) => (Source::Stdin, text),
            None => return Ok(None),
        },
    };
    parse(&source, &text).map(Some)
}

/// Read a whole document from a file path, JSON or YAML by extension.
pub fn read_file<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    read_optional_request(Some(path))?.ok_or_else(|| format!("Empty file: {path}").into())
}

pub fn parse<T: DeserializeOwned>(source: &Source, text: &str) -> Result<T, Box<dyn Error>> {
    let syntax = match source {
        Source::File(p) => Syntax::of(p),
        Source::Stdin => Syntax::Json,
    };
    debug!(%source, ?syntax, bytes = text.len(), "parsing request");
    let parsed = match syntax {
        Syntax::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Syntax::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| format!("Failed to parse {source}: {e}").into())
}

/// Piped stdin, or `None` for a terminal or an empty pipe.
fn read_piped() -> Result<Option<String>, Box<dyn Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok((!buffer.trim().is_empty()).then_some(buffer))
}

/// Resolve against the working directory and require a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if !resolved.is_file() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msme_score_core::policy::PolicyAnalysis;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_syntax_by_extension() {
        assert_eq!(Syntax::of(Path::new("weights.YML")), Syntax::Yaml);
        assert_eq!(Syntax::of(Path::new("request.json")), Syntax::Json);
        assert_eq!(Syntax::of(Path::new("request")), Syntax::Json);
    }

    #[test]
    fn test_yaml_request_parses() {
        let text = "obligations:\n  - obligation: Fire NOC\n    frequency: ANNUALLY\npenalties: []\n";
        let analysis: PolicyAnalysis =
            parse(&Source::File(PathBuf::from("analysis.yaml")), text).unwrap();
        assert_eq!(analysis.obligations.len(), 1);
        assert_eq!(analysis.obligations[0].obligation, "Fire NOC");
    }

    #[test]
    fn test_parse_error_names_the_source() {
        let err = parse::<PolicyAnalysis>(&Source::Stdin, "{not json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin"));
    }
}
