//! Template service - file-system side of the template workflow

use crate::models::GameTemplate;
use crate::parser::{parse_from_file_with, ParseOptions};
use crate::Result;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// A template file found in a templates folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    /// File name shown to the user
    pub display_name: String,
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write a file atomically, creating parent directories as needed
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let mut temp_file = NamedTempFile::new_in(&parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// List `*.yaml`/`*.yml` files directly inside `dir`, sorted by file name
pub fn discover_templates(dir: &Path) -> Result<Vec<TemplateFile>> {
    if !dir.is_dir() {
        anyhow::bail!("Templates folder not found: {}", dir.display());
    }

    let mut files: Vec<TemplateFile> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_template_file(e.path()))
        .map(|e| TemplateFile {
            display_name: e.file_name().to_string_lossy().to_string(),
            path: e.into_path(),
        })
        .collect();

    files.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(files)
}

/// Parse every template in `dir`, keyed by game name
///
/// Files that fail to parse are logged and left out. When two files declare
/// the same game, the first one in file-name order wins.
pub fn load_templates(dir: &Path, options: ParseOptions) -> Result<BTreeMap<String, GameTemplate>> {
    let mut templates = BTreeMap::new();

    for file in discover_templates(dir)? {
        match parse_from_file_with(&file.path, options) {
            Ok(template) => {
                if templates.contains_key(&template.game_name) {
                    tracing::warn!(
                        file = %file.display_name,
                        game = %template.game_name,
                        "duplicate template for game, ignoring"
                    );
                    continue;
                }
                templates.insert(template.game_name.clone(), template);
            }
            Err(e) => {
                tracing::warn!(file = %file.display_name, error = %e, "skipping template");
            }
        }
    }

    Ok(templates)
}
