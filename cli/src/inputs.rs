//! Input expansion: wildcards, Word-file filtering and unique document names.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use docmd::detect::has_word_extension;

/// One input document with the folder name its output will use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub name: String,
}

/// Result of expanding the command-line inputs.
#[derive(Debug, Default)]
pub struct Expansion {
    pub files: Vec<PathBuf>,
    /// Inputs skipped because they are not Word documents
    pub skipped: Vec<PathBuf>,
    /// Patterns that matched nothing
    pub unmatched: Vec<String>,
}

/// Expand `*`/`?` in the file-name component of each argument.
///
/// Arguments without wildcards are kept as given, so a missing file is
/// reported by the conversion itself.
pub fn expand_inputs(args: &[String]) -> Expansion {
    let mut expansion = Expansion::default();

    for arg in args {
        let path = PathBuf::from(arg);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !has_wildcard(&file_name) {
            push_input(&mut expansion, path);
            continue;
        }

        let matches = match_pattern(&path, &file_name);
        if matches.is_empty() {
            expansion.unmatched.push(arg.clone());
        }
        for matched in matches {
            push_input(&mut expansion, matched);
        }
    }

    expansion
}

fn push_input(expansion: &mut Expansion, path: PathBuf) {
    if has_word_extension(&path) {
        if !expansion.files.contains(&path) {
            expansion.files.push(path);
        }
    } else {
        log::warn!("Skipping non-Word file: {}", path.display());
        expansion.skipped.push(path);
    }
}

fn has_wildcard(name: &str) -> bool {
    name.contains('*') || name.contains('?')
}

/// Files in the pattern's directory whose names match, sorted by name.
fn match_pattern(path: &Path, file_name: &str) -> Vec<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Ok(regex) = wildcard_regex(file_name) else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| regex.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| {
            if path.parent().map_or(true, |p| p.as_os_str().is_empty()) {
                PathBuf::from(entry.file_name())
            } else {
                dir.join(entry.file_name())
            }
        })
        .collect();
    matches.sort();
    matches
}

/// Translate a `*`/`?` pattern into an anchored regex.
fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source)
}

/// Give every input a distinct output name: `name`, `name_2`, `name_3`, ...
///
/// A generated suffix never reuses a name another input already holds.
pub fn assign_names(files: &[PathBuf]) -> Vec<InputFile> {
    let stems: Vec<String> = files
        .iter()
        .map(|path| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string())
        })
        .collect();

    // Plain stems are reserved up front so `a_2.docx` keeps its own name.
    let reserved: HashSet<&str> = stems.iter().map(String::as_str).collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    files
        .iter()
        .zip(&stems)
        .map(|(path, stem)| {
            let name = if used.insert(stem.clone()) {
                stem.clone()
            } else {
                let suffix = next_suffix.entry(stem.clone()).or_insert(2);
                loop {
                    let candidate = format!("{}_{}", stem, suffix);
                    *suffix += 1;
                    if !reserved.contains(candidate.as_str()) && used.insert(candidate.clone()) {
                        break candidate;
                    }
                }
            };
            InputFile {
                path: path.clone(),
                name,
            }
        })
        .collect()
}
