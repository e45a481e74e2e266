//! k8s-api-docgen: generate API reference documentation from Kubernetes
//! Go type definitions.
//!
//! `k8s-api-docgen -t markdown -o docs/api.md api/v1/*_types.go`

mod config;
mod doc;
mod error;
mod extract;
mod links;
mod model;
mod parser;
mod render;
mod tag;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "k8s-api-docgen",
    version,
    about = "Generate API reference documentation from Kubernetes Go type definitions"
)]
struct Cli {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Output format: json (default), markdown
    #[arg(short = 't', long, default_value = "json")]
    format: String,

    /// Write to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// YAML file with Markdown title, column headers and extra type links
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Also document unexported types and fields
    #[arg(long)]
    include_unexported: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Fail on a bad format or config before touching any source
    let config = match &cli.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };
    let renderer = render::create_renderer(&cli.format, &config)?;

    let input_files = expand_globs(&cli.files)?;
    tracing::info!(files = input_files.len(), "reading sources");

    let declarations = parser::parse_files(&input_files)?;
    let options = extract::ExtractOptions {
        include_unexported: cli.include_unexported,
    };
    let structures = extract::extract(&declarations, &options);
    tracing::info!(structures = structures.len(), "extracted types");

    let output = renderer.render(&structures)?;

    match &cli.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write stdout")?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// File extensions recognized as source files.
const SUPPORTED_EXTENSIONS: &[&str] = &["go"];

/// Expand glob patterns into a list of source file paths.
///
/// Literal paths keep their position. Directories are scanned for Go files
/// (non-recursive) and glob matches are sorted. A literal path that does
/// not exist is kept so that reading it reports the error.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut found: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_supported_extension(p))
                .collect();
            if found.is_empty() {
                tracing::warn!(dir = %path.display(), "no Go files in directory");
            }
            found.sort();
            files.extend(found);
            continue;
        }
        if !is_glob(pattern) {
            files.push(path.to_path_buf());
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        matches.sort();
        files.extend(matches);
    }

    let mut seen = HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "package v1\n").unwrap();
        path
    }

    fn args(paths: &[&Path]) -> Vec<String> {
        paths.iter().map(|p| p.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn literal_paths_keep_order() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b_types.go");
        let a = touch(dir.path(), "a_types.go");
        let files = expand_globs(&args(&[&b, &a])).unwrap();
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn directory_scans_go_files_sorted() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.go");
        let a = touch(dir.path(), "a.go");
        touch(dir.path(), "README.md");
        let files = expand_globs(&args(&[dir.path()])).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn glob_matches_sorted() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b_types.go");
        let a = touch(dir.path(), "a_types.go");
        touch(dir.path(), "zz_generated.deepcopy.txt");
        let pattern = format!("{}/*_types.go", dir.path().display());
        let files = expand_globs(&[pattern]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn duplicates_keep_first() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.go");
        let b = touch(dir.path(), "b.go");
        let mut patterns = args(&[&b]);
        patterns.push(dir.path().to_string_lossy().to_string());
        let files = expand_globs(&patterns).unwrap();
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn missing_literal_passes_through() {
        let files = expand_globs(&["/nonexistent/types.go".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("/nonexistent/types.go")]);
    }

    #[test]
    fn unmatched_glob_is_empty() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.go", dir.path().display());
        assert!(expand_globs(&[pattern]).unwrap().is_empty());
    }
}
