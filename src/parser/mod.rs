//! Parser module: reads Go sources into type declarations.

pub mod go;

use crate::error::{DocgenError, Result};
use crate::model::SourceDeclaration;
use std::fs;
use std::path::PathBuf;

/// Read and parse every file, in input order.
///
/// All files are read up front; the first unreadable or syntactically
/// invalid file aborts the run and nothing is returned.
pub fn parse_files(paths: &[PathBuf]) -> Result<Vec<SourceDeclaration>> {
    let mut parser = go::new_parser()?;
    let mut declarations = Vec::new();

    for path in paths {
        let content = fs::read_to_string(path).map_err(|source| DocgenError::UnreadableSource {
            path: path.clone(),
            source,
        })?;
        let parsed = go::parse(&mut parser, &content, path)?;
        tracing::debug!(path = %path.display(), types = parsed.len(), "parsed source");
        declarations.extend(parsed);
    }

    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn go_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".go").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn files_in_input_order() {
        let a = go_file("package v1\n\ntype Zeta struct{}\n");
        let b = go_file("package v1\n\ntype Alpha struct{}\ntype Beta struct{}\n");
        let decls = parse_files(&[a.path().to_path_buf(), b.path().to_path_buf()]).unwrap();
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Beta"]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let a = go_file("package v1\n\ntype Zeta struct{}\n");
        let missing = PathBuf::from("/nonexistent/types.go");
        let err = parse_files(&[a.path().to_path_buf(), missing]).unwrap_err();
        assert!(matches!(err, DocgenError::UnreadableSource { .. }));
        assert!(err.to_string().contains("/nonexistent/types.go"));
    }

    #[test]
    fn invalid_file_is_fatal() {
        let a = go_file("package v1\n\ntype Zeta struct{}\n");
        let b = go_file("package v1\n\ntype struct {\n");
        let err = parse_files(&[a.path().to_path_buf(), b.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, DocgenError::Syntax { .. }));
    }
}
