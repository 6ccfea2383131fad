//! Reading configuration documents.
//!
//! A document is either plain JSON or a text file holding several sections, each one
//! opened by an upper-case header line (`GENEX`, `HISTORY`, ...) and running until the
//! next header. Parse errors are logged with the line and column in the file and a
//! pointer under the offending character.
use crate::errors::GenexError;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    /// Deserializes the section under `header`; if the document has no headers at all the
    /// whole file is taken as the section.
    pub fn load_section<T: DeserializeOwned>(&self, header: &str) -> Result<T, GenexError> {
        load_section_from_file(&self.file_name, header)
    }
}

fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

fn read_lines(file_name: &str) -> Result<Vec<String>, GenexError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(GenexError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file '{}' does not exist", file_name),
        )));
    }
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

pub fn load_section_from_file<T: DeserializeOwned>(
    file_name: &str,
    header: &str,
) -> Result<T, GenexError> {
    let lines = read_lines(file_name)?;
    let header = header.trim().to_uppercase();

    let has_headers = lines.iter().any(|l| is_header(l));
    let (start_index, end_index) = if has_headers {
        let start = lines
            .iter()
            .position(|l| l.trim() == header)
            .map(|i| i + 1)
            .ok_or_else(|| {
                GenexError::config(format!(
                    "no '{}' header found in file '{}'",
                    header, file_name
                ))
            })?;
        let end = (start..lines.len())
            .find(|&i| is_header(&lines[i]))
            .unwrap_or(lines.len());
        (start, end)
    } else {
        (0, lines.len())
    };

    let section = lines[start_index..end_index].join("\n");
    if section.trim().is_empty() {
        warn!("section '{}' in file '{}' is empty", header, file_name);
    }
    match serde_json::from_str::<T>(&section) {
        Ok(data) => {
            info!("parsed section '{}' from file '{}'", header, file_name);
            Ok(data)
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            let actual_line = start_index + error_line.saturating_sub(1);
            error!(
                "error parsing '{}' at line {}, column {} (line {} in file): {}",
                header,
                error_line,
                error_column,
                actual_line + 1,
                e
            );
            if let Some(problem_line) = lines.get(actual_line) {
                error!("problematic line: {}", problem_line);
                if error_column >= 1 && error_column <= problem_line.len() {
                    error!("{}^", " ".repeat(error_column - 1));
                }
            }
            Err(GenexError::Json(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
    }

    #[test]
    fn plain_json_document() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{\"x\": 1.0, \"y\": 2.5}}").unwrap();
        let loader = LoadData::new(file.path().to_str().unwrap().to_string());
        let p: Point = loader.load_section("GENEX").unwrap();
        assert_eq!(p, Point { x: 1.0, y: 2.5 });
    }

    #[test]
    fn section_between_headers() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "OTHER").unwrap();
        writeln!(file, "{{\"x\": 9.0, \"y\": 9.0}}").unwrap();
        writeln!(file, "GENEX").unwrap();
        writeln!(file, "{{\"x\": 3.0,").unwrap();
        writeln!(file, " \"y\": 4.0}}").unwrap();
        writeln!(file, "HISTORY").unwrap();
        writeln!(file, "[]").unwrap();
        let p: Point = load_section_from_file(file.path().to_str().unwrap(), "genex").unwrap();
        assert_eq!(p, Point { x: 3.0, y: 4.0 });
    }

    #[test]
    fn missing_header_and_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "OTHER").unwrap();
        writeln!(file, "{{\"x\": 1.0, \"y\": }}").unwrap();
        let path = file.path().to_str().unwrap();
        assert!(matches!(
            load_section_from_file::<Point>(path, "GENEX"),
            Err(GenexError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            load_section_from_file::<Point>(path, "OTHER"),
            Err(GenexError::Json(_))
        ));
        assert!(matches!(
            load_section_from_file::<Point>("no_such_file.json", "GENEX"),
            Err(GenexError::Io(_))
        ));
    }
}
