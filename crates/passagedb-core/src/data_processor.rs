use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Document;

/// Loads a directory of `.txt` chapters into [`Document`]s.
///
/// Only files directly inside the directory are considered. Documents come
/// back sorted by name so that tie-breaks downstream are reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataProcessor;

impl DataProcessor {
    pub fn new() -> Self { Self }

    pub fn process_directory(&self, data_dir: &Path) -> Result<Vec<Document>> {
        if !data_dir.is_dir() {
            return Err(Error::NotFound(format!("corpus directory {}", data_dir.display())));
        }
        let files = self.list_txt_files(data_dir)?;
        if files.is_empty() {
            info!(dir = %data_dir.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut documents = Vec::with_capacity(files.len());
        for (file_index, file_path) in files.iter().enumerate() {
            debug!("Processing file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            let content = self.read_file_content(file_path)?;
            let name = self.extract_doc_id(file_path);
            documents.push(Document::new(name, clean_lines(&content)));
        }
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        let total_lines: usize = documents.iter().map(|d| d.lines.len()).sum();
        info!("Loaded {} documents ({} non-empty lines)", documents.len(), total_lines);
        Ok(documents)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        let bytes = fs::read(file_path)?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) => {
                debug!(file = %file_path.display(), "not valid UTF-8, decoding as Latin-1");
                Ok(decode_latin1(e.as_bytes()))
            }
        }
    }

    fn extract_doc_id(&self, file_path: &Path) -> String {
        file_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    fn list_txt_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut txt_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if !entry.file_type().is_file() { continue; }
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
        }
        txt_files.sort();
        Ok(txt_files)
    }
}

/// Split on any line break, trim, and drop blank lines.
pub fn clean_lines(content: &str) -> Vec<String> {
    content
        .split(|c: char| c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Single-byte decoding: every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
