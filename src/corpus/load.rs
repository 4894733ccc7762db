use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::parse::parse_corpus_document;
use super::record::Corpus;

const BUNDLED_CORPUS: &str = include_str!("../../data/corpus.json");

/// Loads the corpus from `path`, or the bundled archive when none is given.
pub fn load_corpus(path: Option<&Path>) -> Result<Corpus> {
    let records = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read corpus file {}", path.display()))?;
            parse_corpus_document(&raw)
                .with_context(|| format!("failed to parse corpus file {}", path.display()))?
        }
        None => parse_corpus_document(BUNDLED_CORPUS).context("bundled corpus is invalid")?,
    };

    let corpus = Corpus::new(records);
    info!(
        "loaded {} records across {} entities and {} domains",
        corpus.len(),
        corpus.entities().len(),
        corpus.domain_count()
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_corpus_loads() {
        let corpus = load_corpus(None).expect("bundled corpus parses");
        assert_eq!(corpus.len(), 18);
        assert_eq!(corpus.entities().len(), 6);
        assert_eq!(corpus.domain_count(), 3);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_corpus(Some(Path::new("/nonexistent/corpus.json")))
            .expect_err("file does not exist");
        assert!(format!("{error:#}").contains("/nonexistent/corpus.json"));
    }
}
