//! Line-oriented reference scanning
//!
//! A unit mentions a symbol when one of its body lines (not a declaration
//! header line, not a comment) contains either
//!
//! - a direct call: `sym(`, `sym;`, or `sym` at end of line, or
//! - a handle passed on: `@sym,`
//!
//! with no identifier character directly before the symbol.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::config::IndexerConfig;
use crate::error::{IndexError, Result};

/// Compiled matchers for one target symbol.
#[derive(Debug, Clone)]
pub struct SymbolPattern {
    symbol: String,
    call: Regex,
    handle: Regex,
}

impl SymbolPattern {
    pub fn new(symbol: &str) -> Result<Self> {
        let escaped = regex::escape(symbol);
        let call = Regex::new(&format!(r"(?:^|[^\w]){escaped}[ \t\r]*(?:\(|;|$)"))?;
        let handle = Regex::new(&format!(r"@[ \t]*{escaped}[ \t\r]*,"))?;
        Ok(Self {
            symbol: symbol.to_string(),
            call,
            handle,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.call.is_match(line) || self.handle.is_match(line)
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceScanner {
    comment_prefix: String,
    header_lines: usize,
}

impl ReferenceScanner {
    pub fn new(comment_prefix: impl Into<String>, header_lines: usize) -> Self {
        Self {
            comment_prefix: comment_prefix.into(),
            header_lines,
        }
    }

    pub fn from_config(config: &IndexerConfig) -> Self {
        Self::new(config.comment_prefix.clone(), config.header_lines)
    }

    /// Whether the unit at `path` mentions `pattern`'s symbol.
    pub fn mentions(&self, path: &Path, pattern: &SymbolPattern) -> Result<bool> {
        let text = read_unit(path)?;
        let found = self.mentions_in_text(&text, pattern);
        if found {
            debug!("{} mentions {}", path.display(), pattern.symbol());
        }
        Ok(found)
    }

    /// Same check on text already in memory.
    pub fn mentions_in_text(&self, text: &str, pattern: &SymbolPattern) -> bool {
        text.lines()
            .skip(self.header_lines)
            .filter(|line| !self.is_skippable(line))
            .any(|line| pattern.is_match(line))
    }

    fn is_skippable(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        trimmed.is_empty()
            || (!self.comment_prefix.is_empty() && trimmed.starts_with(&self.comment_prefix))
    }
}

/// Read a unit as text, replacing invalid UTF-8.
pub fn read_unit(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| IndexError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl Default for ReferenceScanner {
    fn default() -> Self {
        Self::from_config(&IndexerConfig::default())
    }
}
