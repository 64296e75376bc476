//! # Word Splitter

use regex::Regex;

use crate::errors::{EmbedorError, EmbedorResult};

/// The default word pattern.
pub const DEFAULT_WORD_PATTERN: &str = r"\w+";

/// Options for [`WordSplitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSplitterOptions {
    /// The regex pattern; each match is one token.
    pub pattern: String,

    /// Lowercase every token.
    pub lowercase: bool,
}

impl Default for WordSplitterOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_WORD_PATTERN.to_string(),
            lowercase: false,
        }
    }
}

impl WordSplitterOptions {
    /// Create new options.
    pub fn new<P: Into<String>>(pattern: P) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Sets the regex pattern.
    pub fn with_pattern<P: Into<String>>(
        self,
        pattern: P,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }

    /// Sets whether tokens are lowercased.
    pub fn with_lowercase(
        self,
        lowercase: bool,
    ) -> Self {
        Self { lowercase, ..self }
    }

    /// Initializes a [`WordSplitter`] from these options.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidConfiguration`] if the pattern does not compile.
    pub fn init(self) -> EmbedorResult<WordSplitter> {
        WordSplitter::new(self)
    }
}

/// Splits text into word tokens with a regex.
#[derive(Debug, Clone)]
pub struct WordSplitter {
    regex: Regex,
    lowercase: bool,
}

impl WordSplitter {
    /// Build a splitter.
    ///
    /// ## Errors
    /// [`EmbedorError::InvalidConfiguration`] if the pattern does not compile.
    pub fn new(options: WordSplitterOptions) -> EmbedorResult<Self> {
        let regex = Regex::new(&options.pattern).map_err(|e| {
            EmbedorError::InvalidConfiguration(format!(
                "invalid word pattern {:?}: {e}",
                options.pattern
            ))
        })?;
        Ok(Self {
            regex,
            lowercase: options.lowercase,
        })
    }

    /// The regex pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Split `text` into tokens, in order.
    pub fn split<'t>(
        &self,
        text: &'t str,
    ) -> impl Iterator<Item = String> {
        let lowercase = self.lowercase;
        self.regex.find_iter(text).map(move |mat| {
            if lowercase {
                mat.as_str().to_lowercase()
            } else {
                mat.as_str().to_string()
            }
        })
    }

    /// Split every line of `lines` into tokens, as one flat stream.
    ///
    /// Lines are pulled lazily, so `lines` may be a reader over a large corpus.
    pub fn split_lines<I>(
        &self,
        lines: I,
    ) -> impl Iterator<Item = String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        lines
            .into_iter()
            .flat_map(move |line| self.split(line.as_ref()).collect::<Vec<_>>())
    }
}
