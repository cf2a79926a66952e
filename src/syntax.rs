//! # Syntax Module
//!
//! Dependency-parsed sentences as the tagger sees them, and the provider seam
//! through which an external parser delivers them.
//!
//! The tagger only ever asks for a token's lemma, its dependency label and its
//! immediate left or right children, so [`DependencyTree`] exposes exactly that
//! over token indices. [`Sentence`] is the in-crate implementation; children
//! are derived from each token's head index the same way a dependency parser
//! reports them.
//!
//! [`ConlluReader`] implements [`NlpProvider`] for CoNLL-U documents, the common
//! interchange format of dependency parsers.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::measurement_errors::MeasurementError;

/// Dependency labels marking a numeric modifier
pub const NUMERIC_MODIFIER_LABELS: [&str; 2] = ["nummod", "quantmod"];

/// Read-only view of a dependency-parsed sentence, addressed by token index
pub trait DependencyTree {
    /// Number of tokens in the sentence
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lemma of the token at `index`
    fn lemma(&self, index: usize) -> &str;

    /// Dependency relation label of the token at `index`
    fn dependency(&self, index: usize) -> &str;

    /// Indices of the syntactic children preceding the token, in sentence order
    fn left_children(&self, index: usize) -> Vec<usize>;

    /// Indices of the syntactic children following the token, in sentence order
    fn right_children(&self, index: usize) -> Vec<usize>;
}

/// One token as produced by a dependency parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Lowercase base form
    pub lemma: String,
    /// Dependency relation to the head (e.g. "nummod", "dobj")
    pub dependency: String,
    /// Index of the head token within the sentence, `None` for the root
    pub head: Option<usize>,
}

impl Token {
    pub fn new(text: &str, lemma: &str, dependency: &str) -> Self {
        Self {
            text: text.to_string(),
            lemma: lemma.to_lowercase(),
            dependency: dependency.to_string(),
            head: None,
        }
    }

    /// Attach this token to the head at `head`
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }
}

/// An ordered sequence of parsed tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Build a sentence, dropping head references that point outside it
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let len = tokens.len();
        for (index, token) in tokens.iter_mut().enumerate() {
            if let Some(head) = token.head {
                if head >= len || head == index {
                    warn!(
                        "Token {} ('{}') has invalid head {}, treating it as a root",
                        index, token.text, head
                    );
                    token.head = None;
                }
            }
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Surface text of the sentence, tokens joined by single spaces
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.head == Some(index))
            .map(|(i, _)| i)
    }
}

impl DependencyTree for Sentence {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn lemma(&self, index: usize) -> &str {
        &self.tokens[index].lemma
    }

    fn dependency(&self, index: usize) -> &str {
        &self.tokens[index].dependency
    }

    fn left_children(&self, index: usize) -> Vec<usize> {
        self.children(index).filter(|&i| i < index).collect()
    }

    fn right_children(&self, index: usize) -> Vec<usize> {
        self.children(index).filter(|&i| i > index).collect()
    }
}

/// Tokenizes and dependency-parses text into sentences
///
/// Implementations are constructed once by the caller and passed to the
/// extractor explicitly.
pub trait NlpProvider {
    fn parse(&self, text: &str) -> Result<Vec<Sentence>, MeasurementError>;
}

/// Reads CoNLL-U formatted parser output
///
/// Columns are tab separated: ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL DEPS MISC.
/// Comment lines start with `#`, a blank line ends a sentence. Multiword
/// ranges (`1-2`) and empty nodes (`1.1`) are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConlluReader;

impl ConlluReader {
    pub fn new() -> Self {
        Self
    }

    fn parse_line(line_number: usize, line: &str) -> Result<Option<Token>, MeasurementError> {
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < 8 {
            return Err(MeasurementError::Parse(format!(
                "line {}: expected at least 8 columns, found {}",
                line_number + 1,
                columns.len()
            )));
        }

        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            return Ok(None);
        }
        id.parse::<usize>().map_err(|_| {
            MeasurementError::Parse(format!("line {}: invalid token id '{}'", line_number + 1, id))
        })?;

        let text = columns[1];
        let lemma = match columns[2] {
            "_" => text,
            lemma => lemma,
        };
        // CoNLL-U heads are 1-based; 0 marks the root
        let head = match columns[6] {
            "_" | "0" => None,
            raw => {
                let head = raw.parse::<usize>().map_err(|_| {
                    MeasurementError::Parse(format!("line {}: invalid head '{}'", line_number + 1, raw))
                })?;
                Some(head - 1)
            }
        };

        let mut token = Token::new(text, lemma, columns[7]);
        token.head = head;
        Ok(Some(token))
    }
}

impl NlpProvider for ConlluReader {
    fn parse(&self, text: &str) -> Result<Vec<Sentence>, MeasurementError> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();

        for (line_number, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if !current.is_empty() {
                    sentences.push(Sentence::new(std::mem::take(&mut current)));
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if let Some(token) = Self::parse_line(line_number, line)? {
                current.push(token);
            }
        }
        if !current.is_empty() {
            sentences.push(Sentence::new(current));
        }

        debug!("Read {} sentences from CoNLL-U input", sentences.len());
        Ok(sentences)
    }
}
