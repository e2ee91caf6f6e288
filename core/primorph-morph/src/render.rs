use primorph_parser::{tokenize, TokenKind};
use primorph_protocol::TagCode;
use tracing::debug;

use crate::registry::EncodeError;
use crate::Morpher;

impl Morpher {
    /// Inflects every `word{tag,...}` in a template sentence.
    ///
    /// The sentence is lowercased, split on whitespace and re-joined with single
    /// spaces. Words without a specifier pass through. A specifier naming an
    /// unknown tag is treated as "no constraints" rather than rejected.
    pub fn render(&self, sentence: &str) -> String {
        if sentence.trim().is_empty() {
            return String::new();
        }

        let lowered = sentence.to_lowercase();
        let words: Vec<String> = tokenize(&lowered)
            .into_iter()
            .map(|token| match token.kind {
                TokenKind::Plain => token.text.to_string(),
                TokenKind::EmptySpecifier { base } => base.to_string(),
                TokenKind::Specified { base, tags } => self.render_word(base, &tags),
            })
            .collect();

        words.join(" ")
    }

    fn render_word(&self, base: &str, tags: &[&str]) -> String {
        match self.registry.lookup_code(tags) {
            Ok(code) => self.resolve(base, code),
            Err(EncodeError::UnknownTag(tag)) => {
                debug!(word = base, tag = %tag, "unknown tag, resolving without constraints");
                self.resolve(base, TagCode::UNCONSTRAINED)
            }
            Err(EncodeError::Overflow) => base.to_string(),
        }
    }
}
