//! Single pass over dictionary lines producing a [`Morpher`].

use primorph_parser::{classify_line, DictLine, LineFault};
use primorph_protocol::TagCode;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dictionary::LexicalDictionary;
use crate::registry::TagRegistry;
use crate::Morpher;

/// What to do with a line that cannot be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MalformedLinePolicy {
    /// Record it in the report only
    Skip,
    /// Record it and emit a warning
    #[default]
    Warn,
    /// Stop the build at the first one
    Abort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    pub malformed_lines: MalformedLinePolicy,
    /// Also store a new lemma's own line as one of its forms.
    pub index_lemma_form: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineIssue {
    /// 1-based
    pub line: usize,
    pub fault: LineFault,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub lines: usize,
    pub groups: usize,
    pub lemmas: usize,
    pub forms: usize,
    pub duplicates: usize,
    pub issues: Vec<LineIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("line {line}: {fault}")]
    Aborted { line: usize, fault: LineFault },
}

#[derive(Debug)]
pub struct DictionaryBuilder {
    config: BuildConfig,
    registry: TagRegistry,
    dictionary: LexicalDictionary,
    report: BuildReport,
    current: Option<String>,
    expect_lemma: bool,
}

impl DictionaryBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            registry: TagRegistry::new(),
            dictionary: LexicalDictionary::default(),
            report: BuildReport::default(),
            current: None,
            expect_lemma: false,
        }
    }

    pub fn push_line(&mut self, line: &str) -> Result<(), BuildError> {
        match self.feed(line) {
            Ok(()) => Ok(()),
            Err(issue) => match self.config.malformed_lines {
                MalformedLinePolicy::Skip => {
                    debug!(line = issue.line, fault = %issue.fault, "skipping dictionary line");
                    self.report.issues.push(issue);
                    Ok(())
                }
                MalformedLinePolicy::Warn => {
                    self.tolerate(issue);
                    Ok(())
                }
                MalformedLinePolicy::Abort => Err(BuildError::Aborted {
                    line: issue.line,
                    fault: issue.fault,
                }),
            },
        }
    }

    pub fn extend<I, S>(&mut self, lines: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push_line(line.as_ref())?;
        }
        Ok(())
    }

    pub fn finish(self) -> (Morpher, BuildReport) {
        info!(
            lines = self.report.lines,
            lemmas = self.report.lemmas,
            forms = self.report.forms,
            tags = self.registry.len(),
            issues = self.report.issues.len(),
            "dictionary built"
        );
        let morpher = Morpher {
            registry: self.registry,
            dictionary: self.dictionary,
        };
        (morpher, self.report)
    }

    pub(crate) fn tolerate(&mut self, issue: LineIssue) {
        warn!(line = issue.line, fault = %issue.fault, "skipping dictionary line");
        self.report.issues.push(issue);
    }

    /// Applies one line to the builder state; a rejected line comes back as an issue.
    pub(crate) fn feed(&mut self, raw: &str) -> Result<(), LineIssue> {
        self.report.lines += 1;
        let line_no = self.report.lines;

        let (surface, tags) = match classify_line(raw) {
            DictLine::Blank => return Ok(()),
            DictLine::GroupStart => {
                self.report.groups += 1;
                self.expect_lemma = true;
                return Ok(());
            }
            DictLine::Entry { surface, tags } => (surface, tags),
            DictLine::Malformed(fault) => return Err(self.reject(line_no, fault)),
        };

        if !self.expect_lemma && self.current.is_none() {
            return Err(self.reject(line_no, LineFault::OrphanForm));
        }

        // Registering never meets an unknown tag, so overflow is the only failure
        let code = match self.registry.encode(&tags) {
            Ok(code) => code,
            Err(_) => return Err(self.reject(line_no, LineFault::CodeOverflow)),
        };
        let surface = surface.to_lowercase();

        if self.expect_lemma {
            self.expect_lemma = false;
            self.start_lemma(surface, code);
        } else if let Some(lemma) = self.current.as_deref() {
            store(&mut self.dictionary, &mut self.report, lemma, code, surface);
        }
        Ok(())
    }

    fn start_lemma(&mut self, lemma: String, code: TagCode) {
        if self.dictionary.insert_lemma(&lemma) {
            debug!(lemma = %lemma, code = code.get(), "new lemma");
            self.report.lemmas += 1;
            if self.config.index_lemma_form {
                store(&mut self.dictionary, &mut self.report, &lemma, code, lemma.clone());
            }
        } else {
            // Seen before: its own line competes like any other form
            store(&mut self.dictionary, &mut self.report, &lemma, code, lemma.clone());
        }
        self.current = Some(lemma);
    }

    /// A rejected lemma line leaves its group without an owner.
    fn reject(&mut self, line: usize, fault: LineFault) -> LineIssue {
        if self.expect_lemma {
            self.expect_lemma = false;
            self.current = None;
        }
        LineIssue { line, fault }
    }
}

fn store(
    dictionary: &mut LexicalDictionary,
    report: &mut BuildReport,
    lemma: &str,
    code: TagCode,
    surface: String,
) {
    let Some(entry) = dictionary.entry_mut(lemma) else {
        return;
    };
    if entry.insert_first(code, surface) {
        report.forms += 1;
    } else {
        report.duplicates += 1;
    }
}
