#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// No `{` in the token: copied to the output as is
    Plain,
    /// `base{tag,tag,...}` with at least one non-blank character inside the braces.
    /// `tags` may still be empty (e.g. `{,,}`), which requests no constraints.
    Specified { base: &'a str, tags: Vec<&'a str> },
    /// `base{}` or `base{  }`: emit the base word untouched
    EmptySpecifier { base: &'a str },
}

#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kind: TokenKind<'a>,
}
