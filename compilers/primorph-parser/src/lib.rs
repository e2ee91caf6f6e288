pub mod line;
pub mod sentence;
pub mod token;

pub use line::{classify_line, DictLine, LineFault};
pub use sentence::tokenize;
pub use token::{Span, Token, TokenKind};
