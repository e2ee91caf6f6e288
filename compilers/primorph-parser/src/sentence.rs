use nom::{
    bytes::complete::{take_till, take_till1, take_while},
    character::complete::char,
    combinator::opt,
    sequence::preceded,
    IResult,
};

use crate::token::{Span, Token, TokenKind};

/// `base{spec}`: everything before the first `{`, then the text up to `}` (or end of token).
/// Text after the closing brace is not part of either.
fn base_and_specifier(word: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (rest, base) = take_till(|c: char| c == '{')(word)?;
    let (rest, spec) = opt(preceded(char('{'), take_till(|c: char| c == '}')))(rest)?;
    Ok((rest, (base, spec)))
}

fn classify_word(word: &str) -> TokenKind<'_> {
    if !word.contains('{') {
        return TokenKind::Plain;
    }

    match base_and_specifier(word) {
        Ok((_, (base, Some(spec)))) if !spec.trim().is_empty() => TokenKind::Specified {
            base,
            tags: spec
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .collect(),
        },
        Ok((_, (base, _))) => TokenKind::EmptySpecifier { base },
        // take_till never fails on complete input
        Err(_) => TokenKind::Plain,
    }
}

/// Splits a template sentence on whitespace and classifies each word.
pub fn tokenize(original_input: &str) -> Vec<Token<'_>> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace (same predicate that ends a word)
        let skipped: IResult<&str, &str> = take_while(char::is_whitespace)(input);
        let (next_input, _) = match skipped {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Take one word
        let parse_res: IResult<&str, &str> = take_till1(char::is_whitespace)(input);
        let (next_input, text) = match parse_res {
            Ok(res) => res,
            Err(_) => break,
        };

        let start = input.as_ptr() as usize - original_input.as_ptr() as usize;
        result.push(Token {
            span: Span::new(start, start + text.len()),
            text,
            kind: classify_word(text),
        });
        input = next_input;
    }

    result
}
