//! Classifier for lines of an OpenCorpora-style plain-text dictionary.
//!
//! ```text
//! 41                                  <- group start (value unused)
//! КОТ     NOUN,anim,masc sing,nomn    <- lemma line
//! КОТА    NOUN,anim,masc sing,gent    <- form lines ...
//! ```

use nom::{
    bytes::complete::{take_till, take_while1},
    character::complete::{digit1, space0},
    combinator::all_consuming,
    sequence::{delimited, tuple},
    IResult,
};

/// Why a content line could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineFault {
    #[error("no surface form before the first tab")]
    MissingSurface,
    #[error("no tab-separated tag field")]
    MissingTags,
    #[error("tag field holds no tags")]
    EmptyTagList,
    #[error("form line does not belong to any lemma group")]
    OrphanForm,
    #[error("tag code does not fit in 64 bits")]
    CodeOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictLine<'a> {
    /// Empty or whitespace-only; never ends a group
    Blank,
    /// A line holding only a decimal integer
    GroupStart,
    /// `surface<TAB>tag,tag tag...`; fields after the second are ignored
    Entry { surface: &'a str, tags: Vec<&'a str> },
    Malformed(LineFault),
}

fn group_start(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(space0, digit1, space0))(input)
}

/// `surface`, one or more tabs, then the tag field up to the next tab.
fn entry_fields(input: &str) -> IResult<&str, (&str, &str, &str)> {
    tuple((
        take_till(|c: char| c == '\t'),
        take_while1(|c: char| c == '\t'),
        take_till(|c: char| c == '\t'),
    ))(input)
}

fn split_tags(field: &str) -> Vec<&str> {
    field
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .collect()
}

pub fn classify_line(line: &str) -> DictLine<'_> {
    // Dumps produced on Windows keep the '\r'
    let line = line.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty() {
        return DictLine::Blank;
    }

    if group_start(line).is_ok() {
        return DictLine::GroupStart;
    }

    let (surface, tag_field) = match entry_fields(line) {
        Ok((_, (surface, _, tag_field))) => (surface.trim(), tag_field),
        Err(_) => return DictLine::Malformed(LineFault::MissingTags),
    };

    if surface.is_empty() {
        return DictLine::Malformed(LineFault::MissingSurface);
    }

    let tags = split_tags(tag_field);
    if tags.is_empty() {
        return DictLine::Malformed(LineFault::EmptyTagList);
    }

    DictLine::Entry { surface, tags }
}
