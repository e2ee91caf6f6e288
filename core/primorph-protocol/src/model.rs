use alloc::string::String;
use alloc::vec::Vec;

use crate::codes::TagCode;
use crate::tag::Tag;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One stored inflection of a lemma, with its tag set decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct FormRecord {
    pub code: TagCode,
    pub surface: String,
    pub tags: Vec<Tag>,
}

/// Size summary of a built dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct DictionaryStats {
    pub lemmas: usize,
    pub forms: usize,
    pub tags: usize,
    /// Largest prime handed out so far (0 when no tag is registered)
    pub max_prime: u64,
}
