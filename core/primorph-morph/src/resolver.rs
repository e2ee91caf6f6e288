use primorph_protocol::TagCode;

use crate::dictionary::LexicalDictionary;
use crate::primes::is_prime;

/// Outcome of looking up one word form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A form stored under exactly the requested code
    Exact(&'a str),
    /// First form (in dictionary order) whose tag set is the requested set
    /// plus one more tag; `extra` is that tag's prime
    Nearest { surface: &'a str, extra: u64 },
    /// Unknown lemma, or nothing close enough: keep the base word
    Unchanged,
}

impl<'a> Resolution<'a> {
    pub fn surface(self) -> Option<&'a str> {
        match self {
            Resolution::Exact(surface) | Resolution::Nearest { surface, .. } => Some(surface),
            Resolution::Unchanged => None,
        }
    }
}

/// Picks the form of `lemma` that best matches `requested`.
///
/// Superset of the requested tags == stored code divisible by the requested
/// code; exactly one extra tag == that quotient is prime. With `requested == 1`
/// this selects the first form carrying a single tag.
pub fn resolve_form<'a>(
    dict: &'a LexicalDictionary,
    lemma: &str,
    requested: TagCode,
) -> Resolution<'a> {
    let Some(entry) = dict.entry(lemma) else {
        return Resolution::Unchanged;
    };

    if let Some(surface) = entry.get(requested) {
        return Resolution::Exact(surface);
    }

    for (stored, surface) in entry.iter() {
        match stored.quotient(requested) {
            Some(extra) if is_prime(extra) => {
                return Resolution::Nearest { surface, extra };
            }
            _ => {}
        }
    }

    Resolution::Unchanged
}
