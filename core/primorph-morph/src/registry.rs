use std::collections::HashMap;

use primorph_protocol::{Prime, Tag, TagCode};

use crate::primes::{next_prime, BASE_PRIME};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("unknown tag '{0}'")]
    UnknownTag(String),
    #[error("tag code does not fit in 64 bits")]
    Overflow,
}

/// Assigns every distinct tag its own prime, in order of first appearance.
///
/// Primes are never reassigned and the registry never shrinks, so a code
/// computed once stays valid for the lifetime of the registry.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    primes: HashMap<Tag, Prime>,
    // Registration order; primes here are strictly increasing
    order: Vec<(Tag, Prime)>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Largest prime assigned so far.
    pub fn max_prime(&self) -> Option<Prime> {
        self.order.last().map(|(_, prime)| *prime)
    }

    /// Tags with their primes, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, Prime)> {
        self.order.iter().map(|(tag, prime)| (tag, *prime))
    }

    pub fn prime_of(&self, tag: &str) -> Option<Prime> {
        self.primes.get(&Tag::new(tag)).copied()
    }

    pub fn register_or_get(&mut self, tag: &str) -> Prime {
        let tag = Tag::new(tag);
        if let Some(prime) = self.primes.get(&tag) {
            return *prime;
        }

        let prime = match self.max_prime() {
            Some(current) => next_prime(current),
            None => BASE_PRIME,
        };
        self.primes.insert(tag.clone(), prime);
        self.order.push((tag, prime));
        prime
    }

    /// Product of the tags' primes, registering unseen tags on the way.
    ///
    /// A tag listed twice is multiplied in twice; callers wanting set
    /// semantics must not pass duplicates. The empty list encodes to 1.
    pub fn encode<I, S>(&mut self, tags: I) -> Result<TagCode, EncodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut code = TagCode::UNCONSTRAINED;
        for tag in tags {
            let prime = self.register_or_get(tag.as_ref());
            code = code.checked_mul(prime).ok_or(EncodeError::Overflow)?;
        }
        Ok(code)
    }

    /// Like [`encode`](Self::encode) but read-only: an unseen tag is an error.
    pub fn lookup_code<I, S>(&self, tags: I) -> Result<TagCode, EncodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut code = TagCode::UNCONSTRAINED;
        for tag in tags {
            let tag = tag.as_ref();
            let prime = self
                .prime_of(tag)
                .ok_or_else(|| EncodeError::UnknownTag(Tag::new(tag).to_string()))?;
            code = code.checked_mul(prime).ok_or(EncodeError::Overflow)?;
        }
        Ok(code)
    }

    /// Factors `code` back into tags, in registration order and repeated per
    /// multiplicity. `None` if some factor was never registered.
    pub fn decode(&self, code: TagCode) -> Option<Vec<Tag>> {
        let mut remaining = code.get();
        if remaining == 0 {
            return None;
        }

        let mut tags = Vec::new();
        for (tag, prime) in &self.order {
            while remaining % prime.get() == 0 {
                remaining /= prime.get();
                tags.push(tag.clone());
            }
            if remaining == 1 {
                break;
            }
        }

        (remaining == 1).then_some(tags)
    }
}
