#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! define_code {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        #[repr(transparent)] // Same layout as u64
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> u64 {
                value.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_code!(Prime, "A prime number assigned to exactly one grammatical tag.");
define_code!(
    TagCode,
    "Product of the primes of a tag set. Equal codes mean equal tag multisets."
);

impl TagCode {
    /// The empty tag set: multiplicative identity, "no constraints".
    pub const UNCONSTRAINED: TagCode = TagCode(1);

    /// Multiply in one more tag. `None` on `u64` overflow.
    pub fn checked_mul(self, prime: Prime) -> Option<TagCode> {
        self.0.checked_mul(prime.0).map(TagCode)
    }

    /// `self / divisor` when `divisor` divides `self` exactly.
    pub fn quotient(self, divisor: TagCode) -> Option<u64> {
        if divisor.0 == 0 || self.0 % divisor.0 != 0 {
            return None;
        }
        Some(self.0 / divisor.0)
    }
}

impl Default for TagCode {
    fn default() -> Self {
        TagCode::UNCONSTRAINED
    }
}
