//! Tool name canonicalization

mod canonicalizer;

pub use canonicalizer::{
    NameCanonicalizer, NamingPolicy, DEFAULT_MAX_LENGTH, DEFAULT_NOISE_PREFIXES,
};
