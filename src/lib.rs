//! Parse, validate and extract Bible citations.
//!
//! ```
//! use bibleref::Passage;
//!
//! let p = Passage::parse("Genesis 1:12-2:16").unwrap();
//! assert_eq!(p.from().to_string(), "Genesis 1:12");
//! assert_eq!(p.to().to_string(), "Genesis 2:16");
//!
//! let found = Passage::extract_all("Genesis 1:1-2:3 and Genesis 3:4-5:6");
//! assert_eq!(found.len(), 2);
//! ```
//!
//! Text goes through three stages. The grammar recognizes citation syntax
//! over the canon's book names, the resolver fills in what a partial
//! right-hand side leaves out, and the builder checks both ends against the
//! [`Canon`]. Everything is pure and the canon is immutable, so all of it is
//! safe to call from any number of threads.

mod builder;
pub mod canon;
pub mod error;
mod grammar;
mod kjv;
mod passage;
mod reference;
mod resolver;
pub mod scanner;
pub mod types;

pub use canon::{Book, Canon};
pub use error::Error;
pub use passage::Passage;
pub use reference::Reference;
pub use scanner::{Extracted, Passages, scan};
pub use types::{Located, PassageValue, ReferenceValue};
