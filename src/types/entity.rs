//! Trait definitions for objects that have a position on the map.
//!
//! The proximity queries are agnostic of what they rank. A hospital,
//! an ambulance, or a pharmacy added later only needs to expose an id
//! and a [`Location`] through the [`Located`] trait. Free-text search
//! works the same way through [`TextSearchable`].
//!
//! Since Rust doesn't have a built-in way to express "anything with a
//! location", functions take a `T: Located` parameter and call its
//! [`location`](`Located::location`) method.

use super::location::Location;

/// An entity with a geographic position.
pub trait Located {
    /// Identifier, unique within the collection the entity lives in.
    fn uid(&self) -> &str;

    /// Where the entity currently is.
    fn location(&self) -> &Location;
}

/// An entity with free-text fields that a search query can match.
pub trait TextSearchable {
    /// Every field a substring search should look at.
    fn text_fields(&self) -> Vec<&str>;
}

impl<T: Located + ?Sized> Located for &T {
    fn uid(&self) -> &str {
        (**self).uid()
    }

    fn location(&self) -> &Location {
        (**self).location()
    }
}

impl<T: TextSearchable + ?Sized> TextSearchable for &T {
    fn text_fields(&self) -> Vec<&str> {
        (**self).text_fields()
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
