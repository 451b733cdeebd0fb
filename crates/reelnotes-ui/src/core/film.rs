//! Film identifiers and ratings.

use std::fmt;

/// Numeric film identifier as used in page paths and API routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilmId(u64);

impl FilmId {
    /// Wrap a raw id; zero is not a valid film.
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Parse a `data-film-id` attribute value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().and_then(Self::new)
    }

    /// Extract the id from a page path such as `/films/42/reviews`.
    ///
    /// The first `/films/<digits>` segment wins.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        const MARKER: &str = "/films/";
        path.match_indices(MARKER).find_map(|(idx, _)| {
            let rest = &path[idx + MARKER.len()..];
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            Self::parse(&rest[..end])
        })
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Star rating in the inclusive range 1..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Wrap a value when it is in range.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw star count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_id_from_path_takes_first_numeric_segment() {
        assert_eq!(FilmId::from_path("/films/42"), FilmId::new(42));
        assert_eq!(FilmId::from_path("/films/7/edit?x=1"), FilmId::new(7));
        assert_eq!(FilmId::from_path("/films/new/films/9"), FilmId::new(9));
        assert_eq!(FilmId::from_path("/profile"), None);
        assert_eq!(FilmId::from_path("/films/0"), None);
    }

    #[test]
    fn film_id_parse_trims_and_rejects_garbage() {
        assert_eq!(FilmId::parse(" 12 ").map(FilmId::get), Some(12));
        assert_eq!(FilmId::parse("12a"), None);
        assert_eq!(FilmId::parse(""), None);
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(Rating::new(0).is_none());
        assert_eq!(Rating::new(1).map(Rating::get), Some(1));
        assert_eq!(Rating::new(5).map(Rating::get), Some(5));
        assert!(Rating::new(6).is_none());
    }
}
