//! Current page location and the login redirect built from it.

/// Path and query of the page the user is on.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PageLocation {
    /// Path component, e.g. `/films/42`.
    pub path: String,
    /// Query component including the leading `?`, or empty.
    pub query: String,
}

impl PageLocation {
    /// Build a location from its components.
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// `path + query`, the value carried through the login round trip.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.query)
    }

    /// Login URL that returns the user here afterwards.
    #[must_use]
    pub fn login_redirect(&self, login_path: &str) -> String {
        format!(
            "{login_path}?next={}",
            urlencoding::encode(&self.path_and_query())
        )
    }
}

/// Whether the back button is worth showing: there is history to go back to,
/// or the visitor arrived from this site.
#[must_use]
pub fn back_button_visible(history_len: u32, referrer: &str, host: &str) -> bool {
    history_len > 1 || (!host.is_empty() && referrer.contains(host))
}
