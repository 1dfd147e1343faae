//! Reader for the query parameters of the page that embeds the widget.

/// Values that switch the widget into mock mode, compared case-insensitively.
const MOCK_FLAGS: [&str; 3] = ["1", "true", "yes"];

/// Parsed query string of the embedding page.
///
/// Built from a full URL, a bare query string or a `?`-prefixed one; a
/// `#fragment` is ignored. Repeated keys keep every value, lookups return
/// the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(input: &str) -> Self {
        let without_fragment = input.split('#').next().unwrap_or_default();
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None if without_fragment.contains("://") || without_fragment.starts_with('/') => "",
            None => without_fragment,
        };

        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default();
        Self { pairs }
    }

    /// First value of `key`, or an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    /// `psyId`, falling back to `psy_id`. `None` when both are empty.
    pub fn practitioner_id(&self) -> Option<&str> {
        [self.get("psyId"), self.get("psy_id")]
            .into_iter()
            .find(|id| !id.is_empty())
    }

    pub fn display_price<'a>(&'a self, default: &'a str) -> &'a str {
        match self.get("price") {
            "" => default,
            price => price,
        }
    }

    pub fn is_mock_forced(&self) -> bool {
        let flag = self.get("mock").trim().to_lowercase();
        MOCK_FLAGS.contains(&flag.as_str())
    }
}
