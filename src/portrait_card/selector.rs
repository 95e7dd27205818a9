/// Sums the UTF-16 code units of an identifier.
///
/// UTF-16 units are used so the score is identical to implementations that
/// store strings as UTF-16; for ASCII this is simply the sum of the bytes.
pub fn identifier_score(identifier: &str) -> u64 {
    identifier.encode_utf16().map(u64::from).sum()
}

/// Maps an optional identifier onto one of `count` templates.
///
/// Absent or empty identifiers select index 0, as does `count == 0`.
pub fn select_template_index(identifier: Option<&str>, count: usize) -> usize {
    match identifier {
        Some(identifier) if !identifier.is_empty() && count > 0 => {
            (identifier_score(identifier) % count as u64) as usize
        }
        _ => 0,
    }
}

/// Deterministic identifier-to-template assignment over a fixed, ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundSelector {
    names: Vec<String>,
}

impl BackgroundSelector {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn select_index(&self, identifier: Option<&str>) -> usize {
        select_template_index(identifier, self.names.len())
    }

    /// The template name for `identifier`, or `None` if the list is empty.
    pub fn select(&self, identifier: Option<&str>) -> Option<&str> {
        self.names
            .get(self.select_index(identifier))
            .map(String::as_str)
    }
}
