/// Separates the kind name from the id in a composite key.
pub const KEY_SEPARATOR: char = '.';

/// Builds the composite registry key `"<Kind>.<id>"`.
pub fn object_key(kind: &str, id: &str) -> String {
    format!("{kind}{KEY_SEPARATOR}{id}")
}

/// Splits a composite key at the first separator into `(kind, id)`.
///
/// Returns `None` when there is no separator or either side is empty. Ids may
/// themselves contain the separator.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
        .filter(|(kind, id)| !kind.is_empty() && !id.is_empty())
}
