//! Property path normalizer.
//!
//! Turns a raw comparator path such as `Body.<Results>k__BackingField[3].Score`
//! into the structural key `Body.Results[*].Score`. Every component groups by the
//! output of [`normalize`]; nothing else in the crate rewrites paths.

use std::sync::LazyLock;

use regex::Regex;

/// Wildcard token replacing concrete array indices.
pub const WILDCARD: &str = "[*]";

static BACKING_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_][A-Za-z0-9_]*)>k__BackingField").expect("valid backing field regex")
});

static INDEXER_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.?(?:get_Item|ElementAt)\(\s*([0-9]+)\s*\)").expect("valid accessor regex")
});

static ARRAY_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*([0-9]+)\s*\]").expect("valid index regex"));

/// Canonicalize a raw property path.
///
/// Backing-field wrappers are unwrapped, indexer accessors (`get_Item(n)`,
/// `ElementAt(n)`) and numeric indices become `[*]`. Total and idempotent.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let unwrapped = strip_backing_fields(raw);
    let accessors = INDEXER_ACCESSOR.replace_all(&unwrapped, WILDCARD);
    ARRAY_INDEX.replace_all(&accessors, WILDCARD).into_owned()
}

/// Unwrap `<Name>k__BackingField` until none remain. Nested wrappers peel one
/// layer per round, so a single pass is not enough.
fn strip_backing_fields(raw: &str) -> String {
    let mut current = raw.to_string();
    while BACKING_FIELD.is_match(&current) {
        current = BACKING_FIELD.replace_all(&current, "$1").into_owned();
    }
    current
}

/// Last property name of a path, without trailing wildcards.
///
/// `Order.Items[*]` → `Items`, `Order.Total` → `Total`.
pub fn last_segment(path: &str) -> &str {
    let segment = path.rsplit('.').next().unwrap_or(path);
    let mut trimmed = segment;
    while let Some(stripped) = trimmed.strip_suffix(WILDCARD) {
        trimmed = stripped;
    }
    trimmed
}

/// Everything before the last `.`; empty for single-segment paths.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('.') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Whether a normalized path passes through a collection element.
pub fn has_index(path: &str) -> bool {
    path.contains(WILDCARD)
}

/// Whether the path addresses a collection element itself rather than a
/// property inside one. Accepts raw or normalized paths.
pub fn ends_with_index(path: &str) -> bool {
    normalize(path.trim_end()).ends_with(WILDCARD)
}

/// Split a normalized path at its innermost collection.
///
/// `Body.Results[*].Score` → `("Body.Results", "Score")`;
/// `Body.Results[*]` → `("Body.Results", "")`.
pub fn split_collection(path: &str) -> Option<(&str, &str)> {
    let pos = path.rfind(WILDCARD)?;
    let collection = &path[..pos];
    let rest = &path[pos + WILDCARD.len()..];
    Some((collection, rest.strip_prefix('.').unwrap_or(rest)))
}

/// Innermost element position of a raw path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementPosition {
    /// Normalized path of the collection owning the element.
    pub collection: String,
    /// Concrete index from the raw path, as ASCII digits without leading
    /// zeros. Kept as text so indices of any length are accepted.
    pub index: String,
}

/// Locate the innermost concrete index in a raw path.
///
/// `Orders[2].Lines[5].Sku` → collection `Orders[*].Lines`, index 5.
/// Returns `None` for paths without a numeric index. Uses the same index
/// patterns as [`normalize`], so every path it wildcards has a position.
pub fn element_position(raw: &str) -> Option<ElementPosition> {
    let unwrapped = strip_backing_fields(raw);
    let bracketed = INDEXER_ACCESSOR.replace_all(&unwrapped, "[$1]");
    let caps = ARRAY_INDEX.captures_iter(&bracketed).last()?;
    let whole = caps.get(0)?;
    let digits = caps.get(1)?.as_str().trim_start_matches('0');
    let index = if digits.is_empty() { "0" } else { digits }.to_string();
    Some(ElementPosition {
        collection: normalize(&bracketed[..whole.start()]),
        index,
    })
}

/// Attribute-shaped paths carry a segment starting with `@` (e.g. `Order.@id`).
pub fn is_attribute_path(path: &str) -> bool {
    path.split('.').any(|segment| segment.starts_with('@'))
}
