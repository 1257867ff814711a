// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category records and display-name resolution.
//!
//! Category data has migrated across three schema generations: an
//! array-based many-to-many form, a single legacy enum reference, and
//! assorted free-text fields. Resolution is a chain of ordered pure rules;
//! the first rule that produces a value wins, and the chain always
//! produces a display string, falling back to [`DEFAULT_CATEGORY`].
//!
//! The legacy value/label table is injected data, not a code constant, so
//! the mapping can be configured and tested independently.

use serde::{Deserialize, Serialize};

/// The display category used when no rule produces a value.
pub const DEFAULT_CATEGORY: &str = "Other";

/// An administrator-curated category record.
///
/// The canonical source for display names. Matching is case-insensitive
/// and trimmed; the stored casing is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Canonical identifier.
    pub id: i64,
    /// Unique name. Canonical casing for display.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Inactive categories are excluded from new-assignment UIs but stay
    /// valid on already-assigned tenders and users.
    pub is_active: bool,
}

/// A fixed value/label pair retained for entities that predate managed
/// categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCategory {
    /// The stored value (e.g., `"it_services"`).
    pub value: String,
    /// The display label (e.g., `"IT Services"`).
    pub label: String,
}

/// Raw category fields as they arrive from the external contract.
///
/// Any subset may be populated, and populated fields may contradict each
/// other; [`resolve_category`] decides which one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryFields {
    /// Preferred representation: a list of category names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// A pre-resolved display string, if some earlier layer produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_category: Option<String>,
    /// Single legacy category value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Alternate single-value field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Alternate single-value field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tender_category: Option<String>,
    /// Alternate single-value field, serialized as `type`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Alternate single-value field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// Alternate single-value field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// Reference into the managed category table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl CategoryFields {
    /// Creates fields holding only a category name list.
    #[must_use]
    pub fn from_names(categories: Vec<String>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }
}

/// The lookup tables resolution runs against.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTables<'a> {
    /// Managed category records.
    pub managed: &'a [Category],
    /// Legacy value/label pairs.
    pub legacy: &'a [LegacyCategory],
}

impl CategoryTables<'_> {
    /// Tables with no managed and no legacy entries.
    pub const EMPTY: CategoryTables<'static> = CategoryTables {
        managed: &[],
        legacy: &[],
    };
}

/// A single resolution rule. Rules are pure and tried in order.
type ResolverRule = fn(&CategoryFields, &CategoryTables<'_>) -> Option<String>;

/// The resolution chain, in priority order.
const RULES: [ResolverRule; 4] = [
    from_category_list,
    from_display_category,
    from_alternate_fields,
    from_category_id,
];

/// Resolves one display category from raw category fields.
///
/// Total: never fails, always returns a display string. The first rule in
/// the chain that produces a value wins; the default is
/// [`DEFAULT_CATEGORY`].
#[must_use]
pub fn resolve_category(fields: &CategoryFields, tables: &CategoryTables<'_>) -> String {
    RULES
        .iter()
        .find_map(|rule| rule(fields, tables))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Rule 1: a non-empty `categories` array.
///
/// Each entry is normalized through the managed table, then the legacy
/// table, then falls back to the capitalized raw value. Distinct results
/// are joined with `", "`.
fn from_category_list(fields: &CategoryFields, tables: &CategoryTables<'_>) -> Option<String> {
    let mut resolved: Vec<String> = Vec::new();
    for raw in &fields.categories {
        if is_blank(raw) {
            continue;
        }
        let name = canonical_name(raw, tables);
        if !resolved.contains(&name) {
            resolved.push(name);
        }
    }
    if resolved.is_empty() {
        None
    } else {
        Some(resolved.join(", "))
    }
}

/// Rule 2: a pre-resolved `display_category`.
fn from_display_category(fields: &CategoryFields, _tables: &CategoryTables<'_>) -> Option<String> {
    non_blank(fields.display_category.as_deref())
}

/// Rule 3: the first non-blank alternate single-value field, normalized
/// through legacy labels, else returned verbatim.
fn from_alternate_fields(fields: &CategoryFields, tables: &CategoryTables<'_>) -> Option<String> {
    let alternates = [
        fields.category.as_deref(),
        fields.category_name.as_deref(),
        fields.tender_category.as_deref(),
        fields.kind.as_deref(),
        fields.classification.as_deref(),
        fields.sector.as_deref(),
    ];
    let raw = alternates.into_iter().find_map(non_blank)?;
    Some(
        legacy_label(&raw, tables.legacy)
            .map_or(raw, ToString::to_string),
    )
}

/// Rule 4: a `category_id` reference into the managed table.
fn from_category_id(fields: &CategoryFields, tables: &CategoryTables<'_>) -> Option<String> {
    let id = fields.category_id?;
    tables
        .managed
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
}

/// Normalizes one raw category value to its canonical display form.
///
/// Managed match wins (canonical casing from the record), then legacy
/// value/label match (label wins), then the capitalized raw value.
fn canonical_name(raw: &str, tables: &CategoryTables<'_>) -> String {
    let needle = normalize(raw);
    if let Some(managed) = tables
        .managed
        .iter()
        .find(|c| normalize(&c.name) == needle)
    {
        return managed.name.clone();
    }
    if let Some(label) = legacy_label(raw, tables.legacy) {
        return label.to_string();
    }
    capitalize_first(raw.trim())
}

/// Finds a legacy label by case-insensitive value or label match.
fn legacy_label<'a>(raw: &str, legacy: &'a [LegacyCategory]) -> Option<&'a str> {
    let needle = normalize(raw);
    legacy
        .iter()
        .find(|l| normalize(&l.value) == needle || normalize(&l.label) == needle)
        .map(|l| l.label.as_str())
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
