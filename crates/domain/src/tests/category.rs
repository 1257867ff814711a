// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the category resolution chain.

use crate::{
    Category, CategoryFields, CategoryTables, DEFAULT_CATEGORY, LegacyCategory, resolve_category,
};

fn managed_categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: String::from("Construction & Infrastructure"),
            description: String::from("Civil works and building projects"),
            is_active: true,
        },
        Category {
            id: 2,
            name: String::from("IT Services"),
            description: String::from("Software and infrastructure services"),
            is_active: true,
        },
        Category {
            id: 3,
            name: String::from("Logistics"),
            description: String::from("Transport and warehousing"),
            is_active: false,
        },
    ]
}

fn legacy_categories() -> Vec<LegacyCategory> {
    vec![
        LegacyCategory {
            value: String::from("it_services"),
            label: String::from("IT Services"),
        },
        LegacyCategory {
            value: String::from("consulting"),
            label: String::from("Consulting & Advisory"),
        },
    ]
}

fn tables<'a>(managed: &'a [Category], legacy: &'a [LegacyCategory]) -> CategoryTables<'a> {
    CategoryTables { managed, legacy }
}

#[test]
fn test_managed_match_is_case_and_whitespace_insensitive() {
    let managed = managed_categories();
    let legacy = legacy_categories();
    let fields =
        CategoryFields::from_names(vec![String::from("  construction & infrastructure ")]);

    let resolved = resolve_category(&fields, &tables(&managed, &legacy));

    // Canonical casing comes from the managed record.
    assert_eq!(resolved, "Construction & Infrastructure");
}

#[test]
fn test_no_category_fields_resolves_to_default() {
    let fields = CategoryFields::default();

    let resolved = resolve_category(&fields, &CategoryTables::EMPTY);

    assert_eq!(resolved, DEFAULT_CATEGORY);
}

#[test]
fn test_list_entries_fall_back_to_legacy_then_capitalized_raw() {
    let managed = managed_categories();
    let legacy = legacy_categories();
    let fields = CategoryFields::from_names(vec![
        String::from("it_services"),
        String::from("marine salvage"),
    ]);

    let resolved = resolve_category(&fields, &tables(&managed, &legacy));

    assert_eq!(resolved, "IT Services, Marine salvage");
}

#[test]
fn test_duplicate_list_entries_are_joined_once() {
    let managed = managed_categories();
    let legacy = legacy_categories();
    let fields = CategoryFields::from_names(vec![
        String::from("IT Services"),
        String::from("it services"),
        String::from("it_services"),
    ]);

    let resolved = resolve_category(&fields, &tables(&managed, &legacy));

    assert_eq!(resolved, "IT Services");
}

#[test]
fn test_list_of_blank_entries_falls_through() {
    let fields = CategoryFields::from_names(vec![String::from("  "), String::new()]);

    let resolved = resolve_category(&fields, &CategoryTables::EMPTY);

    assert_eq!(resolved, DEFAULT_CATEGORY);
}

#[test]
fn test_inactive_managed_category_still_resolves() {
    let managed = managed_categories();
    let fields = CategoryFields::from_names(vec![String::from("logistics")]);

    let resolved = resolve_category(&fields, &tables(&managed, &[]));

    assert_eq!(resolved, "Logistics");
}

#[test]
fn test_category_list_outranks_display_category() {
    let managed = managed_categories();
    let mut fields = CategoryFields::from_names(vec![String::from("IT Services")]);
    fields.display_category = Some(String::from("Something Else"));

    let resolved = resolve_category(&fields, &tables(&managed, &[]));

    assert_eq!(resolved, "IT Services");
}

#[test]
fn test_display_category_outranks_alternate_fields() {
    let fields = CategoryFields {
        display_category: Some(String::from("  Displayed Category  ")),
        category: Some(String::from("raw_value")),
        ..CategoryFields::default()
    };

    let resolved = resolve_category(&fields, &CategoryTables::EMPTY);

    assert_eq!(resolved, "Displayed Category");
}

#[test]
fn test_alternate_fields_scanned_in_declared_order() {
    let fields = CategoryFields {
        category_name: Some(String::from("From category_name")),
        sector: Some(String::from("From sector")),
        ..CategoryFields::default()
    };

    let resolved = resolve_category(&fields, &CategoryTables::EMPTY);

    assert_eq!(resolved, "From category_name");
}

#[test]
fn test_alternate_field_normalized_through_legacy_label() {
    let legacy = legacy_categories();
    let fields = CategoryFields {
        category: Some(String::from("consulting")),
        ..CategoryFields::default()
    };

    let resolved = resolve_category(&fields, &tables(&[], &legacy));

    assert_eq!(resolved, "Consulting & Advisory");
}

#[test]
fn test_unmatched_alternate_field_returned_verbatim() {
    let fields = CategoryFields {
        classification: Some(String::from("bespoke classification")),
        ..CategoryFields::default()
    };

    let resolved = resolve_category(&fields, &CategoryTables::EMPTY);

    assert_eq!(resolved, "bespoke classification");
}

#[test]
fn test_category_id_lookup_in_managed_table() {
    let managed = managed_categories();
    let fields = CategoryFields {
        category_id: Some(2),
        ..CategoryFields::default()
    };

    let resolved = resolve_category(&fields, &tables(&managed, &[]));

    assert_eq!(resolved, "IT Services");
}

#[test]
fn test_unknown_category_id_resolves_to_default() {
    let managed = managed_categories();
    let fields = CategoryFields {
        category_id: Some(999),
        ..CategoryFields::default()
    };

    let resolved = resolve_category(&fields, &tables(&managed, &[]));

    assert_eq!(resolved, DEFAULT_CATEGORY);
}

#[test]
fn test_contradictory_fields_prefer_most_structured_source() {
    let managed = managed_categories();
    let legacy = legacy_categories();
    let mut fields = CategoryFields::from_names(vec![String::from("Construction & Infrastructure")]);
    fields.display_category = Some(String::from("Stale Display"));
    fields.category = Some(String::from("consulting"));
    fields.category_id = Some(2);

    let resolved = resolve_category(&fields, &tables(&managed, &legacy));

    assert_eq!(resolved, "Construction & Infrastructure");
}
