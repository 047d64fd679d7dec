//! Static fixture corpora used across harnesses.

use super::builders::RecordBuilder;
use fuzzmatch_store::MemoryStore;

/// Ad listings as they come out of the admin export, one JSON object each.
pub const ADS_JSON: &str = r#"[
    { "id": 1, "title": "Administrator account", "description": "bulk sale", "location": "Riyadh",
      "user": { "name": "Sara Haddad", "email": "sara@example.com" },
      "category": { "name": "Services", "name_ar": "خدمات" } },
    { "id": 2, "title": "admn settings", "description": "typo in title", "location": "Jeddah",
      "user": { "name": "Omar", "email": "omar@example.com" },
      "category": { "name": "Misc", "name_ar": "متفرقات" } },
    { "id": 3, "title": "unrelated", "description": "nothing to see", "location": "Dammam",
      "user": null,
      "category": { "name": "Cars", "name_ar": "سيارات" } },
    { "id": 4, "title": "T3ST drive", "description": "leetspeak title", "location": "Riyadh",
      "user": { "name": "Lina", "email": "lina@example.com" },
      "category": null }
]"#;

/// Titles used by the end-to-end admin scenario.
pub const ADMIN_TITLES: &[&str] = &["Administrator account", "admn settings", "unrelated"];

/// Names used by the short-query scenario.
pub const SHORT_NAMES: &[&str] = &["hi there", "h1 there"];

pub fn ads_store() -> MemoryStore {
    MemoryStore::from_json(ADS_JSON).expect("ADS_JSON must parse")
}

/// Users with has-many ads, for existence tests that go the other direction.
pub fn users_with_ads() -> MemoryStore {
    MemoryStore::new(vec![
        RecordBuilder::new()
            .field("name", "Khalid")
            .field("email", "khalid@example.com")
            .has_many(
                "ads",
                vec![
                    RecordBuilder::new().field("title", "Toyota Camry 2019"),
                    RecordBuilder::new().field("title", "Bicycle"),
                ],
            )
            .build(),
        RecordBuilder::new()
            .field("name", "Noura")
            .field("email", "noura@example.com")
            .has_many("ads", vec![])
            .build(),
    ])
}
