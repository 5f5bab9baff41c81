//! Tests for the model module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_row() -> serde_json::Value {
    json!({
        "id": "Zx1-aBcD",
        "created": "2024-02-01T09:30:00.000000+00:00",
        "updated": "2024-02-03T12:00:00.123456+00:00",
        "user": "acct:judell@hypothes.is",
        "uri": "https://web.hypothes.is/blog/introducing-search-and-profiles",
        "text": "Nice feature",
        "tags": ["search", "profiles"],
        "group": "__world__",
        "target": [{
            "source": "https://web.hypothes.is/blog/introducing-search-and-profiles",
            "selector": [
                {"type": "RangeSelector", "startContainer": "/div[1]/p[2]", "endContainer": "/div[1]/p[2]", "startOffset": 0, "endOffset": 12},
                {"type": "TextPositionSelector", "start": 120, "end": 132},
                {"type": "TextQuoteSelector", "exact": "search pages", "prefix": "new ", "suffix": " and"},
                {"type": "FragmentSelector", "value": "page=1", "conformsTo": "http://tools.ietf.org/rfc/rfc3778"}
            ]
        }],
        "document": {"title": ["Introducing search and profiles"]},
        "references": ["root-id", "parent-id"],
        "user_info": {"display_name": "Jon Udell"},
        "permissions": {"read": ["group:__world__"]}
    })
}

#[test]
fn test_decode_full_record() {
    let record: Record = serde_json::from_value(sample_row()).unwrap();

    assert_eq!(record.id, "Zx1-aBcD");
    assert_eq!(record.tags, vec!["search", "profiles"]);
    assert_eq!(record.title(), Some("Introducing search and profiles"));
    assert_eq!(record.user_info.display_name.as_deref(), Some("Jon Udell"));
    assert!(record.is_reply());
    assert_eq!(record.parent_id(), Some("parent-id"));

    let selectors = &record.target[0].selector;
    assert_eq!(selectors.len(), 4);
    assert_eq!(
        selectors[0],
        Selector::Range {
            start_container: "/div[1]/p[2]".to_string(),
            end_container: "/div[1]/p[2]".to_string(),
            start_offset: 0,
            end_offset: 12,
        }
    );
    assert_eq!(selectors[3], Selector::Other);
    assert_eq!(record.exact_quote(), "search pages");
}

#[test]
fn test_decode_sparse_record() {
    let record: Record = serde_json::from_value(json!({
        "id": "abc",
        "updated": "2024-02-03T12:00:00+00:00",
        "tags": null,
        "document": null,
        "user_info": null,
        "target": [{"source": "http://example.com/"}]
    }))
    .unwrap();

    assert!(record.tags.is_empty());
    assert!(record.title().is_none());
    assert!(record.references.is_empty());
    assert!(!record.is_reply());
    assert!(record.target[0].selector.is_empty());
    assert_eq!(record.exact_quote(), "");
}

#[test]
fn test_record_timestamps() {
    let record: Record = serde_json::from_value(sample_row()).unwrap();

    let updated = record.updated_at().unwrap();
    assert_eq!(updated.timestamp(), 1_706_961_600);
    assert!(record.created_at().unwrap() < updated);

    let bad = Record {
        updated: "yesterday".to_string(),
        ..Record::default()
    };
    assert!(bad.updated_at().is_none());
}

#[test]
fn test_selectors_to_exact_returns_exact() {
    let selectors = vec![
        Selector::TextQuote {
            exact: "the exact quote".to_string(),
            prefix: String::new(),
            suffix: String::new(),
        },
        Selector::TextPosition { start: 1, end: 2 },
    ];

    assert_eq!(selectors_to_exact(&selectors), "the exact quote");
}

#[test]
fn test_selectors_to_exact_without_quote_returns_empty() {
    let selectors = vec![Selector::TextPosition { start: 1, end: 2 }];
    assert_eq!(selectors_to_exact(&selectors), "");
    assert_eq!(selectors_to_exact(&[]), "");
}

#[test]
fn test_selectors_to_position() {
    let selectors = vec![
        Selector::Other,
        Selector::TextPosition { start: 7, end: 19 },
    ];
    assert_eq!(selectors_to_position(&selectors), Some((7, 19)));
    assert_eq!(selectors_to_position(&[Selector::Other]), None);
    assert!(!Selector::Other.is_quote());
}

#[test]
fn test_search_result_requires_shape() {
    let err = serde_json::from_value::<SearchResult>(json!({"rows": []})).unwrap_err();
    assert!(err.to_string().contains("total"));

    let err = serde_json::from_value::<SearchResult>(json!({"total": 3})).unwrap_err();
    assert!(err.to_string().contains("rows"));
}

#[test]
fn test_page_from_search_result() {
    let result: SearchResult = serde_json::from_value(json!({
        "total": 1200,
        "rows": [sample_row(), {"id": "second", "updated": "2024-02-02T00:00:00+00:00"}]
    }))
    .unwrap();

    let page = Page::try_from(result).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.total, 1200);
    assert_eq!(page.last_cursor(), Some("2024-02-02T00:00:00+00:00"));
}

#[test]
fn test_page_rejects_record_without_id() {
    let result: SearchResult = serde_json::from_value(json!({
        "total": 2,
        "rows": [sample_row(), {"updated": "2024-02-02T00:00:00+00:00"}]
    }))
    .unwrap();

    match Page::try_from(result) {
        Err(Error::MalformedRecord { position, .. }) => assert_eq!(position, 1),
        other => panic!("Expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_empty_page() {
    let page = Page::default();
    assert!(page.is_empty());
    assert!(page.last_cursor().is_none());
}

#[test]
fn test_decode_profile() {
    let profile: Profile = serde_json::from_value(json!({
        "userid": "acct:judell@hypothes.is",
        "authority": "hypothes.is",
        "groups": [
            {"name": "Public", "id": "__world__", "public": true},
            {"name": "Private Group", "id": "Kq3xZ", "public": false, "url": "https://hypothes.is/groups/Kq3xZ/private-group"}
        ],
        "features": {"notebook_launch": true, "embed_cachebuster": false},
        "preferences": {},
        "user_info": {"display_name": "Jon Udell"}
    }))
    .unwrap();

    assert!(profile.is_authenticated());
    assert_eq!(profile.display_name(), Some("Jon Udell"));
    let private: Vec<_> = profile.private_groups().map(|g| g.id.as_str()).collect();
    assert_eq!(private, vec!["Kq3xZ"]);
    assert!(profile.feature("notebook_launch"));
    assert!(!profile.feature("embed_cachebuster"));
    assert!(!profile.feature("client_display_names"));
}

#[test]
fn test_anonymous_profile() {
    let profile: Profile = serde_json::from_value(json!({
        "userid": null,
        "authority": "hypothes.is",
        "groups": [{"name": "Public", "id": "__world__", "public": true}],
        "features": {},
        "preferences": {}
    }))
    .unwrap();

    assert!(!profile.is_authenticated());
    assert!(profile.display_name().is_none());
    assert_eq!(profile.private_groups().count(), 0);
}
