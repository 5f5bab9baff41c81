//! Tests for the query module

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_render_defaults() {
    let rendered = SearchParams::new().render(200);

    assert_eq!(
        rendered.pairs(),
        pairs(&[
            ("limit", "200"),
            ("search_after", ""),
            ("user", ""),
            ("group", "__world__"),
        ])
        .as_slice()
    );
    assert_eq!(rendered.cursor(), "");
}

#[test]
fn test_render_all_fields() {
    let params = SearchParams::new()
        .user("judell")
        .group("abc123")
        .tags(["media", "review"])
        .any("jon")
        .uri("http://example.com/")
        .search_after("2024-01-01T00:00:00.000000+00:00");

    assert_eq!(
        params.render(200).into_pairs(),
        pairs(&[
            ("limit", "200"),
            ("search_after", "2024-01-01T00:00:00.000000+00:00"),
            ("user", "judell"),
            ("group", "abc123"),
            ("tag", "media"),
            ("tag", "review"),
            ("any", "jon"),
            ("uri", "http://example.com/"),
        ])
    );
}

#[test]
fn test_limit_override_is_not_sent() {
    let rendered = SearchParams::new().limit(501).render(200);
    assert_eq!(rendered.get_all("limit"), vec!["200"]);
}

#[test]
fn test_empty_group_falls_back_to_public() {
    let params = SearchParams::new().group("");
    assert_eq!(params.effective_group(), PUBLIC_GROUP);
    assert_eq!(params.render(200).get("group"), Some(PUBLIC_GROUP));
}

#[test]
fn test_compound_tag_passes_through() {
    let rendered = SearchParams::new().tag("social media").render(200);
    assert_eq!(rendered.get_all("tag"), vec!["social media"]);
    assert!(rendered.to_string().contains("tag=social+media"));
}

#[test_case(Some("http://a/"), None, Some(("uri", "http://a/")) ; "exact only")]
#[test_case(None, Some("https://www.nytimes.com/*"), Some(("wildcard_uri", "https://www.nytimes.com/*")) ; "wildcard only")]
#[test_case(Some("http://a/"), Some("http://b/*"), Some(("uri", "http://a/")) ; "exact wins")]
#[test_case(Some(""), Some("http://b/*"), Some(("wildcard_uri", "http://b/*")) ; "empty exact ignored")]
#[test_case(None, None, None ; "neither")]
fn test_uri_precedence(uri: Option<&str>, wildcard: Option<&str>, expected: Option<(&str, &str)>) {
    let mut params = SearchParams::new();
    params.uri = uri.map(String::from);
    params.wildcard_uri = wildcard.map(String::from);

    let rendered = params.render(200);
    let found = rendered
        .pairs()
        .iter()
        .find(|(k, _)| k == "uri" || k == "wildcard_uri")
        .map(|(k, v)| (k.as_str(), v.as_str()));

    assert_eq!(found, expected);
    assert!(rendered.get("uri").is_none() || rendered.get("wildcard_uri").is_none());
}

#[test]
fn test_render_is_deterministic() {
    let build = || {
        SearchParams::new()
            .user("judell")
            .tags(["a", "b"])
            .wildcard_uri("https://*.example.com/*")
    };

    assert_eq!(build(), build());
    assert_eq!(build().render(200), build().render(200));
    assert_eq!(build().render(200).to_string(), build().render(200).to_string());
}

#[test]
fn test_cursor_moves_only_search_after() {
    let mut params = SearchParams::new().user("judell");
    let before = params.render(200);

    params.set_cursor("2024-03-01T10:00:00+00:00");
    let after = params.render(200);

    assert_eq!(after.cursor(), "2024-03-01T10:00:00+00:00");
    let strip = |q: &RenderedQuery| {
        q.pairs()
            .iter()
            .filter(|(k, _)| k != "search_after")
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&before), strip(&after));
}

#[test]
fn test_validate_rejects_blank_tag() {
    assert!(SearchParams::new().tag("ok").validate().is_ok());
    assert!(SearchParams::new().tag("  ").validate().is_err());
}

#[test]
fn test_params_from_yaml() {
    let params: SearchParams = serde_yaml::from_str(
        r"
user: judell
tags: [media, review]
limit: 25
",
    )
    .unwrap();

    assert_eq!(params.user.as_deref(), Some("judell"));
    assert_eq!(params.tags, vec!["media", "review"]);
    assert_eq!(params.limit, Some(25));
    assert!(params.group.is_none());
}
