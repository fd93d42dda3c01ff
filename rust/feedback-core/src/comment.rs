//! Comment records and fragment grouping
//!
//! Wire names follow the `feedback_comments` table: the author is stored as
//! `telegram_name`, the body as `comment`, the anchor as `position`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// =============================================================================
// Types
// =============================================================================

/// Viewport coordinates captured when a comment is composed.
///
/// Advisory only: highlights are always re-derived from live DOM text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

/// A comment as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(rename = "telegram_name")]
    pub author_name: String,
    pub page_url: String,
    pub selected_text: String,
    #[serde(rename = "comment")]
    pub comment_body: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(rename = "position", default, deserialize_with = "null_as_origin")]
    pub anchor_position: AnchorPoint,
}

/// Insert payload. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    #[serde(rename = "telegram_name")]
    pub author_name: String,
    pub page_url: String,
    pub selected_text: String,
    #[serde(rename = "comment")]
    pub comment_body: String,
    #[serde(rename = "position")]
    pub anchor_position: AnchorPoint,
}

/// All comments anchored to one exact fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub fragment: String,
    pub ids: Vec<String>,
}

// =============================================================================
// Deserialization helpers
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// Stores hand out either UUID strings or bigint keys.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn null_as_origin<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AnchorPoint, D::Error> {
    Ok(Option::<AnchorPoint>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Grouping
// =============================================================================

/// Group comments by exact `selected_text`, in order of first appearance.
///
/// Comments with an empty fragment are dropped: an empty pattern would match
/// between every pair of characters on the page.
pub fn group_by_fragment(comments: &[Comment]) -> Vec<CommentGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CommentGroup> = Vec::new();

    for comment in comments {
        if comment.selected_text.is_empty() {
            continue;
        }
        match index.get(comment.selected_text.as_str()) {
            Some(&slot) => groups[slot].ids.push(comment.id.clone()),
            None => {
                index.insert(comment.selected_text.as_str(), groups.len());
                groups.push(CommentGroup {
                    fragment: comment.selected_text.clone(),
                    ids: vec![comment.id.clone()],
                });
            }
        }
    }

    groups
}

// =============================================================================
// Display
// =============================================================================

/// Format a store timestamp as a short date (`M/D/YYYY`).
///
/// Accepts RFC 3339 and offset-less ISO 8601; anything else is shown verbatim.
/// The date is taken in the timestamp's own offset (UTC for store rows), not
/// the viewer's zone.
pub fn format_date(created_at: &str) -> String {
    let raw = created_at.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => created_at.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, author: &str, fragment: &str) -> Comment {
        Comment {
            id: id.to_string(),
            author_name: author.to_string(),
            page_url: "https://docs.example.com/guide".to_string(),
            selected_text: fragment.to_string(),
            comment_body: "body".to_string(),
            created_at: "2024-03-05T10:00:00+00:00".to_string(),
            anchor_position: AnchorPoint::default(),
        }
    }

    #[test]
    fn test_decode_store_row() {
        let json = r#"{
            "id": "c1",
            "telegram_name": "@alice",
            "page_url": "https://docs.example.com/guide",
            "selected_text": "the quick brown fox",
            "comment": "typo here",
            "created_at": "2024-03-05T10:00:00.123456+00:00",
            "position": { "x": 120, "y": 48.5 }
        }"#;
        let c: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(c.author_name, "@alice");
        assert_eq!(c.comment_body, "typo here");
        assert_eq!(c.anchor_position, AnchorPoint { x: 120.0, y: 48.5 });
    }

    #[test]
    fn test_decode_numeric_id_and_null_position() {
        let json = r#"{
            "id": 42,
            "telegram_name": "bob",
            "page_url": "u",
            "selected_text": "foo bar",
            "comment": "x",
            "created_at": "2024-03-05T10:00:00",
            "position": null
        }"#;
        let c: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, "42");
        assert_eq!(c.anchor_position, AnchorPoint::default());
    }

    #[test]
    fn test_new_comment_uses_wire_names() {
        let payload = NewComment {
            author_name: "@alice".to_string(),
            page_url: "https://docs.example.com/".to_string(),
            selected_text: "the quick brown fox".to_string(),
            comment_body: "typo here".to_string(),
            anchor_position: AnchorPoint { x: 10.0, y: 20.0 },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["telegram_name"], "@alice");
        assert_eq!(value["comment"], "typo here");
        assert_eq!(value["position"]["x"], 10.0);
        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_group_by_fragment_keeps_first_appearance_order() {
        let comments = vec![
            comment("1", "alice", "foo"),
            comment("2", "bob", "bar baz"),
            comment("3", "carol", "foo"),
        ];
        let groups = group_by_fragment(&comments);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].fragment, "foo");
        assert_eq!(groups[0].ids, vec!["1", "3"]);
        assert_eq!(groups[1].fragment, "bar baz");
        assert_eq!(groups[1].ids, vec!["2"]);
    }

    #[test]
    fn test_group_is_case_sensitive_and_skips_empty() {
        let comments = vec![
            comment("1", "a", "Foo"),
            comment("2", "b", "foo"),
            comment("3", "c", ""),
        ];
        let groups = group_by_fragment(&comments);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| !g.fragment.is_empty()));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T10:00:00.123456+00:00"), "3/5/2024");
        assert_eq!(format_date("2024-12-31T23:59:59"), "12/31/2024");
        assert_eq!(format_date("2024-01-09"), "1/9/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_date_uses_timestamp_offset() {
        assert_eq!(format_date("2024-03-05T23:30:00+00:00"), "3/5/2024");
        assert_eq!(format_date("2024-03-05T23:30:00-05:00"), "3/5/2024");
        assert_eq!(format_date("2024-03-06T01:00:00+09:00"), "3/6/2024");
    }
}
