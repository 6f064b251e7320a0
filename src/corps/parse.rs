use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use super::model::{Member, RelationKind, Relationship};
use crate::util::split_full_name;

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    #[serde(default)]
    id: u64,
    #[serde(default, alias = "firstname")]
    first_name: String,
    #[serde(default, alias = "lastname")]
    last_name: String,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "profileImageUrl", alias = "pictureUrl")]
    avatar_url: Option<String>,
}

impl From<RawMember> for Member {
    fn from(raw: RawMember) -> Self {
        Member {
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            number: raw.number,
            status: raw.status,
            avatar_url: raw.avatar_url,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNestedRecord {
    #[serde(default)]
    id: u64,
    #[serde(alias = "fromProfile")]
    from_member: RawMember,
    #[serde(alias = "toProfile")]
    to_member: RawMember,
    #[serde(alias = "connectionType", alias = "relationType")]
    relation_kind: RelationKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    bidirectional: bool,
    #[serde(default = "default_active")]
    active: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnection {
    #[serde(default)]
    id: u64,
    #[serde(alias = "relationType")]
    connection_type: RelationKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    bidirectional: bool,
    #[serde(default = "default_active")]
    active: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWrappedRecord {
    connection: RawConnection,
    from_profile: RawMember,
    to_profile: RawMember,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlatRecord {
    #[serde(default)]
    id: u64,
    from_profile_id: u64,
    #[serde(default)]
    from_profile_name: String,
    to_profile_id: u64,
    #[serde(default)]
    to_profile_name: String,
    relation_type: RelationKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    bidirectional: Option<bool>,
    #[serde(default)]
    active: Option<bool>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Wrapped(RawWrappedRecord),
    Nested(RawNestedRecord),
    Flat(RawFlatRecord),
}

fn member_from_name(id: u64, full_name: &str) -> Member {
    let (first_name, last_name) = split_full_name(full_name);
    Member {
        id,
        first_name,
        last_name,
        ..Member::default()
    }
}

impl From<RawRecord> for Relationship {
    fn from(raw: RawRecord) -> Self {
        match raw {
            RawRecord::Nested(record) => Relationship {
                id: record.id,
                from: record.from_member.into(),
                to: record.to_member.into(),
                kind: record.relation_kind,
                description: record.description,
                start_date: record.start_date,
                end_date: record.end_date,
                bidirectional: record.bidirectional,
                active: record.active,
            },
            RawRecord::Wrapped(record) => Relationship {
                id: record.connection.id,
                from: record.from_profile.into(),
                to: record.to_profile.into(),
                kind: record.connection.connection_type,
                description: record.connection.description,
                start_date: record.connection.start_date,
                end_date: record.connection.end_date,
                bidirectional: record.connection.bidirectional,
                active: record.connection.active,
            },
            RawRecord::Flat(record) => Relationship {
                id: record.id,
                from: member_from_name(record.from_profile_id, &record.from_profile_name),
                to: member_from_name(record.to_profile_id, &record.to_profile_name),
                kind: record.relation_type,
                description: record.description,
                start_date: record.start_date,
                end_date: record.end_date,
                bidirectional: record.bidirectional.unwrap_or(false),
                active: record.active.unwrap_or(true),
            },
        }
    }
}

pub(super) fn parse_relationships(raw: &str) -> Result<Vec<Relationship>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in relationship file")?;

    let entries = match &parsed {
        Value::Array(entries) => entries,
        Value::Object(object) => object
            .get("connections")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("expected a `connections` array in relationship JSON"))?,
        _ => {
            return Err(anyhow!(
                "unexpected JSON type in relationship file; expected an array or object"
            ));
        }
    };

    let mut relationships = Vec::with_capacity(entries.len());
    for (position, value) in entries.iter().enumerate() {
        match RawRecord::deserialize(value) {
            Ok(record) => relationships.push(record.into()),
            Err(error) => warn!("skipping relationship record #{position}: {error}"),
        }
    }

    Ok(relationships)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_records() {
        let raw = r#"[
            {
                "id": 11,
                "fromMember": {"id": 1, "firstName": "Anton", "lastName": "Kraus", "number": 412},
                "toMember": {"id": 2, "firstname": "Bernd", "lastname": "Lehmann", "status": "CB"},
                "relationKind": "LEIBBURSCH",
                "startDate": "2019-10-01",
                "active": true
            }
        ]"#;

        let relationships = parse_relationships(raw).expect("valid input");
        assert_eq!(relationships.len(), 1);
        let relationship = &relationships[0];
        assert_eq!(relationship.id, 11);
        assert_eq!(relationship.kind, RelationKind::Leibbursch);
        assert_eq!(relationship.from.full_name(), "Anton Kraus");
        assert_eq!(relationship.from.number, Some(412));
        assert_eq!(relationship.to.status.as_deref(), Some("CB"));
        assert_eq!(relationship.start_date.as_deref(), Some("2019-10-01"));
        assert!(relationship.active);
    }

    #[test]
    fn parses_wrapped_records_inside_connections_object() {
        let raw = r#"{
            "connections": [
                {
                    "connection": {"id": 5, "connectionType": "FREUNDSCHAFT", "active": false},
                    "fromProfile": {"id": 3, "firstname": "Carl", "lastname": "Maier"},
                    "toProfile": {"id": 4, "firstname": "Dieter", "lastname": "Neumann",
                                  "profileImageUrl": "/img/4.png"}
                }
            ]
        }"#;

        let relationships = parse_relationships(raw).expect("valid input");
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].kind, RelationKind::Freundschaft);
        assert!(!relationships[0].active);
        assert_eq!(relationships[0].to.avatar_url.as_deref(), Some("/img/4.png"));
    }

    #[test]
    fn parses_flat_backend_records_and_splits_names() {
        let raw = r#"[
            {
                "id": 9,
                "fromProfileId": 20,
                "fromProfileName": "Ernst August Vogel",
                "toProfileId": 21,
                "toProfileName": "Fritz",
                "relationType": "MENTOR",
                "bidirectional": true
            }
        ]"#;

        let relationships = parse_relationships(raw).expect("valid input");
        let relationship = &relationships[0];
        assert_eq!(relationship.from.id, 20);
        assert_eq!(relationship.from.first_name, "Ernst");
        assert_eq!(relationship.from.last_name, "August Vogel");
        assert_eq!(relationship.to.first_name, "Fritz");
        assert_eq!(relationship.to.last_name, "");
        assert!(relationship.bidirectional);
        assert!(relationship.active);
    }

    #[test]
    fn unknown_kinds_survive_and_malformed_records_are_skipped() {
        let raw = r#"[
            {"id": 1, "fromMember": {"id": 1}, "toMember": {"id": 2}, "relationKind": "SPONSOR"},
            {"id": 2, "note": "not a relationship"},
            {"id": 3, "fromMember": {}, "toMember": {"id": 4}, "relationKind": "mentee"}
        ]"#;

        let relationships = parse_relationships(raw).expect("valid input");
        assert_eq!(relationships.len(), 2);
        assert_eq!(
            relationships[0].kind,
            RelationKind::Unknown("SPONSOR".to_string())
        );
        assert_eq!(relationships[1].from.id, 0);
        assert_eq!(relationships[1].kind, RelationKind::Mentee);
    }

    #[test]
    fn rejects_documents_without_records() {
        assert!(parse_relationships("not json").is_err());
        assert!(parse_relationships("42").is_err());
        assert!(parse_relationships(r#"{"items": []}"#).is_err());
        assert!(parse_relationships("[]").expect("empty list").is_empty());
    }
}
