use std::fmt;

use serde::Deserialize;

use crate::util::initials;

pub type MemberId = u64;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub number: Option<u32>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        initials(&self.first_name, &self.last_name)
    }
}

/// Relationship category between two members.
///
/// Tags outside the known set are preserved as [`RelationKind::Unknown`] so
/// they can still be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum RelationKind {
    Leibbursch,
    Leibfuchs,
    Mentor,
    Mentee,
    Freundschaft,
    Bruderschaft,
    Unknown(String),
}

impl RelationKind {
    pub const KNOWN: [RelationKind; 6] = [
        RelationKind::Leibbursch,
        RelationKind::Leibfuchs,
        RelationKind::Mentor,
        RelationKind::Mentee,
        RelationKind::Freundschaft,
        RelationKind::Bruderschaft,
    ];

    const NEUTRAL_RGB: [u8; 3] = [0x9c, 0xa3, 0xaf];

    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_ascii_uppercase().as_str() {
            "LEIBBURSCH" => Self::Leibbursch,
            "LEIBFUCHS" => Self::Leibfuchs,
            "MENTOR" => Self::Mentor,
            "MENTEE" => Self::Mentee,
            "FREUNDSCHAFT" => Self::Freundschaft,
            "BRUDERSCHAFT" => Self::Bruderschaft,
            _ => Self::Unknown(tag.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Leibbursch => "LEIBBURSCH",
            Self::Leibfuchs => "LEIBFUCHS",
            Self::Mentor => "MENTOR",
            Self::Mentee => "MENTEE",
            Self::Freundschaft => "FREUNDSCHAFT",
            Self::Bruderschaft => "BRUDERSCHAFT",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Leibbursch => "Leibbursch",
            Self::Leibfuchs => "Leibfuchs",
            Self::Mentor => "Mentor",
            Self::Mentee => "Mentee",
            Self::Freundschaft => "Freundschaft",
            Self::Bruderschaft => "Bruderschaft",
            Self::Unknown(tag) if tag.is_empty() => "Unknown",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Self::Leibbursch => [0x06, 0xb6, 0xd4],
            Self::Leibfuchs => [0x7c, 0x3a, 0xed],
            Self::Mentor => [0xf5, 0x9e, 0x0b],
            Self::Mentee => [0x10, 0xb9, 0x81],
            Self::Freundschaft => [0xec, 0x48, 0x99],
            Self::Bruderschaft => [0x1e, 0x3a, 0x8a],
            Self::Unknown(_) => Self::NEUTRAL_RGB,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for RelationKind {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    pub id: u64,
    pub from: Member,
    pub to: Member,
    pub kind: RelationKind,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bidirectional: bool,
    pub active: bool,
}

impl Relationship {
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.from.id == member_id || self.to.id == member_id
    }

    pub fn counterpart(&self, member_id: MemberId) -> &Member {
        if self.from.id == member_id {
            &self.to
        } else {
            &self.from
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds_case_insensitively() {
        assert_eq!(RelationKind::parse("leibbursch"), RelationKind::Leibbursch);
        assert_eq!(RelationKind::parse(" Mentee "), RelationKind::Mentee);
        assert_eq!(
            RelationKind::parse("BRUDERSCHAFT"),
            RelationKind::Bruderschaft
        );
        for kind in RelationKind::KNOWN {
            assert_eq!(RelationKind::parse(kind.tag()), kind);
        }
    }

    #[test]
    fn unknown_kind_keeps_tag_and_neutral_color() {
        let kind = RelationKind::parse("SPONSOR");
        assert_eq!(kind, RelationKind::Unknown("SPONSOR".to_string()));
        assert!(!kind.is_known());
        assert_eq!(kind.label(), "SPONSOR");
        assert_eq!(kind.rgb(), [0x9c, 0xa3, 0xaf]);
        assert_eq!(RelationKind::parse("").label(), "Unknown");
    }

    #[test]
    fn member_names() {
        let member = Member {
            id: 7,
            first_name: "Friedrich".to_string(),
            last_name: "Albers".to_string(),
            ..Member::default()
        };
        assert_eq!(member.full_name(), "Friedrich Albers");
        assert_eq!(member.initials(), "FA");

        let nameless = Member::default();
        assert_eq!(nameless.full_name(), "");
        assert_eq!(nameless.initials(), "");
    }
}
