use super::model::{Member, MemberId, RelationKind, Relationship};

pub(crate) fn member(id: MemberId) -> Member {
    Member {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        ..Member::default()
    }
}

pub(crate) fn relationship(
    id: u64,
    from: MemberId,
    to: MemberId,
    kind: RelationKind,
) -> Relationship {
    Relationship {
        id,
        from: member(from),
        to: member(to),
        kind,
        description: None,
        start_date: None,
        end_date: None,
        bidirectional: false,
        active: true,
    }
}
