use super::model::{RelationKind, Relationship};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationshipFilter {
    pub active_only: bool,
    pub kinds: Vec<RelationKind>,
}

impl Default for RelationshipFilter {
    fn default() -> Self {
        Self {
            active_only: true,
            kinds: Vec::new(),
        }
    }
}

impl RelationshipFilter {
    pub fn accepts(&self, relationship: &Relationship) -> bool {
        if self.active_only && !relationship.active {
            return false;
        }
        self.kinds.is_empty() || self.kinds.contains(&relationship.kind)
    }

    pub fn apply(&self, relationships: &[Relationship]) -> Vec<Relationship> {
        relationships
            .iter()
            .filter(|relationship| self.accepts(relationship))
            .cloned()
            .collect()
    }

    pub fn toggle_kind(&mut self, kind: &RelationKind) {
        if let Some(position) = self.kinds.iter().position(|selected| selected == kind) {
            self.kinds.remove(position);
        } else {
            self.kinds.push(kind.clone());
        }
    }

    pub fn is_kind_selected(&self, kind: &RelationKind) -> bool {
        self.kinds.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corps::fixtures::relationship;

    #[test]
    fn default_filter_drops_inactive_only() {
        let mut inactive = relationship(2, 3, 4, RelationKind::Mentor);
        inactive.active = false;
        let records = vec![relationship(1, 1, 2, RelationKind::Leibbursch), inactive];

        let filtered = RelationshipFilter::default().apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);

        let everything = RelationshipFilter {
            active_only: false,
            kinds: Vec::new(),
        };
        assert_eq!(everything.apply(&records).len(), 2);
    }

    #[test]
    fn kind_selection_keeps_input_order() {
        let records = vec![
            relationship(1, 1, 2, RelationKind::Freundschaft),
            relationship(2, 2, 3, RelationKind::Leibbursch),
            relationship(3, 3, 4, RelationKind::Freundschaft),
        ];

        let mut filter = RelationshipFilter::default();
        filter.toggle_kind(&RelationKind::Freundschaft);
        assert!(filter.is_kind_selected(&RelationKind::Freundschaft));
        let ids = filter
            .apply(&records)
            .iter()
            .map(|relationship| relationship.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3]);

        filter.toggle_kind(&RelationKind::Freundschaft);
        assert!(filter.kinds.is_empty());
        assert_eq!(filter.apply(&records).len(), 3);
    }
}
