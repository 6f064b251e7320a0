mod filter;
mod load;
mod model;
mod parse;

#[cfg(test)]
pub(crate) mod fixtures;

pub use filter::RelationshipFilter;
pub use load::load_relationships;
pub use model::{Member, MemberId, RelationKind, Relationship};
