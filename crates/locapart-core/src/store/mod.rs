// ── Cache storage ──

mod collection;

pub(crate) use collection::{EntityCollection, StagedEdit};
