pub mod changelog;
pub mod milestone;

pub use changelog::{DEFAULT_PAGE_LIMIT, collect_closed_issues};
pub use milestone::{MilestoneLookupError, list_milestones, resolve_milestone_title};
