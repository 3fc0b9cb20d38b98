mod activity;
mod linear;
mod memory;
mod traits;

pub use activity::{collect_activity, Activity, ActivityWindow};
pub use linear::{LinearService, Viewer};
pub use memory::MemoryService;
pub use traits::{ServiceError, TrackerService};
