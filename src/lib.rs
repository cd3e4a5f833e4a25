pub mod builder;
pub mod config;
pub mod cycles;
pub mod error;
pub mod index;
pub mod logging;
pub mod model;
pub mod remote;
pub mod sanitize;
pub mod session;


pub use builder::{BuildOptions, BuildProgress, ConcurrencyLimiter, build_full_tree};
pub use cycles::remove_circular_references;
pub use error::{LoadError, TransportError};
pub use index::{HierarchyIndex, OrgChart};
pub use model::{EmployeeId, EmployeeNode, RawNode};
pub use remote::{HttpSubtreeFetcher, SubtreeFetcher};
pub use sanitize::sanitize;
pub use session::{OrgChartSession, SessionState};
