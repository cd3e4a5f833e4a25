mod arena;
mod ids;
mod node;
mod raw;

pub(crate) use self::arena::TreeArena;
pub use self::ids::EmployeeId;
pub use self::node::{EmployeeNode, is_empty_employee};
pub(crate) use self::raw::{PeopleChartEnvelope, STATUS_OK, children_of, inline_children_of};
pub use self::raw::RawNode;
