//! Host and group assignments
//!
//! ```text
//! # groups bundle checks with fixed arguments
//! @linux $ping, $ssh 22
//!
//! # hosts list groups and checks; the host name becomes $1
//! 10.1.214.30 @linux, $mysql "MySQL" 3306
//! ```

mod model;
mod resolver;

pub use model::{Group, Host, Invocation, ResolvedModel};
pub use resolver::resolve_assignments;
