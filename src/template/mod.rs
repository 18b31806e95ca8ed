//! Check templates: the catalog and placeholder rendering
//!
//! # Example
//!
//! ```text
//! $ping
//! define service {
//!     host_name   $1
//!     check_command check_ping!$2
//! }
//! ```
//!
//! Rendering the `ping` template with `["10.0.0.1", "100,20%"]` fills `$1`
//! and `$2` in order.

mod registry;
mod render;

pub use registry::{parse_catalog, Catalog, CheckTemplate};
pub use render::render;
