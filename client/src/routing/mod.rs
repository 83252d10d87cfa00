//! Client-side routing.
//!
//! ARCHITECTURE
//! ============
//! `pattern` compiles path templates, `table` holds the ordered clinic route
//! list and resolves paths against it, `navigator` tracks the active view and
//! runs activation side effects, and `base` maps browser URLs to app paths.
//!
//! No access control happens here: every path resolves regardless of the
//! session's role. Pages enforce their own access.

pub mod base;
pub mod navigator;
pub mod pattern;
pub mod table;

pub use navigator::{NavigationEvent, Navigator};
pub use pattern::{Params, PatternError, RoutePattern};
pub use table::{Resolution, RouteTable, ViewId, clinic_routes};
