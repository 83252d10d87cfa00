//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `view_frame` renders whichever view a route resolves to; `logout` is the
//! one view the shell implements itself.

pub mod logout;
pub mod view_frame;
