//! Shared UI components rendered around the routed views.

pub mod nav_bar;
