//! Clinic portal SPA entry point.
//!
//! Built to WASM (e.g. with `trunk`); all setup lives in [`client::start`].

fn main() {
    client::start();
}
