//! # Voxel World Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(error) = voxel_world::run() {
        log::error!("{error}");
        std::process::exit(1);
    }
}
