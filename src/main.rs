//! # Voxel Terrain Demo Entry Point
//!
//! Calls into the library's `run()` function, which streams terrain around a
//! simulated walking observer and logs what happens.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(error) = voxel_terrain::run() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}
