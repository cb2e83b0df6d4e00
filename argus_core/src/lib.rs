// argus_core/src/lib.rs

// This file defines the public modules of your library.
pub mod cloud;
pub mod color;
pub mod io;
pub mod pattern;
pub mod pose;
pub mod prelude;
pub mod scan;
