//! Unpacking of cached archives into the target directory.

mod untar;
mod unzip;

pub use untar::extract_tar_gz;
pub use unzip::{entry_destination, extract_zip};
