pub mod client;
pub mod hash;

pub use client::Downloader;
pub use hash::{existing_sha256, sha256_file};
