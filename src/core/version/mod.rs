pub mod compare;
pub mod gate;
pub mod manifest;

pub use compare::{compare_semver, compare_tokenized};
pub use gate::GateInput;
pub use manifest::{Artifact, Diff, Manifest, Platform};
