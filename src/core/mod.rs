// ─── Bootstrapper Core ───
// Update-and-launch pipeline: fetch → gate → sync → launch.
//
// Architecture:
//   core/
//     channel     Update channels and the one-shot channel choice
//     version/    Manifest model, version comparators, compatibility gate
//     downloader/ Streaming SHA-256 verified downloads
//     repository/ Artifact cache: select, clean, download, verify
//     launch/     Runtime discovery, properties, arguments, process hand-off
//     progress    Progress sinks and the splash guard
//     state/      Paths, persisted settings, run configuration

pub mod channel;
pub mod downloader;
pub mod error;
pub mod http;
pub mod launch;
pub mod platform;
pub mod progress;
pub mod repository;
pub mod state;
pub mod version;
