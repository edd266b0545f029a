// Relational provider options
//
// A provider's options are set explicitly by the caller, filled from raw
// configuration by `configure`, and then turned into service registrations by
// `apply_services`.

pub mod db;

pub use db::*;
