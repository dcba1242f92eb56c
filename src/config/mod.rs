// src/config/mod.rs
//! Configuration system for udf-crypt
//!
//! TOML file + env override. The loaded `Config` is owned by the
//! `CryptoContext`; there is no global config cell.

pub use app::{CipherSettings, Config, KeyPaths, KeySettings};
pub use defaults::default_key_dir;

mod app;
mod defaults;
