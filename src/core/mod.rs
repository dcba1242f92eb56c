// src/core/mod.rs
pub mod cipher;
pub mod derive;
pub mod envelope;
pub mod keygen;
pub mod pem;
pub mod util;

pub use cipher::*;
pub use derive::*;
pub use envelope::*;
pub use keygen::*;
pub use pem::*;
pub use util::*;
