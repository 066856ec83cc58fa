// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod fake_storage;
pub use fake_storage::*;
mod servers;
pub use servers::*;
