//! FileMaker data types

mod container;

pub use container::*;
