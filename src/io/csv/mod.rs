//! CSV reading for the score table.

mod read;

pub(crate) use read::*;
