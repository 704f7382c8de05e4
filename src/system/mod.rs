pub mod catalog;
pub mod collector;
pub mod kill;
pub mod process;
pub mod rank;
pub mod reader;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod fixture;
