pub mod errors;
pub mod events;
pub mod filters;
pub mod order;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod selection;
pub mod sort;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;
