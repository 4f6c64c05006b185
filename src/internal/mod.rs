//! Internal implementation details.

pub(crate) mod cycle;

pub(crate) use cycle::find_cycle;
