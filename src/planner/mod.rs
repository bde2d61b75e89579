//! Route and stop planning: everything between a fetched route and a priced
//! stop sequence.

pub mod corridor;
pub mod debounce;
pub mod distance;
pub mod fares;
pub mod naming;
pub mod polyline;
pub mod session;
pub mod stops;

mod refusal;

pub use refusal::Refusal;
