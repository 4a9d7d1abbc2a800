//! Client core for a small shelter-management service: record store,
//! mutations, dashboard statistics and the user/admin access gate.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
