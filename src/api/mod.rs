//! Remote endpoint implementations.
//!
//! | Module | Description |
//! |---|---|
//! | [`quote`] | Quote function invocation and response normalization |

pub mod quote;
