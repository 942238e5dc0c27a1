//! Session identity and its durable single-slot store

mod model;
mod store;

pub use model::{Role, Session};
pub use store::SessionStore;
