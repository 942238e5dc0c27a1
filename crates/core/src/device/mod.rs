//! Donated device entity and its availability lifecycle

mod model;

pub use model::{Device, DeviceCondition, DeviceStatus, DeviceType, NewDevice};
