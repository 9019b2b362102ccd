pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod gates;
pub mod model;
pub mod session;
pub mod storage;
pub mod task_factory;
