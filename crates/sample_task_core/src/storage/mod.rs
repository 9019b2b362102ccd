pub mod media_store;
pub mod task_store;

pub use media_store::MediaStore;
pub use task_store::TaskStore;
