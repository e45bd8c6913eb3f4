pub mod identity;
pub mod task;

pub use identity::{Identity, IdentityRecord};
pub use task::{
    ListTasksQuery, NewTaskRequest, ShareTaskRequest, Task, TaskRecord, UpdateTaskRequest,
    DEFAULT_STATUS,
};
