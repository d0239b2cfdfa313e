pub mod column;
pub mod order;
pub mod profile;
pub mod task;

pub use column::{Column, ColumnId, NewColumn};
pub use order::{to_minor_units, CreateOrderRequest, CreateOrderResponse, OrderErrorBody};
pub use profile::{Profile, ProfileUpdate, Theme};
pub use task::{NewTask, Priority, Task, TaskId, TaskUpdate};
