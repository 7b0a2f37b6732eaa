mod task;

pub use task::{Filter, Stats, Task};
