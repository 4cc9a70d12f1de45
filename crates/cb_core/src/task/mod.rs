pub mod resolver;
pub mod types;

pub use resolver::{TaskManager, TaskResolution};
pub use types::{
    TaskBoardState, TaskCompletion, TaskDef, TaskRequirements, TaskRewards, TaskRisks,
};
