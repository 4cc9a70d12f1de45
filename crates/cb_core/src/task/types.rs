use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stat thresholds a character must meet before attempting a task.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskRequirements {
    /// stat name -> minimum value
    pub required_stats: HashMap<String, i32>,
    pub min_level: Option<u32>,
}

/// What a completed task pays out.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskRewards {
    pub base_payment: i64,
    pub experience_gain: u32,
}

/// What attempting the task can cost.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskRisks {
    /// Probability the attempt fails, in [0, 1]
    pub failure_chance: f32,
    /// Health lost on failure; success costs half of this, rounded down
    pub health_risk: i32,
    /// Energy spent on every attempt
    pub energy_cost: i32,
}

/// A task definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirements: TaskRequirements,
    pub rewards: TaskRewards,
    pub risks: TaskRisks,
    /// Seconds between attempts
    pub cooldown_secs: u64,
}

impl TaskDef {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            requirements: TaskRequirements::default(),
            rewards: TaskRewards::default(),
            risks: TaskRisks::default(),
            cooldown_secs: 0,
        }
    }

    /// Seconds until this task can be attempted again, given when it was
    /// last completed. Zero means ready.
    pub fn cooldown_remaining(&self, last_completed: Option<u64>, current_time: u64) -> u64 {
        match last_completed {
            None => 0,
            Some(last) => {
                let ready_at = last.saturating_add(self.cooldown_secs);
                ready_at.saturating_sub(current_time)
            }
        }
    }
}

/// One resolved task attempt, appended to the board history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub task_id: String,
    pub player_id: String,
    pub succeeded: bool,
    pub roll: f32,
    pub coins_awarded: i64,
    pub experience_awarded: u32,
    pub timestamp: u64,
}

/// Task board state for save/load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskBoardState {
    pub tasks: HashMap<String, TaskDef>,
    /// task id -> last completion timestamp
    pub last_completed: HashMap<String, u64>,
    /// Append-only completion log
    pub history: Vec<TaskCompletion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_remaining() {
        let mut task = TaskDef::new("t1".to_string(), "Patrol".to_string());
        task.cooldown_secs = 60;

        assert_eq!(task.cooldown_remaining(None, 1000), 0);
        assert_eq!(task.cooldown_remaining(Some(1000), 1010), 50);
        assert_eq!(task.cooldown_remaining(Some(1000), 1060), 0);
        assert_eq!(task.cooldown_remaining(Some(1000), 2000), 0);
    }

    #[test]
    fn test_zero_cooldown_always_ready() {
        let task = TaskDef::new("t1".to_string(), "Patrol".to_string());
        assert_eq!(task.cooldown_remaining(Some(1000), 1000), 0);
    }
}
