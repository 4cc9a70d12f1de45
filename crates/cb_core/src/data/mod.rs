//! Built-in game data
//!
//! The default catalog, move library and task board a fresh profile
//! starts with. Admin tooling can replace all of it at runtime; these
//! entries only guarantee the game is playable out of the box.

use crate::catalog::{Card, CardCategory, Move, MoveCategory, MoveKind, StatBlock, TargetType};
use crate::task::{TaskDef, TaskRequirements, TaskRewards, TaskRisks};
use std::collections::HashMap;

pub const CLASSES: [&str; 4] = ["warrior", "mage", "ranger", "cleric"];

fn mk_move(
    id: &str,
    name: &str,
    kind: MoveKind,
    category: MoveCategory,
    power: i32,
    energy_cost: i32,
    classes: &[&str],
) -> Move {
    let mut mv = Move::new(id.to_string(), name.to_string(), kind, category);
    mv.power = power;
    mv.energy_cost = energy_cost;
    mv.classes = classes.iter().map(|c| c.to_string()).collect();
    mv
}

pub fn default_moves() -> Vec<Move> {
    let mut moves = vec![
        mk_move("move_slash", "Slash", MoveKind::Physical, MoveCategory::Attack, 30, 10, &["warrior"]),
        mk_move("move_shield_wall", "Shield Wall", MoveKind::Status, MoveCategory::Defense, 0, 15, &["warrior"]),
        mk_move("move_fireball", "Fireball", MoveKind::Magical, MoveCategory::Attack, 40, 20, &["mage"]),
        mk_move("move_arcane_ward", "Arcane Ward", MoveKind::Status, MoveCategory::Defense, 0, 15, &["mage"]),
        mk_move("move_piercing_shot", "Piercing Shot", MoveKind::Physical, MoveCategory::Attack, 35, 15, &["ranger"]),
        mk_move("move_smite", "Smite", MoveKind::Magical, MoveCategory::Attack, 25, 10, &["cleric"]),
        mk_move("move_mend", "Mend", MoveKind::Status, MoveCategory::Support, 20, 15, &["cleric"]),
        mk_move("move_second_wind", "Second Wind", MoveKind::Status, MoveCategory::Support, 15, 10, &[]),
    ];

    moves.iter_mut().find(|m| m.id == "move_mend").unwrap().target = TargetType::Ally;
    moves.iter_mut().find(|m| m.id == "move_second_wind").unwrap().target =
        TargetType::OwnCharacter;
    moves
}

fn mk_card(
    id: &str,
    name: &str,
    category: CardCategory,
    class: &str,
    star_level: u8,
    stats: StatBlock,
    skills: &[&str],
) -> Card {
    let mut card = Card::new(id.to_string(), name.to_string(), category, class.to_string(), star_level);
    card.stats = stats;
    card.skills = skills.iter().map(|s| s.to_string()).collect();
    card
}

pub fn default_cards() -> Vec<Card> {
    let base = StatBlock::default();
    vec![
        // One starter per class
        mk_card("starter_warrior", "Squire", CardCategory::Starter, "warrior", 1,
            StatBlock { attack: 14, defense: 12, ..base }, &["move_slash"]),
        mk_card("starter_mage", "Apprentice", CardCategory::Starter, "mage", 1,
            StatBlock { attack: 16, defense: 8, ..base }, &["move_fireball"]),
        mk_card("starter_ranger", "Scout", CardCategory::Starter, "ranger", 1,
            StatBlock { attack: 15, defense: 10, ..base }, &["move_piercing_shot"]),
        mk_card("starter_cleric", "Acolyte", CardCategory::Starter, "cleric", 1,
            StatBlock { attack: 12, defense: 14, ..base }, &["move_smite", "move_mend"]),
        // Battle cards
        mk_card("battle_knight", "Knight-Errant", CardCategory::Battle, "warrior", 3,
            StatBlock { attack: 22, defense: 18, ..base }, &["move_slash", "move_shield_wall"]),
        mk_card("battle_pyromancer", "Pyromancer", CardCategory::Battle, "mage", 3,
            StatBlock { attack: 26, defense: 10, ..base }, &["move_fireball", "move_arcane_ward"]),
        mk_card("battle_warden", "Grove Warden", CardCategory::Battle, "ranger", 4,
            StatBlock { attack: 24, defense: 16, ..base }, &["move_piercing_shot", "move_second_wind"]),
        // Task cards
        mk_card("task_courier", "Courier", CardCategory::Task, "ranger", 2,
            StatBlock { attack: 12, defense: 10, ..base }, &[]),
        // Store cards
        mk_card("store_templar", "Templar", CardCategory::Store, "cleric", 4,
            StatBlock { attack: 20, defense: 20, ..base }, &["move_smite", "move_mend"]),
        mk_card("store_archmage", "Archmage", CardCategory::Store, "mage", 5,
            StatBlock { attack: 32, defense: 12, ..base }, &["move_fireball", "move_arcane_ward"]),
    ]
}

fn mk_task(
    id: &str,
    name: &str,
    required: &[(&str, i32)],
    rewards: TaskRewards,
    risks: TaskRisks,
    cooldown_secs: u64,
) -> TaskDef {
    let mut task = TaskDef::new(id.to_string(), name.to_string());
    task.requirements = TaskRequirements {
        required_stats: required
            .iter()
            .map(|(stat, value)| (stat.to_string(), *value))
            .collect::<HashMap<_, _>>(),
        min_level: None,
    };
    task.rewards = rewards;
    task.risks = risks;
    task.cooldown_secs = cooldown_secs;
    task
}

pub fn default_tasks() -> Vec<TaskDef> {
    let mut tasks = vec![
        mk_task(
            "task_night_patrol",
            "Night Patrol",
            &[("energy", 20), ("health", 30)],
            TaskRewards { base_payment: 50, experience_gain: 120 },
            TaskRisks { failure_chance: 0.2, health_risk: 16, energy_cost: 25 },
            3600,
        ),
        mk_task(
            "task_herb_run",
            "Herb Run",
            &[("energy", 10)],
            TaskRewards { base_payment: 20, experience_gain: 40 },
            TaskRisks { failure_chance: 0.05, health_risk: 4, energy_cost: 10 },
            600,
        ),
        mk_task(
            "task_escort_caravan",
            "Escort the Caravan",
            &[("attack", 18), ("energy", 40)],
            TaskRewards { base_payment: 150, experience_gain: 300 },
            TaskRisks { failure_chance: 0.35, health_risk: 30, energy_cost: 45 },
            86400,
        ),
        mk_task(
            "task_crypt_sweep",
            "Crypt Sweep",
            &[("attack", 25), ("defense", 15), ("health", 50)],
            TaskRewards { base_payment: 400, experience_gain: 800 },
            TaskRisks { failure_chance: 0.5, health_risk: 60, energy_cost: 60 },
            86400,
        ),
    ];

    // The crypt is gated on progression, not just stats
    tasks.last_mut().unwrap().requirements.min_level = Some(3);
    tasks
}
