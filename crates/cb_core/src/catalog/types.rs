use serde::{Deserialize, Serialize};

/// How a card enters play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Starter,
    Battle,
    Task,
    Store,
}

/// Move damage/effect model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Physical,
    Magical,
    Status,
}

/// Slot a move occupies in a card's kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Attack,
    Defense,
    Support,
    Ultimate,
}

/// Who a move resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    SingleEnemy,
    AllEnemies,
    Ally,
    OwnCharacter,
}

/// Core stat block shared by cards and characters.
///
/// Canonical field names; older snapshots using `power`/`hp`/`mp` are
/// renamed by save migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
    pub energy: i32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self { attack: 10, defense: 10, health: 100, energy: 100 }
    }
}

impl StatBlock {
    /// Look up a stat by its snapshot field name.
    pub fn get(&self, name: &str) -> Option<i32> {
        match name {
            "attack" => Some(self.attack),
            "defense" => Some(self.defense),
            "health" => Some(self.health),
            "energy" => Some(self.energy),
            _ => None,
        }
    }

    pub fn set(&mut self, name: &str, value: i32) -> bool {
        match name {
            "attack" => self.attack = value,
            "defense" => self.defense = value,
            "health" => self.health = value,
            "energy" => self.energy = value,
            _ => return false,
        }
        true
    }
}

/// Bonus multiplier per star level (1-5), applied to battle ratings.
pub fn star_multiplier(star_level: u8) -> f32 {
    match star_level {
        0 | 1 => 1.0,
        2 => 1.1,
        3 => 1.2,
        4 => 1.3,
        _ => 1.5,
    }
}

/// A card definition in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Catalog-unique id; generated when absent on add
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: CardCategory,
    /// Class id this card belongs to
    pub class: String,
    /// 1-5
    pub star_level: u8,
    pub image_url: String,
    pub stats: StatBlock,
    /// Ids of moves attached to this card
    pub skills: Vec<String>,
    pub is_starter: bool,
}

impl Card {
    pub fn new(
        id: String,
        name: String,
        category: CardCategory,
        class: String,
        star_level: u8,
    ) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            category,
            class,
            star_level,
            image_url: String::new(),
            stats: StatBlock::default(),
            skills: Vec::new(),
            is_starter: category == CardCategory::Starter,
        }
    }

    pub fn has_skill(&self, move_id: &str) -> bool {
        self.skills.iter().any(|id| id == move_id)
    }

    pub fn display(&self) -> String {
        format!(
            "{} {} [{}] {:?}",
            "*".repeat(self.star_level.max(1) as usize),
            self.name,
            self.class,
            self.category
        )
    }
}

/// A move definition, either in the global library or attached to cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub name: String,
    pub description: String,
    pub power: i32,
    pub energy_cost: i32,
    pub kind: MoveKind,
    pub category: MoveCategory,
    pub target: TargetType,
    /// Turns between uses
    pub cooldown: u32,
    /// Class ids this move applies to; empty means any class
    pub classes: Vec<String>,
}

impl Move {
    pub fn new(id: String, name: String, kind: MoveKind, category: MoveCategory) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            power: 0,
            energy_cost: 0,
            kind,
            category,
            target: TargetType::SingleEnemy,
            cooldown: 0,
            classes: Vec::new(),
        }
    }

    pub fn applies_to_class(&self, class: &str) -> bool {
        self.classes.is_empty() || self.classes.iter().any(|c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_block_lookup() {
        let stats = StatBlock { attack: 12, defense: 8, health: 90, energy: 70 };
        assert_eq!(stats.get("attack"), Some(12));
        assert_eq!(stats.get("energy"), Some(70));
        assert_eq!(stats.get("speed"), None);
    }

    #[test]
    fn test_star_multiplier_monotonic() {
        let mut last = 0.0;
        for star in 1..=5 {
            let m = star_multiplier(star);
            assert!(m >= last);
            last = m;
        }
    }

    #[test]
    fn test_move_class_gate() {
        let mut mv = Move::new(
            "slash".to_string(),
            "Slash".to_string(),
            MoveKind::Physical,
            MoveCategory::Attack,
        );
        assert!(mv.applies_to_class("warrior"));

        mv.classes.push("warrior".to_string());
        assert!(mv.applies_to_class("warrior"));
        assert!(!mv.applies_to_class("mage"));
    }

    #[test]
    fn test_starter_flag_follows_category() {
        let card = Card::new(
            "c1".to_string(),
            "Novice".to_string(),
            CardCategory::Starter,
            "warrior".to_string(),
            1,
        );
        assert!(card.is_starter);

        let card = Card::new(
            "c2".to_string(),
            "Brute".to_string(),
            CardCategory::Battle,
            "warrior".to_string(),
            3,
        );
        assert!(!card.is_starter);
    }
}
