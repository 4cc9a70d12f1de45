//! Validation for catalog entries
//!
//! Card and move definitions are checked before any catalog mutation;
//! callers receive a full report rather than the first failure.

use super::types::{Card, Move};
use crate::error::ValidationReport;
use std::fmt;

/// Typed validation failures for catalog entries
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidStarLevel(u8),
    NegativeStat { stat: String, value: i32 },
    NegativePower(i32),
    NegativeEnergyCost(i32),
    EmptyClass,
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValidationError::EmptyName => write!(f, "Name cannot be empty"),
            CatalogValidationError::NameTooLong(len) => {
                write!(f, "Name too long: {} characters (max 50)", len)
            }
            CatalogValidationError::InvalidStarLevel(star) => {
                write!(f, "Invalid star level: {}. Must be between 1 and 5", star)
            }
            CatalogValidationError::NegativeStat { stat, value } => {
                write!(f, "Stat {} cannot be negative: {}", stat, value)
            }
            CatalogValidationError::NegativePower(power) => {
                write!(f, "Move power cannot be negative: {}", power)
            }
            CatalogValidationError::NegativeEnergyCost(cost) => {
                write!(f, "Energy cost cannot be negative: {}", cost)
            }
            CatalogValidationError::EmptyClass => write!(f, "Class id cannot be empty"),
        }
    }
}

impl std::error::Error for CatalogValidationError {}

pub struct CardValidator;

impl CardValidator {
    pub fn validate_name(name: &str) -> Result<(), CatalogValidationError> {
        if name.trim().is_empty() {
            return Err(CatalogValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CatalogValidationError::NameTooLong(name.len()));
        }
        Ok(())
    }

    pub fn validate_star_level(star_level: u8) -> Result<(), CatalogValidationError> {
        if !(1..=5).contains(&star_level) {
            return Err(CatalogValidationError::InvalidStarLevel(star_level));
        }
        Ok(())
    }

    pub fn validate_stats(card: &Card) -> Vec<CatalogValidationError> {
        let mut errors = Vec::new();
        for stat in ["attack", "defense", "health", "energy"] {
            let value = card.stats.get(stat).unwrap();
            if value < 0 {
                errors.push(CatalogValidationError::NegativeStat {
                    stat: stat.to_string(),
                    value,
                });
            }
        }
        errors
    }

    /// Full card validation; collects every failure.
    pub fn validate(card: &Card) -> ValidationReport {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_name(&card.name) {
            errors.push(e.to_string());
        }
        if let Err(e) = Self::validate_star_level(card.star_level) {
            errors.push(e.to_string());
        }
        if card.class.trim().is_empty() {
            errors.push(CatalogValidationError::EmptyClass.to_string());
        }
        for e in Self::validate_stats(card) {
            errors.push(e.to_string());
        }

        ValidationReport::from_errors(errors)
    }
}

pub struct MoveValidator;

impl MoveValidator {
    pub fn validate(mv: &Move) -> ValidationReport {
        let mut errors = Vec::new();

        if let Err(e) = CardValidator::validate_name(&mv.name) {
            errors.push(e.to_string());
        }
        if mv.power < 0 {
            errors.push(CatalogValidationError::NegativePower(mv.power).to_string());
        }
        if mv.energy_cost < 0 {
            errors.push(CatalogValidationError::NegativeEnergyCost(mv.energy_cost).to_string());
        }

        ValidationReport::from_errors(errors)
    }
}
