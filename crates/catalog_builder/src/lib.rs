//! Catalog Builder Library
//!
//! Emits the built-in card catalog as a reviewable JSON file, validates
//! edited catalog files, and seeds fresh save directories.

pub mod catalog_file;

use anyhow::{Context, Result};
use std::path::Path;

pub use catalog_file::{read_catalog_file, write_catalog_file, CatalogFile, ValidationSummary};

use cb_core::save::SaveManager;
use cb_core::state::GameState;

/// Generate the default catalog file at `output`.
pub fn generate(output: &Path) -> Result<CatalogFile> {
    let file = CatalogFile::from_defaults();
    write_catalog_file(output, &file)
        .with_context(|| format!("Failed to write catalog file: {}", output.display()))?;
    Ok(file)
}

/// Validate a catalog file and report every problem found.
pub fn validate(input: &Path) -> Result<ValidationSummary> {
    let file = read_catalog_file(input)
        .with_context(|| format!("Failed to read catalog file: {}", input.display()))?;
    Ok(file.validate())
}

/// Seed a save directory with a fresh default game state.
pub fn seed_saves(dir: &Path) -> Result<()> {
    let state = GameState::with_defaults();
    SaveManager::save_all(dir, &state)
        .with_context(|| format!("Failed to seed save directory: {}", dir.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::save::StoreKey;
    use tempfile::TempDir;

    #[test]
    fn test_generate_then_validate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");

        let file = generate(&path).unwrap();
        assert!(file.card_count > 0);
        assert!(path.exists());

        let summary = validate(&path).unwrap();
        assert!(summary.is_valid(), "default catalog must validate: {:?}", summary.errors);
    }

    #[test]
    fn test_seed_saves_writes_all_stores() {
        let temp_dir = TempDir::new().unwrap();
        seed_saves(temp_dir.path()).unwrap();

        for key in StoreKey::ALL {
            assert!(SaveManager::store_exists(temp_dir.path(), key), "{} missing", key.as_str());
        }
    }
}
