//! Menu data model.
//! Mirrors the JSON payload served at `/api/user/{hash}/menu.json` and the
//! local files the static menu is pre-rendered from.

use crate::error::{MenuFileError, MenuProblem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Filter value that shows every category. Never a valid category id.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
}

impl Item {
    /// Price as shown on the menu, always two decimals.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }
}

impl MenuDocument {
    /// Reads a menu document from a local JSON file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuFileError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MenuFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: MenuDocument =
            serde_json::from_str(&raw).map_err(|source| MenuFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        doc.validate().map_err(|problem| MenuFileError::Invalid {
            path: path.to_path_buf(),
            problem,
        })?;
        Ok(doc)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Checks that category ids can serve as join keys between filter
    /// controls and sections: non-empty, unique, and never `all`.
    pub fn validate(&self) -> Result<(), MenuProblem> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.is_empty() {
                return Err(MenuProblem::EmptyId);
            }
            if category.id == ALL_CATEGORIES {
                return Err(MenuProblem::ReservedId);
            }
            if !seen.insert(category.id.as_str()) {
                return Err(MenuProblem::DuplicateId(category.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> MenuDocument {
        serde_json::from_str(
            r#"{
                "categories": [
                    {"id": "starters", "name": "Starters", "items": [
                        {"name": "Soup", "price": 4.5},
                        {"name": "Bread", "description": "Sourdough", "price": 3}
                    ]},
                    {"id": "mains", "name": "Mains", "description": "Served all day"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_optional_fields() {
        let doc = sample();
        assert_eq!(doc.categories.len(), 2);
        assert!(doc.categories[0].description.is_none());
        assert_eq!(doc.categories[0].items[1].description.as_deref(), Some("Sourdough"));
        assert_eq!(doc.categories[1].description.as_deref(), Some("Served all day"));
        assert!(doc.categories[1].items.is_empty());
    }

    #[test]
    fn test_missing_categories_is_empty() {
        let doc: MenuDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_display_price_two_decimals() {
        let doc = sample();
        assert_eq!(doc.categories[0].items[0].display_price(), "4.50");
        assert_eq!(doc.categories[0].items[1].display_price(), "3.00");
    }

    #[test]
    fn test_validate_rejects_duplicates_and_reserved() {
        let mut doc = sample();
        assert!(doc.validate().is_ok());

        doc.categories[1].id = "starters".into();
        assert_eq!(
            doc.validate(),
            Err(MenuProblem::DuplicateId("starters".into()))
        );

        doc.categories[1].id = ALL_CATEGORIES.into();
        assert_eq!(doc.validate(), Err(MenuProblem::ReservedId));

        doc.categories[1].id = String::new();
        assert_eq!(doc.validate(), Err(MenuProblem::EmptyId));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&sample()).unwrap()).unwrap();
        let doc = MenuDocument::load(file.path()).unwrap();
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = MenuDocument::load(file.path()).unwrap_err();
        assert!(matches!(err, MenuFileError::Parse { .. }));
    }
}
