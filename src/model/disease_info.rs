// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::loader::load_json_artifact;
use crate::domain::DiseaseInfo;
use crate::error::AppError;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Lower-cases a disease name and joins its words with underscores, so
/// `"Common Cold"` and `"common_cold"` share a key.
pub fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Static descriptive text keyed by normalized disease name.
#[derive(Debug, Clone, Default)]
pub struct DiseaseInfoTable {
    entries: HashMap<String, DiseaseInfo>,
}

impl DiseaseInfoTable {
    pub fn from_entries<I, K>(entries: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, DiseaseInfo)>,
        K: AsRef<str>,
    {
        let mut table = HashMap::new();
        for (name, record) in entries {
            let key = normalize_key(name.as_ref());
            if key.is_empty() {
                return Err(AppError::ModelLoadError(
                    "Disease info table contains a blank key".to_string(),
                ));
            }
            if table.insert(key.clone(), record).is_some() {
                return Err(AppError::ModelLoadError(format!(
                    "Disease info table has two entries for {}",
                    key
                )));
            }
        }
        Ok(Self { entries: table })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw: HashMap<String, DiseaseInfo> = load_json_artifact(path, "Disease info table")?;
        let table = Self::from_entries(raw)?;
        info!(
            "Loaded disease info table from {} ({} entries)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    pub fn get(&self, disease: &str) -> Option<&DiseaseInfo> {
        self.entries.get(&normalize_key(disease))
    }

    /// Record for `disease`, or empty fields when the table has none.
    pub fn lookup(&self, disease: &str) -> DiseaseInfo {
        self.get(disease).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cold() -> DiseaseInfo {
        DiseaseInfo {
            overview: "A viral infection of the upper airways.".to_string(),
            causes: vec!["Rhinoviruses".to_string()],
            symptoms: vec!["Runny nose".to_string(), "Sneezing".to_string()],
            next_steps: vec!["Rest and fluids".to_string()],
        }
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Common Cold"), "common_cold");
        assert_eq!(normalize_key("  Common   Cold "), "common_cold");
        assert_eq!(normalize_key("common_cold"), "common_cold");
        assert_eq!(normalize_key("MALARIA"), "malaria");
    }

    #[test]
    fn test_lookup_normalizes_label() {
        let table = DiseaseInfoTable::from_entries([("common_cold", cold())]).unwrap();
        assert_eq!(table.lookup("Common Cold"), cold());
        assert!(table.get("common cold").is_some());
    }

    #[test]
    fn test_lookup_missing_yields_empty_record() {
        let table = DiseaseInfoTable::from_entries([("common_cold", cold())]).unwrap();
        let info = table.lookup("Dengue");
        assert_eq!(info.overview, "");
        assert!(info.causes.is_empty());
        assert!(info.symptoms.is_empty());
        assert!(info.next_steps.is_empty());
    }

    #[test]
    fn test_colliding_keys_rejected() {
        let result =
            DiseaseInfoTable::from_entries([("Common Cold", cold()), ("common_cold", cold())]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_with_partial_records() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "Malaria": {{"overview": "Mosquito-borne disease."}},
                "typhoid": {{"causes": ["Salmonella Typhi"]}}
            }}"#
        )
        .unwrap();

        let table = DiseaseInfoTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let malaria = table.lookup("malaria");
        assert_eq!(malaria.overview, "Mosquito-borne disease.");
        assert!(malaria.causes.is_empty());

        let typhoid = table.lookup("Typhoid");
        assert_eq!(typhoid.overview, "");
        assert_eq!(typhoid.causes, vec!["Salmonella Typhi"]);
    }
}
