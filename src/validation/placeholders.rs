/*!
 * Placeholder validation for translated articles.
 *
 * Checks that the `__CODE_BLOCK_<n>__` tokens inserted before translation
 * came back from the model intact, so lost code blocks can be reported
 * instead of vanishing unnoticed.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::protection::PlaceholderMap;

/// Regex for matching placeholder tokens
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"__CODE_BLOCK_(\d+)__").expect("Invalid placeholder regex")
});

/// Placeholder validation result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderValidationResult {
    /// Placeholder indices expected from the map
    pub expected_indices: Vec<usize>,
    /// Placeholder indices found in the text, in the order they appear
    pub found_indices: Vec<usize>,
    /// Expected indices not present in the text
    pub missing_indices: Vec<usize>,
    /// Expected indices present more than once
    pub duplicated_indices: Vec<usize>,
    /// Indices present in the text but unknown to the map
    pub unexpected_indices: Vec<usize>,
    /// Whether the placeholders appear out of document order
    pub out_of_order: bool,
}

impl PlaceholderValidationResult {
    /// Every code block will be restored exactly once
    pub fn passed(&self) -> bool {
        self.missing_indices.is_empty() && self.duplicated_indices.is_empty()
    }

    /// Placeholder tokens for the missing indices
    pub fn missing_placeholders(&self) -> Vec<String> {
        self.missing_indices
            .iter()
            .map(|&index| crate::protection::placeholder_for(index))
            .collect()
    }

    /// One-line description of what went wrong, if anything
    pub fn error_message(&self) -> Option<String> {
        if !self.missing_indices.is_empty() {
            Some(format!("Missing placeholders: {:?}", self.missing_indices))
        } else if !self.duplicated_indices.is_empty() {
            Some(format!("Duplicated placeholders: {:?}", self.duplicated_indices))
        } else {
            None
        }
    }
}

/// Placeholder validator for translated text
pub struct PlaceholderValidator;

impl PlaceholderValidator {
    /// Validate the placeholders in `translated` against the map they came from
    pub fn validate(translated: &str, placeholder_map: &PlaceholderMap) -> PlaceholderValidationResult {
        let expected_indices: Vec<usize> = placeholder_map
            .placeholders()
            .filter_map(Self::index_of)
            .collect();

        if expected_indices.is_empty() {
            return PlaceholderValidationResult::default();
        }

        let found_indices: Vec<usize> = PLACEHOLDER_REGEX
            .captures_iter(translated)
            .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().parse().ok()))
            .collect();

        let missing_indices: Vec<usize> = expected_indices
            .iter()
            .filter(|i| !found_indices.contains(i))
            .copied()
            .collect();

        let duplicated_indices: Vec<usize> = expected_indices
            .iter()
            .filter(|i| found_indices.iter().filter(|f| f == i).count() > 1)
            .copied()
            .collect();

        let mut unexpected_indices: Vec<usize> = found_indices
            .iter()
            .filter(|f| !expected_indices.contains(f))
            .copied()
            .collect();
        unexpected_indices.dedup();

        let mut sorted_found = found_indices.clone();
        sorted_found.sort();
        let out_of_order = found_indices != sorted_found;

        debug!(
            "Placeholder validation: expected={}, found={}, missing={}, duplicated={}",
            expected_indices.len(),
            found_indices.len(),
            missing_indices.len(),
            duplicated_indices.len()
        );

        PlaceholderValidationResult {
            expected_indices,
            found_indices,
            missing_indices,
            duplicated_indices,
            unexpected_indices,
            out_of_order,
        }
    }

    /// Index encoded in a placeholder token
    pub fn index_of(placeholder: &str) -> Option<usize> {
        PLACEHOLDER_REGEX
            .captures(placeholder)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}
