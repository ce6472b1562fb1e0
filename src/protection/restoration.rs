/*!
 * Restoration of protected code blocks.
 *
 * Translated text is expected to carry every placeholder verbatim. Each one
 * is replaced literally with the block it stands for. A placeholder the model
 * dropped or mangled simply leaves its block out of the result.
 */

use log::warn;

use super::substitution::PlaceholderMap;

/// Restored text plus the placeholders that could not be found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restoration {
    pub text: String,
    /// Placeholders absent from the translated text, in discovery order
    pub missing: Vec<String>,
}

impl Restoration {
    /// Whether every protected block made it back into the text
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Put every protected block back into `translated`
pub fn restore_code_blocks(translated: &str, placeholder_map: &PlaceholderMap) -> String {
    if placeholder_map.is_empty() {
        return translated.to_string();
    }

    let mut restored = translated.to_string();
    for (placeholder, code) in placeholder_map.iter() {
        restored = restored.replace(placeholder, code);
    }
    restored
}

/// Same as [`restore_code_blocks`], also reporting which placeholders were lost
pub fn restore_with_report(translated: &str, placeholder_map: &PlaceholderMap) -> Restoration {
    let missing: Vec<String> = placeholder_map
        .placeholders()
        .filter(|placeholder| !translated.contains(placeholder))
        .map(str::to_string)
        .collect();

    if !missing.is_empty() {
        warn!(
            "{} of {} code block(s) were not preserved by the translation: {}",
            missing.len(),
            placeholder_map.len(),
            missing.join(", ")
        );
    }

    Restoration {
        text: restore_code_blocks(translated, placeholder_map),
        missing,
    }
}
