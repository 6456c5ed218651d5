use crate::constants::limits::SUGGESTION_LIMIT;
use crate::errors::ModuleError;
use crate::utils::suggest::suggest;

pub fn unknown_module_error(module: &str, known_modules: &[&str]) -> ModuleError {
    let suggestions = suggest(module, known_modules, SUGGESTION_LIMIT);
    let mut hint = format!("Use one of: {}.", known_modules.join(", "));
    if !suggestions.is_empty() {
        hint = format!("Did you mean: {}? {}", suggestions.join(", "), hint);
    }
    ModuleError::invalid_params(format!("Unknown module: {}", module)).with_hint(hint)
}

#[cfg(test)]
mod tests {
    use super::unknown_module_error;

    #[test]
    fn hint_names_the_closest_module() {
        let err = unknown_module_error("operator", &["clusters", "operators"]);
        assert_eq!(err.message, "Unknown module: operator");
        let hint = err.hint.expect("hint");
        assert!(hint.starts_with("Did you mean: operators?"));
    }
}
