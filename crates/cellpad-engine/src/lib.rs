//! cellpad_engine - Sheet engine contract + in-memory reference engine.

pub mod client;
pub mod engine;
pub mod error;
pub mod memory;

pub use client::{SheetDisplay, SheetEngine};
pub use error::{EngineError, Result};
pub use memory::{MemoryEngine, SessionConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CellRef;

    fn engine() -> MemoryEngine {
        MemoryEngine::new(SessionConfig {
            columns: 4,
            rows: 4,
            ..SessionConfig::default()
        })
    }

    #[test]
    fn test_starts_viewing_a1() {
        let engine = engine();
        assert_eq!(engine.working_cell_label().unwrap(), "A1");
        assert!(!engine.edit_status().unwrap());
        assert_eq!(engine.edit_status_string().unwrap(), "current cell: A1");
        assert_eq!(engine.formula_string().unwrap(), "");
        assert_eq!(engine.result_string().unwrap(), "");
    }

    #[test]
    fn test_tokens_build_formula_and_result() {
        let mut engine = engine();
        for token in ["1", "2", "+", "3"] {
            engine.add_token(token).unwrap();
        }
        assert_eq!(engine.formula_string().unwrap(), "12 + 3");
        assert_eq!(engine.result_string().unwrap(), "15");
        assert_eq!(engine.tokens(), ["1", "2", "+", "3"]);
    }

    #[test]
    fn test_remove_token_on_empty_is_noop() {
        let mut engine = engine();
        engine.remove_token().unwrap();
        engine.add_token("5").unwrap();
        engine.remove_token().unwrap();
        engine.remove_token().unwrap();
        assert!(engine.tokens().is_empty());
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let mut engine = engine();
        engine.add_token("").unwrap();
        assert!(engine.tokens().is_empty());
    }

    #[test]
    fn test_add_cell_canonicalizes_label() {
        let mut engine = engine();
        engine.add_cell("b2").unwrap();
        assert_eq!(engine.tokens(), ["B2"]);
    }

    #[test]
    fn test_add_cell_rejects_self_reference() {
        let mut engine = engine();
        assert_eq!(
            engine.add_cell("A1"),
            Err(EngineError::SelfReference("A1".to_string()))
        );
        assert!(engine.tokens().is_empty());
    }

    #[test]
    fn test_labels_outside_sheet_are_rejected() {
        let mut engine = engine();
        assert!(matches!(
            engine.set_working_cell_by_label("E1"),
            Err(EngineError::OutOfBounds { .. })
        ));
        assert_eq!(
            engine.set_working_cell_by_label(""),
            Err(EngineError::InvalidCellLabel(String::new()))
        );
        assert_eq!(engine.working_cell_label().unwrap(), "A1");
    }

    #[test]
    fn test_formulas_are_per_cell() {
        let mut engine = engine();
        engine.add_token("7").unwrap();
        engine.set_working_cell_by_label("B1").unwrap();
        assert_eq!(engine.formula_string().unwrap(), "");
        engine.add_cell("A1").unwrap();
        engine.add_token("*").unwrap();
        engine.add_token("2").unwrap();
        assert_eq!(engine.result_string().unwrap(), "14");

        let display = engine.sheet_display().unwrap();
        assert_eq!(display.get_label("A1"), Some("7"));
        assert_eq!(display.get_label("B1"), Some("14"));
        assert_eq!(display.get_label("D4"), Some(""));
    }

    #[test]
    fn test_clear_formula_only_touches_working_cell() {
        let mut engine = engine();
        engine.add_token("3").unwrap();
        engine.set_working_cell_by_label("C3").unwrap();
        engine.add_token("4").unwrap();
        engine.clear_formula().unwrap();
        assert_eq!(engine.formula_string().unwrap(), "");
        assert_eq!(engine.tokens_at(CellRef::new(0, 0)), ["3"]);
    }

    #[test]
    fn test_status_string_follows_edit_status() {
        let mut engine = engine();
        engine.set_working_cell_by_label("B3").unwrap();
        engine.set_edit_status(true).unwrap();
        assert_eq!(engine.edit_status_string().unwrap(), "editing: B3");
    }

    #[test]
    fn test_cycle_shows_in_display() {
        let mut engine = engine();
        engine.add_cell("B1").unwrap();
        engine.set_working_cell_by_label("B1").unwrap();
        engine.add_cell("A1").unwrap();
        assert_eq!(engine.result_string().unwrap(), "#CYCLE!");
        let display = engine.sheet_display().unwrap();
        assert_eq!(display.get_label("A1"), Some("#CYCLE!"));
    }

    #[test]
    fn test_negative_zero_displays_as_zero() {
        let mut engine = engine();
        for token in ["0", "*", "-", "1"] {
            engine.add_token(token).unwrap();
        }
        assert_eq!(engine.result_string().unwrap(), "0");
    }

    #[test]
    fn test_huge_number_is_overflow_not_division() {
        let mut engine = engine();
        engine.add_token(&"9".repeat(400)).unwrap();
        assert_eq!(engine.result_string().unwrap(), "#INF!");
        engine.add_token("/").unwrap();
        engine.add_token("0").unwrap();
        assert_eq!(engine.result_string().unwrap(), "#DIV/0!");
    }

    #[test]
    fn test_reference_chain_across_whole_sheet() {
        let mut engine = MemoryEngine::new(SessionConfig {
            columns: 26,
            rows: 99,
            ..SessionConfig::default()
        });
        let display = SheetDisplay::new(26, 99);
        let cells: Vec<CellRef> = display.iter().map(|(cell, _)| cell).collect();
        for pair in cells.windows(2) {
            engine.set_working_cell_by_label(&pair[0].to_string()).unwrap();
            engine.add_cell(&pair[1].to_string()).unwrap();
        }
        engine.set_working_cell_by_label("Z99").unwrap();
        engine.add_token("1").unwrap();

        engine.set_working_cell_by_label("A1").unwrap();
        assert_eq!(engine.result_string().unwrap(), "1");
        let display = engine.sheet_display().unwrap();
        assert_eq!(display.get_label("A1"), Some("1"));
        assert_eq!(display.get_label("M50"), Some("1"));
    }

    #[test]
    fn test_closed_engine_rejects_calls() {
        let mut engine = engine();
        engine.close().unwrap();
        assert_eq!(engine.formula_string(), Err(EngineError::Closed));
        assert_eq!(engine.add_token("1"), Err(EngineError::Closed));
        assert_eq!(engine.close(), Err(EngineError::Closed));
    }
}
