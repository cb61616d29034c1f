//! Property-based tests for the conversion engine and selection policy.

use proptest::prelude::*;

use super::format::format_value;
use super::registry::{unit_names, Category, CategoryTable};
use super::selection::ConverterState;
use super::{convert, convert_value};

fn linear_categories() -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| matches!(c.table(), CategoryTable::Linear(_)))
        .collect()
}

fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Action {
    SwitchCategory(Category),
    SetFrom(usize),
    SetTo(usize),
    Swap,
    Input(String),
}

fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        any_category().prop_map(Action::SwitchCategory),
        (0usize..16).prop_map(Action::SetFrom),
        (0usize..16).prop_map(Action::SetTo),
        Just(Action::Swap),
        "[0-9.a-z-]{0,6}".prop_map(Action::Input),
    ]
}

proptest! {
    #[test]
    fn test_linear_round_trip(value in -1e6f64..1e6, a in 0usize..16, b in 0usize..16) {
        for category in linear_categories() {
            let units = unit_names(category);
            let from = units[a % units.len()];
            let to = units[b % units.len()];

            let there = convert_value(category, from, to, value).unwrap();
            let back = convert_value(category, to, from, there).unwrap();
            let tolerance = 1e-9 * value.abs().max(1e-12);
            prop_assert!((back - value).abs() <= tolerance, "{} {} -> {} -> {}", value, from, to, back);
        }
    }

    #[test]
    fn test_identity_for_every_category(value in -1e9f64..1e9, idx in 0usize..16) {
        for category in Category::ALL {
            let units = unit_names(category);
            let unit = units[idx % units.len()];
            let raw = value.to_string();
            let expected = format!("{} {}", format_value(value), unit);
            prop_assert_eq!(convert(category, unit, unit, &raw).unwrap(), expected);
        }
    }

    #[test]
    fn test_temperature_round_trip(value in -500f64..5000.0, a in 0usize..3, b in 0usize..3) {
        let units = unit_names(Category::Temperature);
        let there = convert_value(Category::Temperature, units[a], units[b], value).unwrap();
        let back = convert_value(Category::Temperature, units[b], units[a], there).unwrap();
        prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
    }

    #[test]
    fn test_selection_units_never_equal(actions in prop::collection::vec(any_action(), 0..40)) {
        let mut state = ConverterState::new();
        for action in actions {
            match action {
                Action::SwitchCategory(category) => state.set_category(category),
                Action::SetFrom(idx) => {
                    let units = unit_names(state.category());
                    state.set_from_unit(units[idx % units.len()]).unwrap();
                }
                Action::SetTo(idx) => {
                    let units = unit_names(state.category());
                    state.set_to_unit(units[idx % units.len()]).unwrap();
                }
                Action::Swap => state.swap_units(),
                Action::Input(text) => state.set_input(text),
            }
            prop_assert_ne!(state.from_unit(), state.to_unit());
        }
    }
}
