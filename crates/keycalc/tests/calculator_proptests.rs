//! Property-based tests for the input accumulator and result formatting

use keycalc::core::format::js_number_string;
use keycalc::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn event_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        4 => (0u8..=9u8).prop_map(InputEvent::Digit),
        1 => Just(InputEvent::DecimalPoint),
        2 => proptest::sample::select(Operator::ALL.to_vec()).prop_map(InputEvent::Operator),
        1 => proptest::sample::select(Function::ALL.to_vec()).prop_map(InputEvent::Function),
        1 => prop_oneof![Just(Constant::Pi), Just(Constant::E)].prop_map(InputEvent::Constant),
        2 => Just(InputEvent::OpenOrCloseParen),
        1 => Just(InputEvent::OpenParen),
        1 => Just(InputEvent::CloseParen),
        1 => Just(InputEvent::Power),
        1 => Just(InputEvent::PowerOfTwo),
        1 => Just(InputEvent::Exponential),
        1 => Just(InputEvent::Backspace),
        1 => Just(InputEvent::Equals),
        1 => Just(InputEvent::ToggleAngleUnit),
    ]
}

fn events_strategy() -> impl Strategy<Value = Vec<InputEvent>> {
    prop::collection::vec(event_strategy(), 0..40)
}

fn config_strategy() -> impl Strategy<Value = CalculatorConfig> {
    prop_oneof![Just(CalculatorConfig::new()), Just(CalculatorConfig::basic())]
}

/// Opens minus closes over every prefix never drops below zero
fn prefix_balance_ok(tokens: &[Token]) -> bool {
    let mut depth: i64 = 0;
    for token in tokens {
        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    true
}

// ===== Accumulator properties =====

proptest! {
    /// The entry buffer holds exactly the digits typed
    #[test]
    fn prop_buffer_is_literal(digits in prop::collection::vec(0u8..=9u8, 1..=8)) {
        let mut calc = Calculator::new();
        for d in &digits {
            calc.apply(InputEvent::Digit(*d));
        }
        let expected: String = digits.iter().map(u8::to_string).collect();
        prop_assert_eq!(calc.buffer(), expected.as_str());
    }

    /// A leading decimal point is written as `0.`
    #[test]
    fn prop_leading_point_gets_zero(digits in prop::collection::vec(0u8..=9u8, 0..=6)) {
        let mut calc = Calculator::new();
        calc.apply(InputEvent::DecimalPoint);
        for d in &digits {
            calc.apply(InputEvent::Digit(*d));
        }
        let expected = format!("0.{}", digits.iter().map(u8::to_string).collect::<String>());
        prop_assert_eq!(calc.buffer(), expected.as_str());
    }

    /// Digits past the limit are rejected and leave the buffer alone
    #[test]
    fn prop_digit_limit_holds(config in config_strategy(), extra in 1usize..5) {
        let limit = config.digit_limit();
        let mut calc = Calculator::with_config(config);
        for _ in 0..limit {
            prop_assert_eq!(calc.apply(InputEvent::Digit(7)), Outcome::Updated);
        }
        for _ in 0..extra {
            let rejected = matches!(calc.apply(InputEvent::Digit(7)), Outcome::Rejected(_));
            prop_assert!(rejected);
        }
        prop_assert_eq!(calc.buffer().len(), limit);
    }

    /// Clear always returns to the initial state, and twice is the same as once
    #[test]
    fn prop_clear_is_idempotent(config in config_strategy(), events in events_strategy()) {
        let mut calc = Calculator::with_config(config);
        calc.apply_all(events);
        let unit = calc.angle_unit();

        calc.apply(InputEvent::Clear);
        let once = calc.render();
        calc.apply(InputEvent::Clear);
        let twice = calc.render();

        prop_assert!(calc.is_empty());
        prop_assert_eq!(once.text(), "0");
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(calc.angle_unit(), unit);
    }

    /// Close parens never outnumber open parens
    #[test]
    fn prop_paren_balance_never_negative(config in config_strategy(), events in events_strategy()) {
        let mut calc = Calculator::with_config(config);
        for event in events {
            calc.apply(event);
            prop_assert!(prefix_balance_ok(calc.tokens()));
        }
    }

    /// Any event sequence leaves a displayable state and equals never panics
    #[test]
    fn prop_any_sequence_displays(config in config_strategy(), events in events_strategy()) {
        let mut calc = Calculator::with_config(config);
        calc.apply_all(events);
        let before = calc.display();
        prop_assert!(!before.is_empty());

        match calc.apply(InputEvent::Equals) {
            Outcome::Evaluated(display) => {
                prop_assert!(calc.is_result());
                prop_assert_eq!(calc.display(), display);
            }
            Outcome::Ignored => prop_assert_eq!(calc.display(), before),
            other => prop_assert!(false, "unexpected outcome {:?}", other),
        }
    }

    /// A plain-notation result is never wider than the display
    #[test]
    fn prop_result_fits_display(events in events_strategy()) {
        let mut calc = Calculator::new();
        calc.apply_all(events);
        if let Outcome::Evaluated(display) = calc.apply(InputEvent::Equals) {
            if !display.contains('e') {
                prop_assert!(display.chars().count() <= 12, "too wide: {}", display);
            }
            prop_assert!(!display.ends_with('.'));
        }
    }

    /// Rejected or ignored events leave the state untouched
    #[test]
    fn prop_unchanged_when_not_updated(events in events_strategy(), last in event_strategy()) {
        let mut calc = Calculator::new();
        calc.apply_all(events);
        let before = calc.render();
        let outcome = calc.apply(last);
        if !outcome.changed() {
            prop_assert_eq!(calc.render(), before);
        }
    }
}

// ===== Formatting properties =====

proptest! {
    /// Results shown in full parse back to within the rounding precision
    #[test]
    fn prop_format_round_trip(value in -1.0e6f64..1.0e6f64) {
        let format = NumberFormat::default();
        let rounded = format.round(value);
        if js_number_string(rounded).chars().count() <= format.width {
            let text = format.format(value).unwrap();
            let parsed: f64 = text.parse().unwrap();
            prop_assert!(
                (parsed - value).abs() <= 1e-9 + value.abs() * 1e-12,
                "{} -> {}", value, text
            );
        }
    }

    /// Integers that fit the display are shown unchanged
    #[test]
    fn prop_format_small_integers(n in -99_999_999_999i64..=999_999_999_999i64) {
        let format = NumberFormat::default();
        prop_assert_eq!(format.format(n as f64).unwrap(), n.to_string());
    }

    /// Large magnitudes switch to exponential notation
    #[test]
    fn prop_format_large_values_use_exponent(mantissa in 1.0f64..9.9f64, exp in 13i32..100i32) {
        let format = NumberFormat::default();
        let text = format.format(mantissa * 10f64.powi(exp)).unwrap();
        prop_assert!(text.contains("e+"), "{}", text);
    }
}
