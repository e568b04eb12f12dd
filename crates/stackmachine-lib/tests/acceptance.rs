use stackmachine_lib::{evaluate, ErrorKind};

/// Expected outcome of one acceptance command.
enum Expect {
    Value(u16),
    Error(ErrorKind),
}

use Expect::{Error, Value};

fn cases() -> Vec<(&'static str, &'static str, Expect)> {
    vec![
        ("empty error", "", Error(ErrorKind::EmptyStack)),
        ("add overflow", "50000 DUP +", Error(ErrorKind::Overflow)),
        ("too few add", "99 +", Error(ErrorKind::StackUnderflow)),
        ("too few minus", "99 -", Error(ErrorKind::StackUnderflow)),
        ("too few multiply", "99 *", Error(ErrorKind::StackUnderflow)),
        ("empty stack", "99 CLEAR", Error(ErrorKind::EmptyStack)),
        ("sum single value", "99 SUM", Value(99)),
        ("sum empty", "SUM", Error(ErrorKind::EmptyStack)),
        ("normal +*", "5 6 + 2 *", Value(22)),
        (
            "clear too few",
            "1 2 3 4 + CLEAR 12 +",
            Error(ErrorKind::StackUnderflow),
        ),
        ("normal after clear", "1 CLEAR 2 3 +", Value(5)),
        ("single integer", "9876", Value(9876)),
        ("invalid command", "DOGBANANA", Error(ErrorKind::InvalidCommand)),
        ("normal +-*", "5 9 DUP + + 43 - 3 *", Value(60)),
        ("minus", "2 5 -", Value(3)),
        ("underflow minus", "5 2 -", Error(ErrorKind::NegativeResult)),
        ("at overflow limit", "25000 DUP +", Value(50000)),
        ("at overflow limit single value", "50000 0 +", Value(50000)),
        ("overflow plus", "50000 1 +", Error(ErrorKind::Overflow)),
        ("overflow single value", "50001", Error(ErrorKind::Overflow)),
        ("times zero at overflow limit", "50000 0 *", Value(0)),
        (
            "too few at first",
            "1 2 3 4 5 + + + + * 999",
            Error(ErrorKind::StackUnderflow),
        ),
        ("normal simple", "1 2 - 99 +", Value(100)),
        ("at overflow minus to zero", "50000 50000 -", Value(0)),
        ("clear empties stack", "CLEAR", Error(ErrorKind::EmptyStack)),
        ("normal sum", "3 4 3 5 5 1 1 1 SUM", Value(23)),
        ("sum after clear stack", "3 4 3 5 CLEAR 5 1 1 1 SUM", Value(8)),
        (
            "sum then too few",
            "3 4 3 5 5 1 1 1 SUM -",
            Error(ErrorKind::StackUnderflow),
        ),
        ("product chain", "1 2 3 4 5 * * * *", Value(120)),
    ]
}

#[test]
fn acceptance_table() {
    for (name, command, expected) in cases() {
        let outcome = evaluate(command);
        match expected {
            Value(want) => match outcome {
                Ok(value) => assert_eq!(value.get(), want, "{} ({})", name, command),
                Err(err) => panic!("{} ({}) failed unexpectedly: {}", name, command, err),
            },
            Error(kind) => match outcome {
                Ok(value) => panic!("{} ({}) expected {}, got {}", name, command, kind, value),
                Err(err) => assert_eq!(err.kind(), kind, "{} ({}): {}", name, command, err),
            },
        }
    }
}

#[test]
fn error_messages_are_descriptive() {
    let err = evaluate("1 2 DOGBANANA").unwrap_err();
    assert_eq!(err.to_string(), "invalid command 'DOGBANANA' at token 3");

    let err = evaluate("5 2 -").unwrap_err();
    assert_eq!(err.to_string(), "negative result: 2 - 5 is below 0");

    let err = evaluate("50000 1 +").unwrap_err();
    assert!(err.to_string().starts_with("overflow:"));

    let err = evaluate("").unwrap_err();
    assert!(!err.to_string().is_empty());
}
