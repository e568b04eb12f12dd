use tracing::debug;

use crate::error::Result;
use crate::machine::Machine;
use crate::token::tokenize;
use crate::value::Value;

/// Evaluate an RPN command on a fresh stack.
///
/// Tokens run left to right and the first failure aborts the evaluation. On
/// success the value on top of the stack is returned; any values beneath it
/// are discarded.
///
/// # Examples
///
/// ```
/// use stackmachine_lib::{evaluate, ErrorKind};
///
/// assert_eq!(evaluate("5 6 + 2 *").unwrap().get(), 22);
/// assert_eq!(evaluate("2 5 -").unwrap().get(), 3);
/// assert_eq!(evaluate("5 2 -").unwrap_err().kind(), ErrorKind::NegativeResult);
/// ```
pub fn evaluate(command: &str) -> Result<Value> {
    let mut machine = Machine::new();

    for token in tokenize(command) {
        if let Err(err) = token.and_then(|token| machine.execute(token)) {
            debug!(error = %err, kind = %err.kind(), "evaluation failed");
            return Err(err);
        }
    }

    if machine.depth() > 1 {
        debug!(
            discarded = machine.depth() - 1,
            "evaluation finished with extra values beneath the result"
        );
    }

    machine.finish().inspect_err(|err| {
        debug!(error = %err, kind = %err.kind(), "evaluation failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    #[test]
    fn empty_command_is_empty_stack() {
        assert_eq!(evaluate(""), Err(Error::EmptyStack { operator: None }));
        assert_eq!(evaluate("   "), Err(Error::EmptyStack { operator: None }));
    }

    #[test]
    fn first_failure_wins() {
        // The invalid token at position 3 is never reached.
        let err = evaluate("1 + bogus").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StackUnderflow);

        let err = evaluate("bogus 1 +").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCommand);
    }

    #[test]
    fn extra_values_are_discarded() {
        assert_eq!(evaluate("1 2 3").unwrap().get(), 3);
    }

    #[test]
    fn clear_then_nothing_is_empty_stack() {
        assert_eq!(
            evaluate("99 CLEAR"),
            Err(Error::EmptyStack { operator: None })
        );
    }
}
