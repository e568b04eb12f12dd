//! Step-wise stack machine.

use tracing::trace;

use crate::error::{Error, Result};
use crate::token::{Operator, Token};
use crate::value::Value;

/// A value stack plus the rules for changing it.
///
/// Each machine starts empty. Operators only consume their operands when they
/// succeed, so after a failed [`Machine::execute`] the stack is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    stack: Vec<Value>,
}

impl Machine {
    /// Create a machine with an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stack contents, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Number of values currently held.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The most recently pushed value.
    pub fn top(&self) -> Option<Value> {
        self.stack.last().copied()
    }

    /// Apply a single token.
    pub fn execute(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Literal(value) => self.stack.push(value),
            Token::Operator(op) => self.apply(op)?,
        }
        trace!(token = %token, depth = self.stack.len(), "executed token");
        Ok(())
    }

    /// Consume the machine and read the answer off the top of the stack.
    ///
    /// Values beneath the top are discarded.
    pub fn finish(self) -> Result<Value> {
        self.top().ok_or(Error::EmptyStack { operator: None })
    }

    fn apply(&mut self, op: Operator) -> Result<()> {
        match op {
            Operator::Add => self.binary(op, Value::checked_add),
            Operator::Subtract => self.binary(op, Value::checked_sub),
            Operator::Multiply => self.binary(op, Value::checked_mul),
            Operator::Dup => {
                let top = self.top().ok_or_else(|| self.underflow(op))?;
                self.stack.push(top);
                Ok(())
            }
            Operator::Sum => {
                if self.stack.is_empty() {
                    return Err(Error::EmptyStack { operator: Some(op) });
                }
                let total = Value::checked_sum(self.stack.iter().copied())?;
                self.stack.clear();
                self.stack.push(total);
                Ok(())
            }
            Operator::Clear => {
                self.stack.clear();
                Ok(())
            }
        }
    }

    /// Run `f(top, second)` and replace both operands with its result.
    fn binary<F>(&mut self, op: Operator, f: F) -> Result<()>
    where
        F: FnOnce(Value, Value) -> Result<Value>,
    {
        let (second, top) = match self.stack.as_slice() {
            [.., second, top] => (*second, *top),
            _ => return Err(self.underflow(op)),
        };
        let result = f(top, second)?;
        self.stack.truncate(self.stack.len() - 2);
        self.stack.push(result);
        Ok(())
    }

    fn underflow(&self, op: Operator) -> Error {
        Error::StackUnderflow {
            operator: op,
            required: op.arity(),
            available: self.stack.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(n: u64) -> Token {
        Token::Literal(Value::new(n).unwrap())
    }

    fn op(op: Operator) -> Token {
        Token::Operator(op)
    }

    fn machine_with(values: &[u64]) -> Machine {
        let mut machine = Machine::new();
        for &n in values {
            machine.execute(lit(n)).unwrap();
        }
        machine
    }

    fn numbers(machine: &Machine) -> Vec<u16> {
        machine.stack().iter().map(|v| v.get()).collect()
    }

    #[test]
    fn starts_empty() {
        let machine = Machine::new();
        assert_eq!(machine.depth(), 0);
        assert_eq!(machine.top(), None);
        assert_eq!(
            machine.finish(),
            Err(Error::EmptyStack { operator: None })
        );
    }

    #[test]
    fn subtract_is_top_minus_second() {
        let mut machine = machine_with(&[2, 5]);
        machine.execute(op(Operator::Subtract)).unwrap();
        assert_eq!(numbers(&machine), vec![3]);

        let mut machine = machine_with(&[5, 2]);
        let err = machine.execute(op(Operator::Subtract)).unwrap_err();
        assert_eq!(
            err,
            Error::NegativeResult {
                minuend: 2,
                subtrahend: 5
            }
        );
    }

    #[test]
    fn failed_operator_leaves_stack_untouched() {
        let mut machine = machine_with(&[7, 50_000, 1]);
        assert!(machine.execute(op(Operator::Add)).is_err());
        assert_eq!(numbers(&machine), vec![7, 50_000, 1]);

        let mut machine = machine_with(&[50_000, 1]);
        assert!(machine.execute(op(Operator::Sum)).is_err());
        assert_eq!(numbers(&machine), vec![50_000, 1]);
    }

    #[test]
    fn binary_operators_need_two_values() {
        for operator in [Operator::Add, Operator::Subtract, Operator::Multiply] {
            let mut machine = machine_with(&[99]);
            let err = machine.execute(op(operator)).unwrap_err();
            assert_eq!(
                err,
                Error::StackUnderflow {
                    operator,
                    required: 2,
                    available: 1
                }
            );
        }
    }

    #[test]
    fn dup_copies_top() {
        let mut machine = machine_with(&[1, 9]);
        machine.execute(op(Operator::Dup)).unwrap();
        assert_eq!(numbers(&machine), vec![1, 9, 9]);

        let mut empty = Machine::new();
        let err = empty.execute(op(Operator::Dup)).unwrap_err();
        assert!(matches!(err, Error::StackUnderflow { available: 0, .. }));
    }

    #[test]
    fn sum_collapses_stack() {
        let mut machine = machine_with(&[3, 4, 3, 5]);
        machine.execute(op(Operator::Sum)).unwrap();
        assert_eq!(numbers(&machine), vec![15]);

        let mut empty = Machine::new();
        assert_eq!(
            empty.execute(op(Operator::Sum)),
            Err(Error::EmptyStack {
                operator: Some(Operator::Sum)
            })
        );
    }

    #[test]
    fn clear_is_idempotent() {
        let mut once = machine_with(&[1, 2, 3]);
        once.execute(op(Operator::Clear)).unwrap();

        let mut twice = machine_with(&[1, 2, 3]);
        twice.execute(op(Operator::Clear)).unwrap();
        twice.execute(op(Operator::Clear)).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.depth(), 0);

        let mut empty = Machine::new();
        assert!(empty.execute(op(Operator::Clear)).is_ok());
    }

    #[test]
    fn finish_returns_top_value() {
        let machine = machine_with(&[1, 2, 3]);
        assert_eq!(machine.finish().unwrap().get(), 3);
    }
}
