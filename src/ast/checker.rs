use crate::ast::{CheckError, Expr, Operator, UnaryOperator};
use crate::functions;
use std::collections::HashSet;

impl Expr {
    /// Reports the first error in this tree and adds its free variables to `vars`.
    ///
    /// Children are checked in order, left to right; variables seen before a
    /// failure stay in `vars`.
    pub fn check(&self, vars: &mut HashSet<String>) -> Result<(), CheckError> {
        match self {
            Expr::Literal(_) => Ok(()),
            Expr::Variable(name) => {
                vars.insert(name.clone());
                Ok(())
            }
            Expr::Unary { operator, operand } => {
                UnaryOperator::try_from(*operator)?;
                operand.check(vars)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                Operator::try_from(*operator)?;
                left.check(vars)?;
                right.check(vars)
            }
            Expr::Call { name, args } => {
                let function = functions::lookup(name)
                    .ok_or_else(|| CheckError::UnknownFunction(name.clone()))?;
                if args.len() != function.arity {
                    return Err(CheckError::WrongArity {
                        name: name.clone(),
                        got: args.len(),
                        want: function.arity,
                    });
                }
                args.iter().try_for_each(|arg| arg.check(vars))
            }
        }
    }
}
