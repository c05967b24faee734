use crate::ast::{Env, Error, Expr, Operator, Parser, UnaryOperator};
use crate::functions;
use log::debug;
use lru::LruCache;
use rayon::prelude::*;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

impl Expr {
    /// Evaluates the tree against `env`.
    ///
    /// Variables missing from `env` evaluate to `0.0`. Numeric edge cases follow
    /// IEEE semantics, so the result may be infinite or NaN.
    ///
    /// # Panics
    ///
    /// Panics on an operator or function that [`Expr::check`] would reject.
    pub fn eval(&self, env: &Env) -> f64 {
        match self {
            Expr::Literal(value) => *value,
            Expr::Variable(name) => env.get(name).copied().unwrap_or_default(),
            Expr::Unary { operator, operand } => match UnaryOperator::try_from(*operator) {
                Ok(op) => op.apply(operand.eval(env)),
                Err(_) => panic!("unsupported unary operator: {:?}", operator),
            },
            Expr::Binary {
                left,
                operator,
                right,
            } => match Operator::try_from(*operator) {
                Ok(op) => op.apply(left.eval(env), right.eval(env)),
                Err(_) => panic!("unsupported binary operator: {:?}", operator),
            },
            Expr::Call { name, args } => {
                let Some(function) = functions::lookup(name) else {
                    panic!("unsupported function call: {:?}", name);
                };
                if args.len() != function.arity {
                    panic!(
                        "call to {} has {} args, want {}",
                        name,
                        args.len(),
                        function.arity
                    );
                }
                let mut values = [0.0; functions::MAX_ARITY];
                for (value, arg) in values.iter_mut().zip(args) {
                    *value = arg.eval(env);
                }
                function.call(&values[..args.len()])
            }
        }
    }

    /// Evaluates the tree against every environment in parallel.
    ///
    /// Results are returned in the order of `envs`.
    pub fn eval_batch(&self, envs: &[Env]) -> Vec<f64> {
        envs.par_iter().map(|env| self.eval(env)).collect()
    }
}

/// Parses and checks formulas once, then reuses the trees.
///
/// Trees are kept in an LRU cache keyed by source text. Formulas that fail to
/// parse or check are not cached.
pub struct Evaluator {
    cache: LruCache<String, Arc<Expr>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Evaluator {
    /// Creates a new `Evaluator` caching at most `max_cache_size` formulas.
    pub fn new(max_cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Returns the checked tree for `expression`, parsing it on a cache miss.
    pub fn compile(&mut self, expression: &str) -> Result<Arc<Expr>, Error> {
        if let Some(ast) = self.cache.get(expression) {
            return Ok(Arc::clone(ast));
        }

        debug!("Cache miss, compiling: {}", expression);
        let ast = Parser::parse_expression(expression)?;
        ast.check(&mut HashSet::new())?;

        let ast = Arc::new(ast);
        self.cache.put(expression.to_string(), Arc::clone(&ast));
        Ok(ast)
    }

    /// Evaluates a given expression string against a provided environment.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the expression parses and checks.
    /// * `Err(Error)` describing the first parse or check failure.
    pub fn evaluate_expression(&mut self, expression: &str, env: &Env) -> Result<f64, Error> {
        let ast = self.compile(expression)?;
        Ok(ast.eval(env))
    }

    /// Evaluates one expression against many environments.
    pub fn evaluate_batch(&mut self, expression: &str, envs: &[Env]) -> Result<Vec<f64>, Error> {
        let ast = self.compile(expression)?;
        Ok(ast.eval_batch(envs))
    }

    /// Number of cached formulas.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{format_number, CheckError, ParseError};
    use std::f64::consts::PI;

    fn env(pairs: &[(&str, f64)]) -> Env {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn eval(input: &str, env: &Env) -> f64 {
        Parser::parse_expression(input).unwrap().eval(env)
    }

    #[test]
    fn test_formatted_fixtures() {
        let tests = [
            ("sqrt(A / pi)", env(&[("A", 87616.0), ("pi", PI)]), "167"),
            ("pow(x, 3) + pow(y, 3)", env(&[("x", 12.0), ("y", 1.0)]), "1729"),
            ("pow(x, 3) + pow(y, 3)", env(&[("x", 9.0), ("y", 10.0)]), "1729"),
            ("5 / 9 * (F - 32)", env(&[("F", -40.0)]), "-40"),
            ("5 / 9 * (F - 32)", env(&[("F", 32.0)]), "0"),
            ("5 / 9 * (F - 32)", env(&[("F", 212.0)]), "100"),
        ];

        for (input, env, want) in tests {
            let got = format_number(eval(input, &env));
            assert_eq!(got, want, "{}.eval() in {:?}", input, env);
        }
    }

    #[test]
    fn test_precedence_and_associativity() {
        let empty = Env::new();
        assert_eq!(eval("2 + 3 * 4", &empty), 14.0);
        assert_eq!(eval("(2 + 3) * 4", &empty), 20.0);
        assert_eq!(eval("10 - 3 - 2", &empty), 5.0);
        assert_eq!(eval("64 / 4 / 2", &empty), 8.0);
        assert_eq!(eval("-2 * -3", &empty), 6.0);
        assert_eq!(eval("+4 - -4", &empty), 8.0);
    }

    #[test]
    fn test_missing_variables_default_to_zero() {
        assert_eq!(eval("x + 1", &Env::new()), 1.0);
        assert_eq!(eval("y * 3 + x", &env(&[("x", 2.0)])), 2.0);
    }

    #[test]
    fn test_ieee_edge_cases() {
        let empty = Env::new();
        assert_eq!(eval("1 / 0", &empty), f64::INFINITY);
        assert_eq!(eval("-1 / 0", &empty), f64::NEG_INFINITY);
        assert!(eval("0 / 0", &empty).is_nan());
        assert!(eval("sqrt(-1)", &empty).is_nan());
        assert_eq!(eval("x / y", &env(&[("x", 100.0), ("y", 0.0)])), f64::INFINITY);
    }

    #[test]
    fn test_eval_does_not_require_check() {
        assert_eq!(eval("sin(0) + sqrt(16)", &Env::new()), 4.0);
    }

    #[test]
    #[should_panic(expected = "unsupported function call")]
    fn test_unknown_function_panics() {
        eval("foo(1)", &Env::new());
    }

    #[test]
    #[should_panic(expected = "call to pow has 1 args, want 2")]
    fn test_wrong_arity_panics() {
        eval("pow(2)", &Env::new());
    }

    #[test]
    fn test_call_arguments_evaluate_in_order() {
        let context = env(&[("x", 2.0), ("y", 10.0)]);
        assert_eq!(eval("pow(x, y)", &context), 1024.0);
        assert_eq!(eval("pow(y, x)", &context), 100.0);
        assert_eq!(eval("sqrt(pow(y, x))", &context), 10.0);
    }

    #[test]
    #[should_panic(expected = "unsupported binary operator")]
    fn test_unknown_binary_operator_panics() {
        Expr::binary(Expr::literal(1.0), '^', Expr::literal(2.0)).eval(&Env::new());
    }

    #[test]
    #[should_panic(expected = "unsupported unary operator")]
    fn test_unknown_unary_operator_panics() {
        Expr::unary('!', Expr::literal(1.0)).eval(&Env::new());
    }

    #[test]
    fn test_eval_batch_preserves_order() {
        let ast = Parser::parse_expression("5 / 9 * (F - 32)").unwrap();
        let envs: Vec<Env> = (0..64)
            .map(|i| env(&[("F", 32.0 + 9.0 * i as f64)]))
            .collect();

        let results = ast.eval_batch(&envs);
        assert_eq!(results.len(), envs.len());
        for (i, result) in results.iter().enumerate() {
            assert!((result - 5.0 * i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_evaluator_caches_checked_formulas() {
        let mut evaluator = Evaluator::new(2);
        let context = env(&[("price", 100.0), ("volume", 50.0)]);

        assert_eq!(
            evaluator.evaluate_expression("price + volume", &context),
            Ok(150.0)
        );
        assert_eq!(
            evaluator.evaluate_expression("price / volume", &context),
            Ok(2.0)
        );
        assert_eq!(evaluator.len(), 2);

        let first = evaluator.compile("price + volume").unwrap();
        let second = evaluator.compile("price + volume").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        evaluator.compile("price * volume").unwrap();
        assert_eq!(evaluator.len(), 2);
    }

    #[test]
    fn test_evaluator_rejects_invalid_formulas() {
        let mut evaluator = Evaluator::default();
        let empty = Env::new();

        assert!(matches!(
            evaluator.evaluate_expression("price + ", &empty),
            Err(Error::Parse(ParseError::Syntax(_)))
        ));
        assert!(matches!(
            evaluator.evaluate_expression("price > 100", &empty),
            Err(Error::Parse(ParseError::Lex(_)))
        ));
        assert_eq!(
            evaluator.evaluate_expression("foo(price)", &empty),
            Err(Error::Check(CheckError::UnknownFunction("foo".to_string())))
        );
        assert!(evaluator.is_empty());
    }

    #[test]
    fn test_evaluator_batch() {
        let mut evaluator = Evaluator::default();
        let envs = vec![env(&[("x", 12.0), ("y", 1.0)]), env(&[("x", 9.0), ("y", 10.0)])];
        let results = evaluator
            .evaluate_batch("pow(x, 3) + pow(y, 3)", &envs)
            .unwrap();
        let formatted: Vec<String> = results.into_iter().map(format_number).collect();
        assert_eq!(formatted, vec!["1729", "1729"]);
        assert!(evaluator.evaluate_batch("pow(x)", &envs).is_err());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut evaluator = Evaluator::new(0);
        evaluator.compile("1 + 1").unwrap();
        assert_eq!(evaluator.len(), 1);
    }
}
