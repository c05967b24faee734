pub mod elementary;

use std::collections::HashMap;
use std::sync::LazyLock;

pub type Function = fn(&[f64]) -> f64;

/// Largest arity a builtin may declare. Calls are evaluated into a stack
/// buffer of this size.
pub const MAX_ARITY: usize = 2;

/// A built-in function together with the number of arguments it takes.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    function: Function,
}

impl Builtin {
    pub const fn new(name: &'static str, arity: usize, function: Function) -> Self {
        Self {
            name,
            arity,
            function,
        }
    }

    /// Applies the function; `args` must hold exactly `arity` values.
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.function)(args)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    builtins: HashMap<&'static str, Builtin>,
}

impl Registry {
    /// # Panics
    ///
    /// Panics if `builtin` takes more than [`MAX_ARITY`] arguments.
    pub fn register(&mut self, builtin: Builtin) {
        assert!(
            builtin.arity <= MAX_ARITY,
            "{} takes {} args, at most {} are supported",
            builtin.name,
            builtin.arity,
            MAX_ARITY
        );
        self.builtins.insert(builtin.name, builtin);
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::default();
    elementary::register(&mut registry);
    registry
});

/// Looks up a built-in function by name.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    REGISTRY.get(name)
}
