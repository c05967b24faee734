use crate::functions::{Builtin, Registry};

pub fn register(registry: &mut Registry) {
    registry.register(Builtin::new("pow", 2, pow));
    registry.register(Builtin::new("sin", 1, sin));
    registry.register(Builtin::new("sqrt", 1, sqrt));
}

pub fn pow(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}

pub fn sin(args: &[f64]) -> f64 {
    args[0].sin()
}

pub fn sqrt(args: &[f64]) -> f64 {
    args[0].sqrt()
}
