use formula_rs::ast::{Env, Parser};
use formula_rs::format_number;
use log::debug;
use std::collections::HashSet;
use std::f64::consts::PI;

fn main() {
    pretty_env_logger::init();

    let tests = [
        ("sqrt(A / pi)", Env::from([("A".to_string(), 87616.0), ("pi".to_string(), PI)])),
        ("pow(x, 3) + pow(y, 3)", Env::from([("x".to_string(), 12.0), ("y".to_string(), 1.0)])),
        ("pow(x, 3) + pow(y, 3)", Env::from([("x".to_string(), 9.0), ("y".to_string(), 10.0)])),
        ("5 / 9 * (F - 32)", Env::from([("F".to_string(), -40.0)])),
        ("5 / 9 * (F - 32)", Env::from([("F".to_string(), 32.0)])),
        ("5 / 9 * (F - 32)", Env::from([("F".to_string(), 212.0)])),
    ];

    let mut previous = "";
    for (expression, env) in tests.iter() {
        if *expression != previous {
            println!("\n{}", expression);
            previous = *expression;
        }

        let ast = match Parser::parse_expression(expression) {
            Ok(ast) => ast,
            Err(err) => {
                println!("\tparse: {}", err);
                continue;
            }
        };
        debug!("rendered: {}", ast);

        let mut vars = HashSet::new();
        if let Err(err) = ast.check(&mut vars) {
            println!("\tcheck: {}", err);
            continue;
        }

        let mut env_vars: Vec<_> = env.iter().collect();
        env_vars.sort_by(|a, b| a.0.cmp(b.0));
        println!("\t{:?} => {}", env_vars, format_number(ast.eval(env)));
    }
}
