use formula_rs::ast::Env;
use formula_rs::{format_number, Evaluator};

fn main() {
    pretty_env_logger::init();

    let envs: Vec<Env> = (-4..=21)
        .map(|i| Env::from([("F".to_string(), (i * 10) as f64)]))
        .collect();

    let expression = "5 / 9 * (F - 32)";

    let mut evaluator = Evaluator::default();
    match evaluator.evaluate_batch(expression, &envs) {
        Ok(results) => {
            for (env, result) in envs.iter().zip(results) {
                println!("{}°F = {}°C", format_number(env["F"]), format_number(result));
            }
        }
        Err(err) => println!("Error: {}", err),
    }
}
