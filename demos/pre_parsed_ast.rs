use formula_rs::ast::{Env, Parser};
use std::collections::HashSet;

fn main() {
    pretty_env_logger::init();

    let expression = "pow(x, 3) + pow(y, 3) - sqrt(z)";
    let ast = Parser::parse_expression(expression).expect("Failed to parse");
    println!("Parsed: {}", ast);

    let mut vars = HashSet::new();
    if let Err(err) = ast.check(&mut vars) {
        println!("Error: {}", err);
        return;
    }
    let mut vars: Vec<_> = vars.into_iter().collect();
    vars.sort();
    println!("Free variables: {}", vars.join(", "));

    // Variables missing from the environment read as zero.
    let env: Env = [("x".to_string(), 12.0), ("y".to_string(), 1.0)]
        .iter()
        .cloned()
        .collect();
    println!("Result: {}", ast.eval(&env));
}
