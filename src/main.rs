use std::env;
use std::io::{self, BufRead};
use std::process;

use expr_eval::error::{self, Error};
use expr_eval::expr::Expr;
use expr_eval::parser::Parser;
use expr_eval::scanner::Scanner;

fn main() {
    let args: Vec<_> = env::args().collect();
    let print_ast = args.iter().any(|arg| arg == "--ast");
    let source = match args.iter().skip(1).find(|arg| *arg != "--ast") {
        Some(arg) => arg.clone(),
        None => match read_stdin_line() {
            Some(line) => line,
            None => process::exit(1),
        },
    };

    if print_ast {
        match parse(&source) {
            Ok(expr) => println!("{}", expr.to_json()),
            Err(e) => {
                error::print_error(&source, &e);
                process::exit(1);
            }
        }
    } else {
        match run(&source, true) {
            Ok(value) => println!("{}", value),
            Err(_) => process::exit(1),
        }
    }
}

fn read_stdin_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end().to_string()),
    }
}

/// Tokenizes and parses one expression into a tree.
pub fn parse(source: &str) -> Result<Expr, Error> {
    let tokens = Scanner::new(source).scan()?;
    Parser::new(&tokens).parse()
}

/// The whole pipeline: source string -> tokens -> tree -> integer result.
/// The first failure at any stage aborts the run.
pub fn run(source: &str, print_error: bool) -> Result<i64, Error> {
    let result = parse(source).and_then(|expr| expr.evaluate());

    if print_error {
        if let Err(e) = &result {
            error::print_error(source, e);
        }
    }

    result
}
