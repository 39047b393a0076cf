use std::io::{self, Write};

use capuchin::{interpreter::Evaluator, Lexer, Parser};

const PROMPT: &str = ">> ";

const CAPUCHIN: &str = r#"
      .-"-.
     / o o \
     \  ^  /
     /`---'\
    ()     ()
"#;

/// One evaluator lives for the whole session, so `let` bindings and the
/// closures capturing them persist line to line.
pub fn start() {
    let mut evaluator = Evaluator::new();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush().expect("failed to flush stdout");

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("failed to read line: {}", err);
                break;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        let mut parser = Parser::new(Lexer::new(&line));

        let program = match parser.parse_program() {
            Ok(program) => program,
            Err(errors) => {
                println!("{}", CAPUCHIN);
                println!("that line didn't parse:");
                for error in errors.iter() {
                    println!("\t{}", error);
                }
                continue;
            }
        };

        match evaluator.eval(program) {
            Ok(result) => println!("{}", result),
            Err(error) => println!("eval error: {}", error),
        }
    }
}
