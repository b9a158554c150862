// cminus: scanner + recursive-descent parser for a pedagogical C subset

mod driver;
mod parser;

use driver::PipelineError;
use std::process;

const DEFAULT_TOKENS_FILE: &str = "tokens.txt";

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("cminus");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.c> [tokens-file]", program_name);
        eprintln!();
        eprintln!(
            "Scans <file.c>, writes the token stream to the tokens file \
             ('{}' by default), reads it back, and parses it into a syntax tree.",
            DEFAULT_TOKENS_FILE
        );
        process::exit(1);
    }

    let source_file = &args[1];
    let tokens_file = args
        .get(2)
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_TOKENS_FILE);

    eprintln!("Scanning {}...", source_file);
    match driver::run_file(source_file, tokens_file) {
        Ok((tree, lines, token_count)) => {
            eprintln!("Scanning complete. Output written to {}", tokens_file);
            eprintln!("Source size: {} line(s)", lines);
            eprintln!("Token file loaded. {} tokens read.", token_count);
            eprintln!("Parsing completed successfully.");
            println!("--- Abstract Syntax Tree ---");
            print!("{}", tree.render_tree());
            println!("--------------------------");
        }
        Err(err) => {
            match &err {
                PipelineError::Lex(_) => eprintln!("{}", err),
                PipelineError::Syntax(_) => {
                    eprintln!("{}", err);
                    eprintln!("Program has one or more syntax errors.");
                }
                _ => eprintln!("{}", err),
            }
            process::exit(1);
        }
    }
}
