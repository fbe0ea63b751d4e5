use std::fs;
use std::io::Read;

use anyhow::Context;
use clap::{App, Arg};

use caldera::ast::Item;
use caldera::driver;
use caldera::parser::Parser;

fn main() -> anyhow::Result<()> {
    let matches = App::new("caldera")
        .version(clap::crate_version!())
        .about("parses caldera source and prints the resulting AST")
        .arg(Arg::with_name("INPUT").help("source file to parse; reads stdin when omitted"))
        .get_matches();

    let source = match matches.value_of("INPUT") {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let mut parser = Parser::from_source(&source);
    let outcome = driver::parse_program(&mut parser);

    for item in &outcome.items {
        match item {
            Item::Function(func) if func.is_anonymous() => {
                println!("parsed a top-level expression")
            }
            Item::Function(_) => println!("parsed a function definition"),
            Item::Extern(_) => println!("parsed an extern declaration"),
        }
        println!("{:#?}", item);
    }

    for err in &outcome.errors {
        eprintln!("error: {}", err);
    }

    if !outcome.errors.is_empty() {
        anyhow::bail!("{} syntax error(s)", outcome.errors.len());
    }
    Ok(())
}
