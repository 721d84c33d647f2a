//! Reads a contact from the command line, for example:
//!
//! ```text
//! cargo run --example contact -- --name=Clany -a "441 S Dunn St" -c47401 -p --file notes.txt
//! ```
//!
//! Set `RUST_LOG=optscan=trace` to watch the scanner work.

use optscan::{Arity, LongOption, OptionTable, Scanner};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Contact {
    name: String,
    address: String,
    post_code: u32,
    print: bool,
    file: Option<std::path::PathBuf>,
}

fn parse_args() -> Result<(Contact, Vec<String>), optscan::Error> {
    let table = OptionTable::new(
        "n:a::c:pf:h",
        &[
            LongOption::new("name", Arity::Required, 'n'),
            LongOption::new("address", Arity::Optional, 'a'),
            LongOption::new("post_code", Arity::Required, 'c'),
            LongOption::new("print", Arity::None, 'p'),
            LongOption::new("file", Arity::Required, 'f'),
            LongOption::new("help", Arity::None, 'h'),
        ],
    )?;
    let mut scanner = Scanner::from_env(table)?;

    let mut contact = Contact::default();
    while let Some(code) = scanner.next()? {
        match code {
            'n' => contact.name = scanner.get_arg(),
            'a' => contact.address = scanner.get_arg(),
            'c' => contact.post_code = scanner.get_arg(),
            'p' => contact.print = true,
            'f' => contact.file = Some(scanner.get_arg()),
            'h' => {
                println!(
                    "USAGE: {} [-n|--name NAME] [-a|--address [ADDR]] [-c|--post_code CODE] [-p|--print] [-f|--file FILE]",
                    scanner.bin_name().unwrap_or("contact")
                );
                std::process::exit(0);
            }
            _ => unreachable!(),
        }
    }
    let rest = scanner.positionals().map(String::from).collect();
    Ok((contact, rest))
}

fn main() -> Result<(), optscan::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (contact, rest) = parse_args()?;
    if contact.print {
        println!("{:<9}: {}", "name", contact.name);
        println!("{:<9}: {}", "address", contact.address);
        println!("{:<9}: {}", "post code", contact.post_code);
    }
    if let Some(file) = &contact.file {
        println!("file: {}", file.display());
    }
    if !rest.is_empty() {
        println!("positional: {:?}", rest);
    }
    Ok(())
}
