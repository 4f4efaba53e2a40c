// tacgen - three-address code generator driver
// Replays a script of code generation actions and prints the resulting quads

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use tacgen::codegen::{CodegenConfig, CodegenSession};
use tacgen::script::run_script;

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let mut input_file = "";
    let mut output_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut max_quads: Option<usize> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: -o requires a filename");
                    process::exit(1);
                }
                output_file = Some(args[i + 1].clone());
                i += 2;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a filename");
                    process::exit(1);
                }
                config_file = Some(args[i + 1].clone());
                i += 2;
            }
            "--max-quads" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --max-quads requires a number");
                    process::exit(1);
                }
                max_quads = match args[i + 1].parse() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        eprintln!("Error: Invalid quad limit '{}'", args[i + 1]);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "-v" | "--verbose" => {
                verbose = true;
                i += 1;
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", arg);
                print_usage(&args[0]);
                process::exit(1);
            }
            _ => {
                if input_file.is_empty() {
                    input_file = &args[i];
                } else {
                    eprintln!("Error: Multiple input files specified");
                    process::exit(1);
                }
                i += 1;
            }
        }
    }

    if input_file.is_empty() {
        eprintln!("Error: No input file specified");
        print_usage(&args[0]);
        process::exit(1);
    }

    let mut config = match &config_file {
        Some(path) => match CodegenConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        },
        None => CodegenConfig::default(),
    };
    if let Some(limit) = max_quads {
        config.max_quads = limit;
        if let Err(err) = config.validate() {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }

    let source = match fs::read_to_string(input_file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading '{}': {}", input_file, err);
            process::exit(1);
        }
    };

    let mut session = CodegenSession::with_config(config);
    if let Err(err) = run_script(&mut session, &source) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }

    if verbose {
        eprintln!(
            "Generated {} quads from {} (limit {})",
            session.len(),
            input_file,
            session.capacity()
        );
    }

    let result = match &output_file {
        Some(path) => fs::File::create(path).and_then(|mut file| session.render(&mut file)),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            session.render(&mut lock).and_then(|_| lock.flush())
        }
    };
    if let Err(err) = result {
        eprintln!("Error writing output: {}", err);
        process::exit(1);
    }
}

fn print_usage(program_name: &str) {
    println!("Usage: {} [options] <script>", program_name);
    println!();
    println!("Options:");
    println!("  -o, --output <file>    Write quads to file (default: stdout)");
    println!("  --config <file.toml>   Code generator configuration");
    println!("  --max-quads <n>        Override the instruction buffer limit");
    println!("  -v, --verbose          Verbose output");
    println!("  -h, --help             Show this help message");
    println!();
    println!("Examples:");
    println!("  {} loop.tac                      # Print quads to stdout", program_name);
    println!(
        "  {} --max-quads 2000 -o out.q loop.tac",
        program_name
    );
}
