use std::{fs, io::BufRead};

use ll1_toolkit::expr;
use ll1_toolkit::Grammar;

const GRAMMAR_OUTPUTS: [&str; 3] = ["prod", "nff", "ll1"];
const EXPR_OUTPUTS: [&str; 3] = ["tokens", "ast", "symtab"];

fn print_help() {
    println!("Usage: ll1-toolkit outputs [options] [input file]");
    println!("outputs (grammar input):");
    println!("  prod: Productions");
    println!("  nff: Nullable first and follow");
    println!("  ll1: LL(1) parsing table");
    println!("outputs (expression source input):");
    println!("  tokens: Token sequence");
    println!("  ast: Parse trees");
    println!("  symtab: Populated symbol table");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format (grammar outputs)");
    println!("  -j: Print in JSON format");
    println!("  -t <unordered|ordered|tree|hash>: Symbol table variant (default unordered)");
}

enum OutputFormat {
    Plain,
    LaTeX,
    Json,
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<String>>();

    let mut outputs: Vec<&str> = Vec::new();
    let mut i: usize = 0;
    while i < args.len()
        && (GRAMMAR_OUTPUTS.contains(&args[i].as_str()) || EXPR_OUTPUTS.contains(&args[i].as_str()))
    {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut table_kind = "unordered".to_string();

    while i < args.len() && ["-h", "--help", "-l", "-j", "-t"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::Json;
        } else if args[i] == "-t" {
            i += 1;
            if i >= args.len()
                || !["unordered", "ordered", "tree", "hash"].contains(&args[i].as_str())
            {
                print_help();
                return;
            }
            table_kind = args[i].clone();
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let grammar_mode = outputs.iter().any(|o| GRAMMAR_OUTPUTS.contains(o));
    let expr_mode = outputs.iter().any(|o| EXPR_OUTPUTS.contains(o));
    if grammar_mode && expr_mode {
        eprintln!("Cannot mix grammar and expression outputs in one run");
        print_help();
        std::process::exit(1);
    }

    let input: String = if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    if grammar_mode {
        run_grammar_outputs(&input, &outputs, &output_format);
    } else {
        run_expr_outputs(&input, &outputs, &output_format, &table_kind);
    }
}

fn run_grammar_outputs(input: &str, outputs: &[&str], format: &OutputFormat) {
    let mut g = match Grammar::parse(input) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    g.calculate_nullable_first_follow();

    for output in outputs {
        if *output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if *output == "nff" {
            let t = g.to_non_terminal_output_vec();
            println!(
                "{}",
                match format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if *output == "ll1" {
            let table = g.ll1_table();
            for conflict in table.conflicts() {
                eprintln!(
                    "warning: LL(1) conflict at ({}, {})",
                    table.grammar().symbol_name(conflict.non_terminal),
                    table.grammar().symbol_name(conflict.lookahead)
                );
            }
            let t = table.to_output();
            println!(
                "{}",
                match format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
    }
}

fn run_expr_outputs(input: &str, outputs: &[&str], format: &OutputFormat, table_kind: &str) {
    let tokens = match expr::tokenize(input) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for output in outputs {
        if *output == "tokens" {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&tokens).unwrap()),
                _ => {
                    for token in &tokens {
                        println!("{} {:?}", token.kind, token.text);
                    }
                }
            }
        }
        if *output == "ast" || *output == "symtab" {
            let (trees, symbols) = match parse_tokens(tokens.clone(), table_kind) {
                Ok(pair) => pair,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };
            if *output == "ast" {
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string(&trees).unwrap()),
                    _ => {
                        for tree in &trees {
                            println!("{}", tree);
                        }
                    }
                }
            } else {
                match format {
                    OutputFormat::Json => println!("{}", symbols.to_json()),
                    _ => println!("{}", symbols.to_plaintext()),
                }
            }
        }
    }
}

enum SymbolExport {
    Flat(Vec<expr::SymbolEntry>),
    Buckets(Vec<(usize, Vec<expr::SymbolEntry>)>),
}

impl SymbolExport {
    fn to_plaintext(&self) -> String {
        match self {
            SymbolExport::Flat(entries) => entries
                .iter()
                .map(|e| format!("{} | {}", e.name, e.ty))
                .collect::<Vec<_>>()
                .join("\n"),
            SymbolExport::Buckets(buckets) => buckets
                .iter()
                .map(|(hash, entries)| {
                    format!(
                        "{}: {}",
                        hash,
                        entries
                            .iter()
                            .map(|e| e.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn to_json(&self) -> String {
        match self {
            SymbolExport::Flat(entries) => serde_json::to_string(entries).unwrap(),
            SymbolExport::Buckets(buckets) => serde_json::to_string(buckets).unwrap(),
        }
    }
}

fn parse_tokens(
    tokens: Vec<expr::Token>,
    table_kind: &str,
) -> Result<(Vec<expr::ParseTree>, SymbolExport), expr::ExprError> {
    match table_kind {
        "ordered" => {
            expr::parse_with_ordered(tokens).map(|(t, s)| (t, SymbolExport::Flat(s)))
        }
        "tree" => expr::parse_with_tree(tokens).map(|(t, s)| (t, SymbolExport::Flat(s))),
        "hash" => expr::parse_with_hash(tokens).map(|(t, s)| (t, SymbolExport::Buckets(s))),
        _ => expr::parse_with_unordered(tokens).map(|(t, s)| (t, SymbolExport::Flat(s))),
    }
}
