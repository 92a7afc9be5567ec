extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod expr;
pub mod grammar;

pub use expr::{tokenize, ExprError, ParseTree, Parser};
pub use grammar::{Grammar, Ll1Table};

fn error_json(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_nullable_first_follow();
            g.to_non_terminal_output_vec().to_json()
        }
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn ll1_table_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => g.ll1_table().to_output().to_json(),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn tokenize_to_json(src: &str) -> String {
    match expr::tokenize(src) {
        Ok(tokens) => serde_json::to_string(&tokens).unwrap(),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn parse_to_json(src: &str, table_kind: &str) -> String {
    let tokens = match expr::tokenize(src) {
        Ok(tokens) => tokens,
        Err(e) => return error_json(e),
    };
    let result = match table_kind {
        "unordered" => expr::parse_with_unordered(tokens)
            .map(|(trees, table)| serde_json::json!({ "trees": trees, "symbols": table })),
        "ordered" => expr::parse_with_ordered(tokens)
            .map(|(trees, table)| serde_json::json!({ "trees": trees, "symbols": table })),
        "tree" => expr::parse_with_tree(tokens)
            .map(|(trees, table)| serde_json::json!({ "trees": trees, "symbols": table })),
        "hash" => expr::parse_with_hash(tokens)
            .map(|(trees, buckets)| serde_json::json!({ "trees": trees, "symbols": buckets })),
        other => return error_json(format!("unknown symbol table kind: {}", other)),
    };
    match result {
        Ok(value) => value.to_string(),
        Err(e) => error_json(e),
    }
}


#[cfg(test)]
mod nullable_first_follow_tests {
    use crate::Grammar;

    fn analyzed(text: &str) -> Grammar {
        let mut g = Grammar::parse(text).unwrap();
        g.calculate_nullable_first_follow();
        g
    }

    fn first(g: &Grammar, name: &str) -> Vec<String> {
        let nt = g.symbols[g.symbol_index(name).unwrap()]
            .non_terminal()
            .unwrap();
        let mut v: Vec<String> = nt
            .first
            .iter()
            .map(|&i| g.symbol_name(i).to_string())
            .collect();
        v.sort();
        v
    }

    fn follow(g: &Grammar, name: &str) -> Vec<String> {
        let nt = g.symbols[g.symbol_index(name).unwrap()]
            .non_terminal()
            .unwrap();
        let mut v: Vec<String> = nt
            .follow
            .iter()
            .map(|&i| g.symbol_name(i).to_string())
            .collect();
        v.sort();
        v
    }

    fn nullable(g: &Grammar, name: &str) -> bool {
        g.symbols[g.symbol_index(name).unwrap()]
            .non_terminal()
            .unwrap()
            .nullable
    }

    #[test]
    fn epsilon_only_production() {
        let g = analyzed("A -> ε");
        assert!(nullable(&g, "A"));
        assert!(first(&g, "A").is_empty());
    }

    #[test]
    fn epsilon_alternative() {
        let g = analyzed("A -> x | ε");
        assert!(nullable(&g, "A"));
        assert_eq!(first(&g, "A"), vec!["x"]);
    }

    #[test]
    fn follow_of_start_contains_end_mark() {
        for text in ["S -> a", "S -> A b\nA -> a | ε", "E -> T A\nA -> + T A | ε\nT -> v"] {
            let g = analyzed(text);
            let start = g.start.unwrap();
            let name = g.symbol_name(start).to_string();
            assert!(follow(&g, &name).contains(&"$".to_string()), "{}", text);
        }
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut g = Grammar::parse("E -> T A\nA -> + T A | ε\nT -> F B\nB -> * F B | ε\nF -> ( E ) | v").unwrap();
        g.calculate_nullable_first_follow();
        let once: Vec<_> = ["E", "A", "T", "B", "F"]
            .iter()
            .map(|n| (first(&g, n), follow(&g, n), nullable(&g, n)))
            .collect();
        g.calculate_nullable_first_follow();
        let twice: Vec<_> = ["E", "A", "T", "B", "F"]
            .iter()
            .map(|n| (first(&g, n), follow(&g, n), nullable(&g, n)))
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn worked_example_sets() {
        let g = analyzed("E -> T A\nA -> + T A | ε\nT -> F B\nB -> * F B | ε\nF -> ( E ) | v");

        assert_eq!(first(&g, "E"), vec!["(", "v"]);
        assert_eq!(first(&g, "F"), vec!["(", "v"]);
        assert_eq!(first(&g, "A"), vec!["+"]);
        assert!(nullable(&g, "A"));
        assert!(nullable(&g, "B"));
        assert!(!nullable(&g, "E"));

        assert_eq!(follow(&g, "E"), vec!["$", ")"]);
        assert_eq!(follow(&g, "A"), vec!["$", ")"]);
        assert_eq!(follow(&g, "T"), vec!["$", ")", "+"]);
        assert_eq!(follow(&g, "F"), vec!["$", ")", "*", "+"]);
    }

    #[test]
    fn follow_needs_transitive_propagation() {
        // FOLLOW(S) gains "d" only after S's first production has
        // already been scanned, so "d" reaches A and B on a later
        // round. A single forward pass misses it.
        let g = analyzed("S -> A | s S d\nA -> B\nB -> b");
        assert_eq!(follow(&g, "A"), vec!["$", "d"]);
        assert_eq!(follow(&g, "B"), vec!["$", "d"]);
    }

    #[test]
    fn first_of_sequence() {
        let g = analyzed("S -> A b\nA -> a | ε");
        let a = g.symbol_index("A").unwrap();
        let b = g.symbol_index("b").unwrap();

        let (set, nullable) = g.first_of(&[a, b]);
        let mut names: Vec<_> = set.iter().map(|&i| g.symbol_name(i)).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
        assert!(!nullable);

        let (set, nullable) = g.first_of(&[a]);
        assert_eq!(set.len(), 1);
        assert!(nullable);
    }
}


#[cfg(test)]
mod wasm_export_tests {
    #[test]
    fn nullable_first_follow_to_json_reports_errors() {
        let out = crate::nullable_first_follow_to_json("S -> a -> b");
        assert!(out.contains("error"));
    }

    #[test]
    fn tokenize_to_json_round_trip() {
        let out = crate::tokenize_to_json("x = 1");
        assert!(out.contains("VARIABLE"));
        assert!(out.contains("ASSIGN"));
        assert!(out.contains("NUMBER"));
    }

    #[test]
    fn parse_to_json_with_hash_table() {
        let out = crate::parse_to_json("x = 1\ny = x + 2", "hash");
        assert!(out.contains("\"trees\""));
        assert!(out.contains("\"symbols\""));
    }

    #[test]
    fn parse_to_json_unknown_kind() {
        let out = crate::parse_to_json("x = 1", "btree");
        assert!(out.contains("error"));
    }
}
