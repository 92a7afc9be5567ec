use std::collections::HashMap;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub nullable: bool,
    pub first: HashSet<usize>,
    pub follow: HashSet<usize>,
    /// Each production is a sequence of symbol indices; the empty
    /// sequence is the epsilon production.
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            nullable: false,
            first: HashSet::new(),
            follow: HashSet::new(),
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(nt) => Some(nt),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(nt) => Some(nt),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

/// A context-free grammar stored as an arena of interned symbols.
///
/// The first non-terminal registered is the start symbol. The end
/// marker `$` is interned as a terminal on construction so FOLLOW
/// sets and parsing-table columns can refer to it by index.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
    pub start: Option<usize>,
    pub(crate) analyzed: bool,
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: Vec::new(),
            index: HashMap::new(),
            start: None,
            analyzed: false,
        };
        g.add_terminal(super::END_MARK.to_string());
        g
    }

    pub fn end_mark_index(&self) -> usize {
        self.index[super::END_MARK]
    }

    pub fn symbol_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).cloned()
    }

    pub fn symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::NonTerminal(nt) => nt.name.as_str(),
            Symbol::Terminal(name) => name.as_str(),
        }
    }

    /// Registers a non-terminal. The first one registered becomes the
    /// start symbol unless `start` is reassigned afterwards.
    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.index.insert(name.to_string(), idx);
        if self.start.is_none() {
            self.start = Some(idx);
        }
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.index.insert(name, idx);
        idx
    }

    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        self.symbols[left]
            .mut_non_terminal()
            .expect("left side of a production must be a non-terminal")
            .productions
            .push(right);
        self.analyzed = false;
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.symbols.iter().filter_map(|s| match s {
            Symbol::Terminal(name) => Some(name),
            Symbol::NonTerminal(_) => None,
        })
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(|s| s.non_terminal())
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.symbols.iter_mut().filter_map(|s| s.mut_non_terminal())
    }

    pub fn production_count(&self) -> usize {
        self.non_terminal_iter().map(|nt| nt.productions.len()).sum()
    }

    pub fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        if production.is_empty() {
            vec![super::EPSILON]
        } else {
            production.iter().map(|&i| self.symbol_name(i)).collect()
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}
