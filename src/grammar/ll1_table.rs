use std::collections::HashMap;

use super::grammar::Symbol;
use super::Grammar;

/// A predictive parsing table. Each cell keeps every candidate
/// production in declaration order, so a grammar that is not truly
/// LL(1) shows up as a cell with more than one entry instead of being
/// silently overwritten; `accepts` always follows the first candidate.
#[derive(Debug)]
pub struct Ll1Table<'g> {
    grammar: &'g Grammar,
    /// Terminal column symbols, `$` included.
    terminals: Vec<usize>,
    column_of: HashMap<usize, usize>,
    /// One row per non-terminal, in grammar order.
    rows: Vec<Ll1Row>,
    row_of: HashMap<usize, usize>,
}

#[derive(Debug)]
pub struct Ll1Row {
    pub non_terminal: usize,
    /// Candidate productions per terminal column.
    pub cells: Vec<Vec<Vec<usize>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ll1Conflict {
    pub non_terminal: usize,
    pub lookahead: usize,
    pub productions: Vec<Vec<usize>>,
}

impl Grammar {
    pub fn ll1_table(&mut self) -> Ll1Table {
        if !self.is_analysis_valid() {
            self.calculate_nullable_first_follow();
        }

        let terminals: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_terminal().then_some(i))
            .collect();
        let column_of: HashMap<usize, usize> =
            terminals.iter().enumerate().map(|(col, &t)| (t, col)).collect();

        let mut rows = Vec::new();
        let mut row_of = HashMap::new();
        for nt in self.non_terminal_iter() {
            let mut cells: Vec<Vec<Vec<usize>>> = vec![Vec::new(); terminals.len()];
            for production in &nt.productions {
                let (first, nullable) = self.first_of(production);
                for &t in &first {
                    cells[column_of[&t]].push(production.clone());
                }
                if nullable {
                    for &f in &nt.follow {
                        cells[column_of[&f]].push(production.clone());
                    }
                }
            }
            row_of.insert(nt.index, rows.len());
            rows.push(Ll1Row {
                non_terminal: nt.index,
                cells,
            });
        }

        Ll1Table {
            grammar: self,
            terminals,
            column_of,
            rows,
            row_of,
        }
    }
}

impl<'g> Ll1Table<'g> {
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn terminals(&self) -> &[usize] {
        &self.terminals
    }

    pub fn rows(&self) -> &[Ll1Row] {
        &self.rows
    }

    pub fn is_ll1(&self) -> bool {
        self.conflicts().is_empty()
    }

    /// Cells holding more than one candidate production.
    pub fn conflicts(&self) -> Vec<Ll1Conflict> {
        let mut conflicts = Vec::new();
        for row in &self.rows {
            for (col, cell) in row.cells.iter().enumerate() {
                if cell.len() > 1 {
                    conflicts.push(Ll1Conflict {
                        non_terminal: row.non_terminal,
                        lookahead: self.terminals[col],
                        productions: cell.clone(),
                    });
                }
            }
        }
        conflicts
    }

    fn entry(&self, non_terminal: usize, lookahead: usize) -> Option<&Vec<usize>> {
        let row = &self.rows[*self.row_of.get(&non_terminal)?];
        row.cells[*self.column_of.get(&lookahead)?].first()
    }

    /// Runs the table-driven recognizer over a sequence of terminal
    /// names. Pure acceptor: no tree, no failure position.
    pub fn accepts(&self, tokens: &[&str]) -> bool {
        let start = match self.grammar.start {
            Some(start) => start,
            None => return false,
        };
        let end = self.grammar.end_mark_index();

        let mut input: Vec<usize> = Vec::with_capacity(tokens.len() + 1);
        for token in tokens {
            match self.grammar.symbol_index(token) {
                Some(idx) => input.push(idx),
                None => return false,
            }
        }
        input.push(end);

        let mut stack = vec![end, start];
        let mut cursor = 0;

        // A well-formed table expands each stack symbol a bounded
        // number of times per input position; a malformed one could
        // cycle through epsilon expansions, so the loop carries a
        // budget and rejects when it runs out.
        let mut budget =
            (input.len() + 1) * self.grammar.symbols.len() * (self.grammar.production_count() + 1);

        while let Some(top) = stack.pop() {
            if budget == 0 || cursor >= input.len() {
                return false;
            }
            budget -= 1;

            let current = input[cursor];
            match &self.grammar.symbols[top] {
                Symbol::Terminal(_) => {
                    if top != current {
                        return false;
                    }
                    cursor += 1;
                }
                Symbol::NonTerminal(_) => match self.entry(top, current) {
                    Some(production) => stack.extend(production.iter().rev()),
                    None => return false,
                },
            }
        }

        cursor == input.len()
    }
}
