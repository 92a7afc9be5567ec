use std::collections::HashSet;

use super::grammar::Symbol;
use super::Grammar;

impl Grammar {
    /// Runs the nullable, FIRST and FOLLOW passes to their fixpoints.
    /// Recomputing on an unchanged grammar yields identical sets.
    pub fn calculate_nullable_first_follow(&mut self) {
        self.reset_analysis();
        self.calculate_nullable();
        self.calculate_first();
        self.calculate_follow();
        self.analyzed = true;
    }

    pub fn is_analysis_valid(&self) -> bool {
        self.analyzed
    }

    pub fn reset_analysis(&mut self) {
        for nt in self.non_terminal_iter_mut() {
            nt.nullable = false;
            nt.first = HashSet::new();
            nt.follow = HashSet::new();
        }
        self.analyzed = false;
    }

    /// FIRST of a symbol sequence: the terminals that can begin a
    /// derivation of it, plus whether the whole sequence derives
    /// epsilon. Valid once `calculate_nullable_first_follow` (or at
    /// least the nullable and FIRST passes) has run.
    pub fn first_of(&self, sequence: &[usize]) -> (HashSet<usize>, bool) {
        let mut first = HashSet::new();
        for &idx in sequence {
            match &self.symbols[idx] {
                Symbol::Terminal(_) => {
                    first.insert(idx);
                    return (first, false);
                }
                Symbol::NonTerminal(nt) => {
                    first.extend(nt.first.iter().cloned());
                    if !nt.nullable {
                        return (first, false);
                    }
                }
            }
        }
        (first, true)
    }

    fn calculate_nullable(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let nullable = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        if nt.nullable {
                            continue;
                        }
                        nt.productions.iter().any(|production| {
                            production.iter().all(|&s| match &self.symbols[s] {
                                Symbol::Terminal(_) => false,
                                Symbol::NonTerminal(nt) => nt.nullable,
                            })
                        })
                    }
                };
                if nullable {
                    self.symbols[i].mut_non_terminal().unwrap().nullable = true;
                    changed = true;
                }
            }
        }
    }

    fn calculate_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let first: HashSet<usize> = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => nt
                        .productions
                        .iter()
                        .fold(HashSet::new(), |mut acc, production| {
                            acc.extend(self.first_of(production).0);
                            acc
                        }),
                };
                let nt = self.symbols[i].mut_non_terminal().unwrap();
                // FIRST sets only grow, so a size change is the only change.
                if nt.first.len() != first.len() {
                    nt.first = first;
                    changed = true;
                }
            }
        }
    }

    fn calculate_follow(&mut self) {
        if let Some(start) = self.start {
            let end = self.end_mark_index();
            self.symbols[start]
                .mut_non_terminal()
                .unwrap()
                .follow
                .insert(end);
        }

        let nt_indices: Vec<usize> = self.non_terminal_iter().map(|nt| nt.index).collect();

        let mut changed = true;
        while changed {
            changed = false;
            for &a in &nt_indices {
                let productions = self.symbols[a].non_terminal().unwrap().productions.clone();
                let follow_a = self.symbols[a].non_terminal().unwrap().follow.clone();

                for production in &productions {
                    for (i, &x) in production.iter().enumerate() {
                        if self.symbols[x].is_terminal() {
                            continue;
                        }
                        let (mut addition, beta_nullable) = self.first_of(&production[i + 1..]);
                        if beta_nullable {
                            addition.extend(follow_a.iter().cloned());
                        }
                        let follow_x = &mut self.symbols[x].mut_non_terminal().unwrap().follow;
                        let before = follow_x.len();
                        follow_x.extend(addition);
                        if follow_x.len() != before {
                            changed = true;
                        }
                    }
                }
            }
        }
    }
}
