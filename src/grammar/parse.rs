use super::Grammar;

impl Grammar {
    /// Parses the line-oriented production format:
    ///
    /// ```text
    /// E -> T A
    /// A -> + T A | ε
    /// ```
    ///
    /// A line starting with `|` continues the previous left side. The
    /// first left side seen is the start symbol.
    pub fn parse(grammar: &str) -> Result<Self, String> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, &str)> = Vec::new();
        let mut previous_left: Option<usize> = None;

        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(format!("Line {}: too many \"->\"", i + 1));
            }
            let (left, rights): (usize, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(format!("Line {}: empty left side", i + 1));
                }
                if left_str.split_whitespace().count() != 1 {
                    return Err(format!("Line {}: left side contains whitespace", i + 1));
                }
                let idx = match g.symbol_index(left_str) {
                    Some(idx) => idx,
                    None => g.add_non_terminal(left_str),
                };
                (idx, parts[1].trim())
            } else {
                let rest = parts[0].trim();
                if !rest.starts_with('|') {
                    return Err(format!("Line {}: cannot find left side", i + 1));
                }
                match previous_left {
                    Some(idx) => (idx, rest[1..].trim()),
                    None => return Err(format!("Line {}: cannot find left side", i + 1)),
                }
            };

            previous_left = Some(left);
            raw_productions.push((left, rights));
        }

        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<usize> = right
                    .split_whitespace()
                    .filter(|s| !is_epsilon(s))
                    .map(|s| match g.symbol_index(s) {
                        Some(idx) => idx,
                        None => g.add_terminal(s.to_string()),
                    })
                    .collect();
                g.add_production(left, symbols);
            }
        }

        Ok(g)
    }
}

// Both common epsilon codepoints (U+03B5 and U+03F5) are accepted.
fn is_epsilon(s: &str) -> bool {
    s == "ε" || s == "ϵ"
}
