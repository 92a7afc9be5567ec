use serde::Serialize;

/// The only type the toy language ever infers.
pub const NUMBER_TYPE: &str = "NUMBER";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: String,
}

impl SymbolEntry {
    fn number(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: NUMBER_TYPE.to_string(),
        }
    }
}

/// What the parser needs from a symbol table: record a variable on its
/// first assignment, answer whether a variable is known. Entries are
/// never removed or retyped.
pub trait SymbolTable {
    fn insert(&mut self, name: &str);
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// Append-only list, linear lookup, insertion order preserved.
#[derive(Debug, Default)]
pub struct UnorderedSymbolTable {
    table: Vec<SymbolEntry>,
}

impl UnorderedSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<SymbolEntry> {
        self.table.clone()
    }
}

impl SymbolTable for UnorderedSymbolTable {
    fn insert(&mut self, name: &str) {
        self.table.push(SymbolEntry::number(name));
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.table
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.ty.as_str())
    }
}

/// List re-sorted after every insert. Lookup stays linear; keeping the
/// list sorted only affects export order.
#[derive(Debug, Default)]
pub struct OrderedSymbolTable {
    table: Vec<SymbolEntry>,
}

impl OrderedSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<SymbolEntry> {
        self.table.clone()
    }
}

impl SymbolTable for OrderedSymbolTable {
    fn insert(&mut self, name: &str) {
        self.table.push(SymbolEntry::number(name));
        self.table.sort();
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.table
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.ty.as_str())
    }
}

#[derive(Debug)]
struct TreeNode {
    entry: SymbolEntry,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

/// Unbalanced binary search tree keyed by name. Worst case degrades to
/// a linked list; export order is a preorder walk.
#[derive(Debug, Default)]
pub struct TreeSymbolTable {
    root: Option<Box<TreeNode>>,
}

impl TreeSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<SymbolEntry> {
        fn walk(node: &Option<Box<TreeNode>>, out: &mut Vec<SymbolEntry>) {
            if let Some(node) = node {
                out.push(node.entry.clone());
                walk(&node.left, out);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    fn insert_recursive(node: &mut Option<Box<TreeNode>>, name: &str) {
        match node {
            None => {
                *node = Some(Box::new(TreeNode {
                    entry: SymbolEntry::number(name),
                    left: None,
                    right: None,
                }));
            }
            Some(n) => {
                if name < n.entry.name.as_str() {
                    Self::insert_recursive(&mut n.left, name);
                } else if name > n.entry.name.as_str() {
                    Self::insert_recursive(&mut n.right, name);
                }
                // equal: already present, nothing to do
            }
        }
    }

    fn lookup_recursive<'a>(node: &'a Option<Box<TreeNode>>, name: &str) -> Option<&'a str> {
        let n = node.as_ref()?;
        if name == n.entry.name {
            Some(n.entry.ty.as_str())
        } else if name < n.entry.name.as_str() {
            Self::lookup_recursive(&n.left, name)
        } else {
            Self::lookup_recursive(&n.right, name)
        }
    }
}

impl SymbolTable for TreeSymbolTable {
    fn insert(&mut self, name: &str) {
        Self::insert_recursive(&mut self.root, name);
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        Self::lookup_recursive(&self.root, name)
    }
}

/// Two-phase table: during the parse the names live in a flat list;
/// `into_buckets` then groups them by `(first byte + length) % count`.
/// Consuming `self` keeps the bucketing from running mid-parse.
#[derive(Debug, Default)]
pub struct HashSymbolTable {
    names: Vec<String>,
}

impl HashSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_buckets(self) -> Vec<(usize, Vec<SymbolEntry>)> {
        if self.names.is_empty() {
            return Vec::new();
        }
        let count = self.names.len();
        let mut buckets: Vec<(usize, Vec<SymbolEntry>)> = Vec::new();
        for name in &self.names {
            let hash = (name.as_bytes()[0] as usize + name.len()) % count;
            match buckets.iter_mut().find(|(h, _)| *h == hash) {
                Some((_, entries)) => entries.push(SymbolEntry::number(name)),
                None => buckets.push((hash, vec![SymbolEntry::number(name)])),
            }
        }
        buckets
    }
}

impl SymbolTable for HashSymbolTable {
    fn insert(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .any(|n| n == name)
            .then_some(NUMBER_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(table: &mut dyn SymbolTable) -> Vec<bool> {
        let mut results = Vec::new();
        results.push(table.lookup("x").is_some());
        table.insert("x");
        results.push(table.lookup("x").is_some());
        results.push(table.lookup("y").is_some());
        table.insert("total");
        table.insert("y");
        results.push(table.lookup("total").is_some());
        results.push(table.lookup("y").is_some());
        results.push(table.lookup("z").is_some());
        results
    }

    #[test]
    fn all_variants_agree_on_lookups() {
        let mut unordered = UnorderedSymbolTable::new();
        let mut ordered = OrderedSymbolTable::new();
        let mut tree = TreeSymbolTable::new();
        let mut hash = HashSymbolTable::new();

        let expected = vec![false, true, false, true, true, false];
        assert_eq!(exercise(&mut unordered), expected);
        assert_eq!(exercise(&mut ordered), expected);
        assert_eq!(exercise(&mut tree), expected);
        assert_eq!(exercise(&mut hash), expected);
    }

    #[test]
    fn every_entry_is_a_number() {
        let mut table = UnorderedSymbolTable::new();
        table.insert("a");
        assert_eq!(table.lookup("a"), Some(NUMBER_TYPE));
    }

    #[test]
    fn unordered_keeps_insertion_order() {
        let mut table = UnorderedSymbolTable::new();
        table.insert("z");
        table.insert("a");
        let names: Vec<_> = table.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn ordered_sorts_entries() {
        let mut table = OrderedSymbolTable::new();
        table.insert("z");
        table.insert("a");
        table.insert("m");
        let names: Vec<_> = table.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn tree_exports_preorder() {
        let mut table = TreeSymbolTable::new();
        table.insert("m");
        table.insert("a");
        table.insert("z");
        table.insert("b");
        let names: Vec<_> = table.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["m", "a", "b", "z"]);
    }

    #[test]
    fn hash_buckets_use_first_byte_plus_length() {
        let mut table = HashSymbolTable::new();
        table.insert("x");
        table.insert("yy");
        table.insert("z");
        let buckets = table.into_buckets();
        // 3 names: "x" -> (120+1)%3 = 1, "yy" -> (121+2)%3 = 0, "z" -> (122+1)%3 = 0
        for (hash, entries) in &buckets {
            for entry in entries {
                let expected = (entry.name.as_bytes()[0] as usize + entry.name.len()) % 3;
                assert_eq!(*hash, expected);
            }
        }
        assert_eq!(buckets.iter().map(|(_, e)| e.len()).sum::<usize>(), 3);
        assert!(buckets.iter().any(|(h, e)| *h == 0 && e.len() == 2));
    }

    #[test]
    fn hash_buckets_empty_table() {
        assert!(HashSymbolTable::new().into_buckets().is_empty());
    }
}
