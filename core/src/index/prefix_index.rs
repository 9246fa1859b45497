//! Character-level prefix tree

use std::collections::HashMap;

/// One symbol position along some inserted key
///
/// A node is terminal exactly when `value` is `Some`.
#[derive(Debug, Clone)]
struct Node<V> {
    children: HashMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

// Deep chains would otherwise be dropped recursively, one frame per symbol.
impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<V>> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// Key/value index organised as an uncompressed trie over `char`s
///
/// Every operation costs O(key length) and never fails; absence is `None`.
/// Empty keys are not stored: `insert("")` is a no-op that drops the value,
/// and `search("")` / `delete("")` answer `None`.
///
/// Writers need `&mut self`. Share it between threads behind an external lock.
///
/// # Example
/// ```
/// use sl_core::PrefixIndex;
///
/// let mut index = PrefixIndex::new();
/// index.insert("cat", 1);
/// index.insert("car", 2);
/// index.delete("cat");
///
/// assert_eq!(index.search("car"), Some(&2));
/// assert_eq!(index.search("cat"), None);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixIndex<V> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for PrefixIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixIndex<V> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no key is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` under `key`, returning the value it replaced
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        if key.is_empty() {
            return None;
        }

        let mut node = &mut self.root;
        for symbol in key.chars() {
            node = node.children.entry(symbol).or_insert_with(Node::new);
        }

        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Look up the value stored under exactly `key`
    pub fn search(&self, key: &str) -> Option<&V> {
        if key.is_empty() {
            return None;
        }
        self.find_node(key)?.value.as_ref()
    }

    /// Whether `key` is stored
    pub fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Remove `key`, pruning branches left without keys
    ///
    /// A first read-only walk finds the deepest node on the path that must
    /// survive (the root, a terminal node, or a branching node). If the
    /// removed key has no descendants, the single edge below that node is cut;
    /// otherwise only the terminal value is cleared.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        let symbols: Vec<char> = key.chars().collect();

        let mut cut_depth = 0;
        let mut node = &self.root;
        for (depth, symbol) in symbols.iter().enumerate() {
            if node.value.is_some() || node.children.len() > 1 {
                cut_depth = depth;
            }
            node = node.children.get(symbol)?;
        }
        node.value.as_ref()?;
        let has_descendants = !node.children.is_empty();

        let removed = if has_descendants {
            let mut node = &mut self.root;
            for symbol in &symbols {
                node = node.children.get_mut(symbol)?;
            }
            node.value.take()
        } else {
            let mut node = &mut self.root;
            for symbol in &symbols[..cut_depth] {
                node = node.children.get_mut(symbol)?;
            }
            // Everything below the cut is a single chain ending at the key.
            let mut chain = node.children.remove(&symbols[cut_depth])?;
            for symbol in &symbols[cut_depth + 1..] {
                chain = chain.children.remove(symbol)?;
            }
            chain.value.take()
        };

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// All stored keys starting with `prefix`, sorted
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut keys = Vec::new();
        let mut stack = vec![(prefix.to_string(), start)];
        while let Some((path, node)) = stack.pop() {
            if node.value.is_some() && !path.is_empty() {
                keys.push(path.clone());
            }
            for (symbol, child) in &node.children {
                let mut child_path = path.clone();
                child_path.push(*symbol);
                stack.push((child_path, child));
            }
        }
        keys.sort();
        keys
    }

    /// Number of nodes below the root
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += node.children.len();
            stack.extend(node.children.values());
        }
        count
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    fn find_node(&self, key: &str) -> Option<&Node<V>> {
        let mut node = &self.root;
        for symbol in key.chars() {
            node = node.children.get(&symbol)?;
        }
        Some(node)
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for PrefixIndex<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for PrefixIndex<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
