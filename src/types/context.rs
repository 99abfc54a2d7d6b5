use std::collections::HashMap;

use super::Value;

/// Pass-through fields that travel with a validation request.
///
/// Keys are dot-separated paths like `"user.password"`. The context is handed to
/// every rule in the chain and echoed back unchanged in the outcome, so rules can
/// compare against sibling fields and callers can correlate results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: HashMap<String, Entry>,
}

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Leaf(Value),
    Branch(HashMap<String, Entry>),
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value at a dot-separated path, creating intermediate branches.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert a value at a dot-separated path. A leaf sitting where a branch is
    /// needed gets replaced by that branch.
    pub fn insert(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        insert_at(&mut self.entries, &segments, value);
    }

    /// Look up the leaf value at a dot-separated path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        get_at(&self.entries, &segments)
    }

    /// The value at `path`, or [`Value::Null`] when nothing is stored there.
    #[must_use]
    pub fn value_of(&self, path: &str) -> Value {
        self.get(path).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a context from a JSON object, flattening nested objects into paths.
    #[cfg(feature = "serde")]
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        fn walk(ctx: &mut Context, prefix: &str, json: &serde_json::Value) {
            match json {
                serde_json::Value::Object(map) => {
                    for (key, inner) in map {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(ctx, &path, inner);
                    }
                }
                leaf if !prefix.is_empty() => ctx.insert(prefix, Value::from(leaf.clone())),
                _ => {}
            }
        }
        let mut ctx = Context::new();
        walk(&mut ctx, "", json);
        ctx
    }
}

fn insert_at(map: &mut HashMap<String, Entry>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_owned(), Entry::Leaf(value));
        }
        [first, rest @ ..] => {
            let entry = map
                .entry((*first).to_owned())
                .or_insert_with(|| Entry::Branch(HashMap::new()));
            if matches!(*entry, Entry::Leaf(_)) {
                *entry = Entry::Branch(HashMap::new());
            }
            if let Entry::Branch(branch) = entry {
                insert_at(branch, rest, value);
            }
        }
    }
}

fn get_at<'a>(map: &'a HashMap<String, Entry>, segments: &[&str]) -> Option<&'a Value> {
    match segments {
        [] => None,
        [last] => match map.get(*last)? {
            Entry::Leaf(v) => Some(v),
            Entry::Branch(_) => None,
        },
        [first, rest @ ..] => match map.get(*first)? {
            Entry::Branch(branch) => get_at(branch, rest),
            Entry::Leaf(_) => None,
        },
    }
}
