//! Variable naming for generated scripts.

use ahash::{AHashMap, AHashSet};

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Names bound by the generated imports or used as builtins by generated code.
const RESERVED_NAMES: &[&str] = &[
    "pd",
    "os",
    "sqlalchemy",
    "pymysql",
    "gspread",
    "ServiceAccountCredentials",
    "print",
    "writer",
];

const FALLBACK_NAME: &str = "node";

/// Turns a free-form label into a Python identifier.
///
/// Runs of characters outside `[A-Za-z0-9]` collapse into a single `_`,
/// a leading digit gets a `_` prefix, and keywords or reserved names get a
/// `_` suffix.
pub fn sanitize_identifier(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    for c in label.trim().chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c);
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    let name = name.trim_matches('_');

    let mut name = if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.to_string()
    };
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if PYTHON_KEYWORDS.contains(&name.as_str()) || RESERVED_NAMES.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

/// Whether `name` can be written as-is as a Python name or keyword argument.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !PYTHON_KEYWORDS.contains(&name)
}

/// Assigns one unique variable per base name, in the given order.
///
/// Shorthand for [`assign_unique_with_helpers`] when no node derives helper names.
pub fn assign_unique(bases: &[String]) -> Vec<String> {
    assign_unique_with_helpers(bases, &[])
}

/// Assigns one unique variable per base name, in the given order.
///
/// `helpers[i]` lists the suffixes node `i` appends to its variable to form
/// helper names (`_Engine` gives `<var>_Engine`). Every assigned variable and
/// every helper name derived from it is distinct from all others.
///
/// A base used by exactly one node is kept as-is unless one of its helper
/// names is already claimed. Bases shared by several nodes get `_1`, `_2`, …
/// in order, skipping any candidate that clashes with a name already taken.
pub fn assign_unique_with_helpers(bases: &[String], helpers: &[&[&str]]) -> Vec<String> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for base in bases {
        *counts.entry(base.as_str()).or_default() += 1;
    }

    // Bases owned by a single node; no other node may take them.
    let claimed: AHashSet<&str> = bases
        .iter()
        .map(String::as_str)
        .filter(|b| counts.get(b) == Some(&1))
        .collect();
    let mut taken: AHashSet<String> = AHashSet::new();
    let mut next_suffix: AHashMap<&str, usize> = AHashMap::new();

    bases
        .iter()
        .enumerate()
        .map(|(index, base)| {
            let suffixes = helpers.get(index).copied().unwrap_or_default();
            let owns_base = counts.get(base.as_str()) == Some(&1);
            let is_free = |candidate: &str, own: bool| {
                !taken.contains(candidate) && (own || !claimed.contains(candidate))
            };

            let mut own = owns_base;
            let mut candidate = if owns_base {
                base.clone()
            } else {
                next_candidate(base, &mut next_suffix)
            };
            loop {
                let helpers_free = suffixes
                    .iter()
                    .all(|suffix| is_free(&format!("{}{}", candidate, suffix), false));
                if is_free(&candidate, own) && helpers_free {
                    break;
                }
                candidate = next_candidate(base, &mut next_suffix);
                own = false;
            }

            for suffix in suffixes {
                taken.insert(format!("{}{}", candidate, suffix));
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn next_candidate<'b>(base: &'b str, next_suffix: &mut AHashMap<&'b str, usize>) -> String {
    let suffix = next_suffix.entry(base).or_insert(0);
    *suffix += 1;
    format!("{}_{}", base, suffix)
}
