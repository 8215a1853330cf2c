//! Every `t!` call in the crate must name a message that exists in the
//! fallback locale, and must pass exactly the variables that message
//! interpolates. Locale-to-locale parity lives in `tests/i18n_missing_keys.rs`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_FTL: &str = include_str!("../../i18n/en-US/chartroom-ui.ftl");

/// One `t!("key", name = value, ..)` occurrence.
#[derive(Debug)]
struct Usage {
    file: PathBuf,
    key: String,
    args: BTreeSet<String>,
}

/// Message id → `$variables` referenced in its value (continuation lines
/// included).
fn ftl_placeables(content: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut messages = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            current = None;
            continue;
        }
        let continuation = line.starts_with(char::is_whitespace);
        let value = if continuation {
            trimmed
        } else {
            let Some((id, value)) = line.split_once('=') else {
                current = None;
                continue;
            };
            let id = id.trim();
            if id.starts_with('-') || !id.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-')) {
                current = None;
                continue;
            }
            messages.insert(id.to_string(), BTreeSet::new());
            current = Some(id.to_string());
            value
        };

        if let Some(vars) = current.as_ref().and_then(|id| messages.get_mut(id)) {
            vars.extend(variables_in(value));
        }
    }
    messages
}

fn variables_in(value: &str) -> Vec<String> {
    value
        .split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Splits the text after `t!(` into its top-level comma-separated
/// arguments, stopping at the closing paren. Quotes and nested parens are
/// respected.
fn macro_arguments(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            current.push(c);
            match (escaped, c) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' if depth == 0 => break,
            ')' | ']' | '}' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => args.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    args.push(current);
    args.into_iter()
        .map(|arg| arg.trim().to_string())
        .filter(|arg| !arg.is_empty())
        .collect()
}

fn usages_in(file: &Path, content: &str) -> Vec<Usage> {
    content
        .match_indices("t!(\"")
        // `format!("..")` and friends end in the same characters.
        .filter(|(pos, _)| {
            !content[..*pos].ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
        })
        .filter_map(|(pos, needle)| {
            let args = macro_arguments(&content[pos + needle.len() - 1..]);
            let (first, rest) = args.split_first()?;
            let key = first.trim_matches('"').to_string();
            let names = rest
                .iter()
                .filter_map(|arg| arg.split_once('='))
                .map(|(name, _)| name.trim().to_string())
                .collect();
            Some(Usage {
                file: file.to_path_buf(),
                key,
                args: names,
            })
        })
        .collect()
}

fn collect_usages(root: &Path) -> Vec<Usage> {
    let mut usages = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(path) = stack.pop() {
        if path.is_dir() {
            // Test modules quote the macro in fixtures.
            if path.file_name().and_then(|name| name.to_str()) == Some("tests") {
                continue;
            }
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                usages.extend(usages_in(&path, &content));
            }
        }
    }
    usages
}

#[test]
fn placeables_are_read_from_values_and_continuations() {
    let parsed = ftl_placeables(
        "# comment\nplain = Hello\ngreet = Hi { $name }\n    and { $other }\n-term = { $skip }\n",
    );
    assert_eq!(parsed["plain"], BTreeSet::new());
    assert_eq!(
        parsed["greet"],
        BTreeSet::from(["name".to_string(), "other".to_string()])
    );
    assert!(!parsed.contains_key("-term"));
}

#[test]
fn macro_arguments_respect_nested_commas() {
    let usages = usages_in(
        Path::new("inline.rs"),
        r#"let s = t!("filters-click", items = list.join(", "), extra = f(a, b)); format!("x{}", t!("nav-home"))"#,
    );
    assert_eq!(usages.len(), 2);
    assert_eq!(usages[0].key, "filters-click");
    assert_eq!(
        usages[0].args,
        BTreeSet::from(["items".to_string(), "extra".to_string()])
    );
    assert_eq!(usages[1].key, "nav-home");
    assert!(usages[1].args.is_empty());
}

#[test]
fn source_translations_match_fallback_messages() {
    let messages = ftl_placeables(FALLBACK_FTL);
    assert!(!messages.is_empty(), "fallback FTL has no messages");

    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let usages = collect_usages(&src_root);
    assert!(!usages.is_empty(), "no t! calls found under {src_root:?}");

    let mut problems = Vec::new();
    for usage in &usages {
        match messages.get(&usage.key) {
            None => problems.push(format!("{:?}: unknown key `{}`", usage.file, usage.key)),
            Some(expected) if *expected != usage.args => problems.push(format!(
                "{:?}: `{}` passes {:?} but the message uses {:?}",
                usage.file, usage.key, usage.args, expected
            )),
            Some(_) => {}
        }
    }
    assert!(problems.is_empty(), "translation mismatches:\n{}", problems.join("\n"));

    let used: BTreeSet<&str> = usages.iter().map(|usage| usage.key.as_str()).collect();
    let unused: Vec<&str> = messages
        .keys()
        .map(String::as_str)
        .filter(|key| !used.contains(key))
        .collect();
    if !unused.is_empty() {
        eprintln!("[i18n] fallback messages not referenced from src: {}", unused.join(", "));
    }
}
