//! Hygiene checks over the production sources in `src/`.
//!
//! Each rule names a pattern and the files allowed to contain it, with a
//! per-file ceiling. Anything else is a failure. Library code propagates
//! errors as `SynopticError`; only the binary prints, and only the
//! environment layer in `config.rs` turns a parse failure into "unset".

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    /// `(path suffix, max occurrences)` exemptions.
    allowed: &'static [(&'static str, usize)],
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", allowed: &[] },
    Rule { pattern: ".expect(", allowed: &[] },
    Rule { pattern: "panic!(", allowed: &[] },
    Rule { pattern: "unreachable!(", allowed: &[] },
    Rule { pattern: "todo!(", allowed: &[] },
    Rule { pattern: "unimplemented!(", allowed: &[] },
    Rule { pattern: "let _ =", allowed: &[] },
    Rule { pattern: "#[allow(dead_code)]", allowed: &[] },
    Rule { pattern: "std::process::exit", allowed: &[] },
    // `env_parse`: an unset or malformed SYNOPTIC_* variable keeps the file value.
    Rule { pattern: ".ok()", allowed: &[("config.rs", 2)] },
    // `render` and `status-chart` print SVG to stdout; `groups` lists closures.
    Rule { pattern: "print!(", allowed: &[("main.rs", 1)] },
    Rule { pattern: "println!(", allowed: &[("main.rs", 2)] },
    Rule { pattern: "eprintln!(", allowed: &[("main.rs", 2)] },
];

/// Production `.rs` files under `src/`; `*_test.rs` siblings are skipped.
fn source_files(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            source_files(&path, out);
            continue;
        }
        let is_source = path.extension().is_some_and(|e| e == "rs")
            && !path.to_string_lossy().ends_with("_test.rs");
        if !is_source {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((path, content));
        }
    }
}

/// Occurrences of `pattern` on code lines. Comment lines are ignored so docs
/// can name the patterns they avoid.
fn occurrences(content: &str, pattern: &str) -> usize {
    content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.starts_with("//"))
        .map(|line| line.matches(pattern).count())
        .sum()
}

/// `print!(` is a substring of `eprint!(`; count whole macro names only.
fn macro_occurrences(content: &str, pattern: &str) -> usize {
    let total = occurrences(content, pattern);
    let prefixed = occurrences(content, &format!("e{pattern}"));
    if pattern.ends_with("!(") && !pattern.starts_with('e') { total - prefixed } else { total }
}

#[test]
fn sources_were_found() {
    let mut files = Vec::new();
    source_files(Path::new("src"), &mut files);
    assert!(files.iter().any(|(p, _)| p.ends_with("lib.rs")));
    assert!(files.iter().any(|(p, _)| p.ends_with("main.rs")));
    assert!(!files.iter().any(|(p, _)| p.to_string_lossy().ends_with("_test.rs")));
}

#[test]
fn every_rule_within_its_allowance() {
    let mut files = Vec::new();
    source_files(Path::new("src"), &mut files);

    let mut violations = Vec::new();
    for rule in RULES {
        for (path, content) in &files {
            let found = macro_occurrences(content, rule.pattern);
            let allowed = rule
                .allowed
                .iter()
                .find(|(suffix, _)| path.ends_with(suffix))
                .map_or(0, |(_, max)| *max);
            if found > allowed {
                violations.push(format!("  {}: `{}` x{found} (allowed {allowed})", path.display(), rule.pattern));
            }
        }
    }
    assert!(violations.is_empty(), "hygiene violations:\n{}", violations.join("\n"));
}

#[test]
fn print_counting_skips_eprint() {
    let text = "eprintln!(\"a\");\nprintln!(\"b\");\n// println!(\"c\")\n";
    assert_eq!(macro_occurrences(text, "println!("), 1);
    assert_eq!(macro_occurrences(text, "eprintln!("), 1);
}
