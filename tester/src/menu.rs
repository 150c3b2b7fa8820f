//! Interactive package selection.
//!
//! The "All packages" sentinel and the package entries live in one ordered
//! list owned here; callers only see a [`Selection`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::core::merge::PackageRegistry;
use crate::io::scanner::is_self_declaring;

/// What the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Package(String),
}

/// One menu line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    All,
    Package {
        name: String,
        version: String,
        self_declaring: bool,
    },
}

impl MenuChoice {
    fn label(&self, index: usize) -> String {
        match self {
            MenuChoice::All => "All packages".to_string(),
            MenuChoice::Package {
                name,
                version,
                self_declaring,
            } => {
                let flag = if *self_declaring {
                    " [package-tester.json]"
                } else {
                    ""
                };
                format!("{index}. {name} ({version}){flag}")
            }
        }
    }
}

/// Menu choices in display order: the sentinel first, then registry order.
pub fn menu_choices(registry: &PackageRegistry) -> Vec<MenuChoice> {
    std::iter::once(MenuChoice::All)
        .chain(registry.iter().map(|package| MenuChoice::Package {
            name: package.name.clone(),
            version: package.version.clone(),
            self_declaring: is_self_declaring(package),
        }))
        .collect()
}

/// Parse a typed selection; anything unusable means 0.
///
/// Eastern Arabic-Indic and Arabic-Indic digits are accepted.
pub fn parse_selection(input: &str) -> i64 {
    let normalized: String = input.trim().chars().map(normalize_digit).collect();
    let digits = normalized.strip_prefix('-').unwrap_or(normalized.as_str());
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    normalized.parse().unwrap_or(0)
}

fn normalize_digit(c: char) -> char {
    match c {
        '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
        '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
        other => other,
    }
}

/// Map a parsed index onto the choices; out of range falls back to "All".
pub fn resolve_selection(choices: &[MenuChoice], index: i64) -> Selection {
    let choice = usize::try_from(index).ok().and_then(|idx| choices.get(idx));
    match choice {
        Some(MenuChoice::Package { name, .. }) => Selection::Package(name.clone()),
        Some(MenuChoice::All) | None => Selection::All,
    }
}

/// Print the menu to `out`, read one line from `input`, and resolve it.
pub fn prompt<R: BufRead, W: Write>(
    registry: &PackageRegistry,
    self_declaring: &[String],
    input: &mut R,
    out: &mut W,
) -> Result<Selection> {
    if !self_declaring.is_empty() {
        writeln!(out, "Packages with package-tester.json:")?;
        for name in self_declaring {
            writeln!(out, " - {name}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Available packages:")?;
    writeln!(out)?;
    let choices = menu_choices(registry);
    for (index, choice) in choices.iter().enumerate() {
        writeln!(out, " [{index}] {}", choice.label(index))?;
    }
    writeln!(out)?;
    write!(out, "Select a package to test [0]: ")?;
    out.flush().context("flush prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("read selection")?;
    Ok(resolve_selection(&choices, parse_selection(&line)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::core::merge::build_registry;
    use crate::core::types::PackageDescriptor;

    fn registry() -> PackageRegistry {
        build_registry(
            vec![
                PackageDescriptor::new("acme/flow"),
                PackageDescriptor {
                    version: "2.1.0".to_string(),
                    ..PackageDescriptor::new("acme/queue")
                },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn parses_ascii_and_persian_digits() {
        assert_eq!(parse_selection(" 2 \n"), 2);
        assert_eq!(parse_selection("۲"), 2);
        assert_eq!(parse_selection("١٠"), 10);
        assert_eq!(parse_selection("-1"), -1);
    }

    #[test]
    fn garbage_selects_zero() {
        assert_eq!(parse_selection(""), 0);
        assert_eq!(parse_selection("two"), 0);
        assert_eq!(parse_selection("1.5"), 0);
        assert_eq!(parse_selection("-"), 0);
    }

    #[test]
    fn out_of_range_falls_back_to_all() {
        let choices = menu_choices(&registry());
        assert_eq!(resolve_selection(&choices, 0), Selection::All);
        assert_eq!(
            resolve_selection(&choices, 2),
            Selection::Package("acme/queue".to_string())
        );
        assert_eq!(resolve_selection(&choices, 3), Selection::All);
        assert_eq!(resolve_selection(&choices, -1), Selection::All);
    }

    #[test]
    fn prompt_renders_and_reads_choice() {
        let mut input = Cursor::new("1\n");
        let mut out = Vec::new();
        let selection = prompt(&registry(), &["acme/flow".to_string()], &mut input, &mut out)
            .expect("prompt");
        assert_eq!(selection, Selection::Package("acme/flow".to_string()));

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Packages with package-tester.json:\n - acme/flow"));
        assert!(text.contains(" [0] All packages"));
        assert!(text.contains(" [1] 1. acme/flow (N/A)"));
        assert!(text.contains(" [2] 2. acme/queue (2.1.0)"));
    }

    #[test]
    fn empty_input_selects_all() {
        let mut input = Cursor::new("");
        let selection =
            prompt(&registry(), &[], &mut input, &mut std::io::sink()).expect("prompt");
        assert_eq!(selection, Selection::All);
    }
}
