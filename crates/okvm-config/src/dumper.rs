//! Resolved tree rendering.
//!
//! Renders a `ConfigSection` as an annotated YAML listing: 4-space
//! indent, help text as a trailing comment, and for every value that
//! differs from its default a comment line showing that default right
//! above it. Values render as JSON scalars, so the output parses back
//! as a raw tree.

use crate::section::{ConfigEntry, ConfigSection};

/// Render a resolved tree as annotated YAML.
pub fn make_config_dump(config: &ConfigSection) -> String {
    let mut lines = Vec::new();
    for (index, (name, entry)) in config.entries().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        render_entry(&mut lines, config, name, entry, 0);
    }
    lines.join("\n")
}

fn render_entry(
    lines: &mut Vec<String>,
    parent: &ConfigSection,
    name: &str,
    entry: &ConfigEntry,
    depth: usize,
) {
    let indent = "    ".repeat(depth);
    match entry {
        ConfigEntry::Section(section) => {
            lines.push(format!("{indent}{name}:"));
            for (child_name, child) in section.entries() {
                render_entry(lines, section, child_name, child, depth + 1);
            }
        }
        ConfigEntry::Value(value) => {
            let suffix = match parent.meta(name) {
                Some(meta) if !meta.help.is_empty() => format!("  # {}", meta.help),
                _ => String::new(),
            };
            match parent.meta(name) {
                Some(meta) if *value != meta.default => {
                    lines.push(format!("{indent}# {name}: {}{suffix}", meta.default));
                    lines.push(format!("{indent}{name}: {value}"));
                }
                _ => lines.push(format!("{indent}{name}: {value}{suffix}")),
            }
        }
    }
}
