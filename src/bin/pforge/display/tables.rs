use std::io::Write;

use crate::util::text::{truncate, wrap};

const INDENT: &str = "   ";

const BOX_INNER_WIDTH: usize = 62;
const KEY_WIDTH: usize = 18;
const VALUE_WIDTH: usize = BOX_INNER_WIDTH - KEY_WIDTH - 5;

/// Two-column table of attribute names and rendered values.
pub fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let k_line = "─".repeat(KEY_WIDTH + 2);
    let v_line = "─".repeat(VALUE_WIDTH + 2);

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, BOX_INNER_WIDTH - 6));
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");
    let _ = writeln!(
        out,
        "{INDENT}│ {:<KEY_WIDTH$} │ {:<VALUE_WIDTH$} │",
        "Attribute", "Value"
    );
    let _ = writeln!(out, "{INDENT}├{k_line}┼{v_line}┤");

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<KEY_WIDTH$} │ {:<VALUE_WIDTH$} │",
            truncate(key, KEY_WIDTH),
            truncate(val, VALUE_WIDTH)
        );
    }

    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
}

/// Boxed bullet list; long items wrap inside the box. Nothing is printed
/// for an empty list.
pub fn print_list(out: &mut impl Write, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    let line = "─".repeat(BOX_INNER_WIDTH);
    let text_w = BOX_INNER_WIDTH - 4;

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, BOX_INNER_WIDTH - 6));
    let _ = writeln!(out, "{INDENT}┌{line}┐");
    for item in items {
        let wrapped = wrap(item, text_w);
        if let Some((first, rest)) = wrapped.split_first() {
            let _ = writeln!(out, "{INDENT}│ • {:<text_w$} │", first);
            for cont in rest {
                let _ = writeln!(out, "{INDENT}│   {:<text_w$} │", cont);
            }
        }
    }
    let _ = writeln!(out, "{INDENT}└{line}┘");
}
