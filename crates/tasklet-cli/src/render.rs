use std::io::{self, IsTerminal, Write};

use chrono::Local;
use tasklet_core::{SessionView, Task, Theme, items_left_label};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")?.unwrap_or(true);
        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, out, view), fields(visible = view.visible.len()))]
    pub fn write_list<W: Write>(&self, out: &mut W, view: &SessionView) -> anyhow::Result<()> {
        if view.visible.is_empty() {
            writeln!(out, "No tasks")?;
        } else {
            let headers = vec![
                String::new(),
                "ID".to_string(),
                "Created".to_string(),
                "Task".to_string(),
            ];
            let rows = view.visible.iter().map(|task| self.row(task)).collect();
            write_table(&mut *out, headers, rows)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "{}, {} completed",
            items_left_label(view.active_count),
            view.completed_count
        )?;
        Ok(())
    }

    pub fn write_theme<W: Write>(&self, out: &mut W, theme: Theme) -> anyhow::Result<()> {
        writeln!(out, "theme: {theme}")?;
        Ok(())
    }

    fn row(&self, task: &Task) -> Vec<String> {
        let mark = if task.completed {
            self.paint("[x]", "32")
        } else {
            "[ ]".to_string()
        };
        let text = if task.completed {
            self.paint(&task.text, "2")
        } else {
            task.text.clone()
        };
        let created = task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();

        vec![mark, self.paint(short_id(&task.id), "33"), created, text]
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Tail of the id; the random part, so unique in practice.
pub fn short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(SHORT_ID_LEN);
    id.get(start..).unwrap_or(id)
}

fn write_table<W: Write>(mut writer: W, headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    for (idx, header) in headers.iter().enumerate() {
        write_cell(&mut writer, header, widths[idx], idx == last)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            write_cell(&mut writer, cell, widths[idx], idx == last)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_cell<W: Write>(writer: &mut W, cell: &str, width: usize, last: bool) -> anyhow::Result<()> {
    if last {
        write!(writer, "{cell}")?;
        return Ok(());
    }
    let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
    let padding = width.saturating_sub(visible_width);
    write!(writer, "{}{} ", cell, " ".repeat(padding))?;
    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{Renderer, short_id, strip_ansi, write_table};
    use crate::config::Config;

    fn renderer_with_color(value: &str) -> anyhow::Result<Renderer> {
        let mut cfg = Config::defaults();
        cfg.apply_overrides([("color".to_string(), value.to_string())]);
        Renderer::new(&cfg)
    }

    #[test]
    fn color_setting_uses_config_booleans() {
        assert!(renderer_with_color("y").unwrap().color);
        assert!(renderer_with_color("on").unwrap().color);
        assert!(!renderer_with_color("off").unwrap().color);
        assert!(!renderer_with_color("N").unwrap().color);

        let err = renderer_with_color("rainbow").unwrap_err();
        assert!(err.to_string().contains("invalid value for color"));
    }

    #[test]
    fn short_id_takes_tail() {
        assert_eq!(short_id("19c6a2b4e80-1a2b3c4d5e6f"), "3c4d5e6f");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn table_pads_by_display_width() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["日本".to_string(), "x".to_string()],
                vec!["\x1b[33mab\x1b[0m".to_string(), "y".to_string()],
            ],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A    B");
        assert_eq!(lines[1], "日本 x");
        assert_eq!(strip_ansi(lines[2]), "ab   y");
    }
}
