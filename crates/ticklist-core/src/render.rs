use std::io::{self, IsTerminal, Write};

use ticklist_model::Theme;
use ticklist_model::view::{Badge, DetailView, SidebarView, TaskEditor, TaskListView, ViewModel};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

/// Characters of a task id shown in tables; any unique prefix is accepted
/// back on the command line.
pub const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, view))]
    pub fn print_view(&self, view: &ViewModel) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_view(&mut out, view)
    }

    pub fn print_theme(&self, theme: Theme) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "theme     {}", theme.storage_value())?;
        Ok(())
    }

    pub fn write_view<W: Write>(&self, mut out: W, view: &ViewModel) -> anyhow::Result<()> {
        self.write_sidebar(&mut out, &view.sidebar)?;
        writeln!(out)?;
        self.write_task_list(&mut out, &view.task_list)?;
        writeln!(out)?;
        self.write_detail(&mut out, &view.detail)?;
        Ok(())
    }

    fn write_sidebar<W: Write>(&self, mut out: W, sidebar: &SidebarView) -> anyhow::Result<()> {
        let marker = |active: bool| if active { "*" } else { " " };

        writeln!(
            out,
            "{} Today {}   {} Upcoming {}",
            marker(sidebar.today_active),
            self.paint(&sidebar.today_count.to_string(), "33"),
            marker(sidebar.upcoming_active),
            self.paint(&sidebar.upcoming_count.to_string(), "33"),
        )?;

        let rows = sidebar
            .lists
            .iter()
            .map(|entry| {
                vec![
                    format!("{} {}", marker(entry.active), self.dot(&entry.color)),
                    entry.name.clone(),
                    entry.count.to_string(),
                    self.paint(&entry.id, "2"),
                ]
            })
            .collect();
        writeln!(out, "Lists")?;
        write_table(&mut out, None, rows)?;

        let pills = sidebar
            .tags
            .iter()
            .map(|pill| format!("[{}]", pill.text))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "Tags      {pills}")?;
        Ok(())
    }

    fn write_task_list<W: Write>(&self, mut out: W, list: &TaskListView) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} ({})",
            self.paint(&list.title, "1"),
            list.count
        )?;

        if let Some(message) = list.empty_message {
            writeln!(out, "{message}")?;
            return Ok(());
        }

        let headers = vec![
            " ".to_string(),
            "ID".to_string(),
            "Done".to_string(),
            "Title".to_string(),
            "Details".to_string(),
        ];
        let rows = list
            .rows
            .iter()
            .map(|row| {
                let title = if row.completed {
                    self.paint(&row.title, "9")
                } else {
                    row.title.clone()
                };
                let badges = row
                    .badges
                    .iter()
                    .map(|badge| self.badge(badge))
                    .collect::<Vec<_>>()
                    .join("  ");
                vec![
                    String::from(if row.selected { ">" } else { " " }),
                    self.paint(short_id(&row.id), "33"),
                    String::from(if row.completed { "[x]" } else { "[ ]" }),
                    title,
                    badges,
                ]
            })
            .collect();

        write_table(&mut out, Some(headers), rows)
    }

    fn write_detail<W: Write>(&self, mut out: W, detail: &DetailView) -> anyhow::Result<()> {
        match detail {
            DetailView::Placeholder(text) => {
                writeln!(out, "{}", self.paint(text, "2"))?;
            }
            DetailView::Editor(editor) => self.write_editor(&mut out, editor)?,
        }
        Ok(())
    }

    fn write_editor<W: Write>(&self, mut out: W, editor: &TaskEditor) -> anyhow::Result<()> {
        let list = editor
            .list_options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.name.as_str())
            .unwrap_or("None");
        let tags = editor
            .tags
            .iter()
            .map(|pill| pill.text.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(out, "Task:")?;
        writeln!(out, "id        {}", editor.task_id)?;
        writeln!(out, "title     {}", editor.title)?;
        writeln!(out, "desc      {}", editor.description)?;
        writeln!(out, "list      {list}")?;
        writeln!(out, "due       {}", editor.due)?;
        writeln!(out, "tags      {tags}")?;
        if !editor.addable_tags.is_empty() {
            writeln!(out, "addable   {}", editor.addable_tags.join(", "))?;
        }

        writeln!(out, "Subtasks:")?;
        for subtask in &editor.subtasks {
            let check = if subtask.done { "[x]" } else { "[ ]" };
            writeln!(out, "  {:>2} {check} {}", subtask.index, subtask.text)?;
        }
        Ok(())
    }

    fn badge(&self, badge: &Badge) -> String {
        match badge {
            Badge::List { color, .. } => format!("{} {}", self.dot(color), badge.label()),
            _ => badge.label(),
        }
    }

    fn dot(&self, hex: &str) -> String {
        match hex_to_ansi(hex) {
            Some(code) => self.paint("●", &code),
            None => "●".to_string(),
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

pub fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(idx, _)| &id[..idx])
}

/// `#rrggbb` to a 24-bit foreground escape code.
fn hex_to_ansi(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);
    Some(format!("38;2;{r};{g};{b}"))
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers
        .as_ref()
        .map(Vec::len)
        .or_else(|| rows.first().map(Vec::len))
        .unwrap_or(0);
    let mut widths = vec![0usize; column_count];

    if let Some(headers) = &headers {
        for (idx, header) in headers.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
        }
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    if let Some(headers) = &headers {
        for idx in 0..column_count {
            write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
        }
        writeln!(writer)?;

        for width in &widths {
            write!(writer, "{:-<width$} ", "", width = *width)?;
        }
        writeln!(writer)?;
    }

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

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
