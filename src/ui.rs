use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    app::{App, Focus},
    chat::{ChatLog, Sender},
    presets::hotkey_label,
    theme::Theme,
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn draw_ui(frame: &mut Frame, app: &App, tick: usize) {
    let theme = *app.theme();
    frame.render_widget(Block::default().style(theme.base()), frame.size());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(frame, rows[0], app, &theme);
    draw_chat(frame, rows[1], app, &theme);
    draw_presets(frame, rows[2], app, &theme);
    draw_input(frame, rows[3], app, &theme, tick);
    draw_config(frame, rows[4], app, &theme);
    draw_help(frame, rows[5], &theme);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let dot_color = if app.config().is_configured() {
        theme.connected
    } else {
        theme.disconnected
    };
    let line = Line::from(vec![
        Span::styled(
            "Personal AI Assistant",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("●", Style::default().fg(dot_color)),
        Span::raw(" "),
        Span::styled(app.status().text(), Style::default().fg(theme.foreground)),
        Span::raw("   "),
        Span::styled(app.endpoint_url.as_str(), Style::default().fg(theme.muted)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(false))
        .title(Line::from(vec![
            Span::raw(" "),
            Span::raw(theme.toggle_glyph()),
            Span::styled(" ^T ", Style::default().fg(theme.muted)),
        ]))
        .style(theme.base());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn chat_text<'a>(log: &'a ChatLog, theme: &Theme) -> Text<'a> {
    let mut text = Text::default();
    for e in log.entries() {
        let who = match e.sender {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
            Sender::System => "System",
        };
        text.push_line(Line::from(vec![
            Span::styled(who, theme.sender_style(e.sender)),
            Span::styled(
                format!("  {}", e.at.format("%H:%M")),
                Style::default().fg(theme.muted),
            ),
        ]));
        if e.text.is_empty() {
            text.push_line(Line::from(""));
        }
        for line in e.text.lines() {
            text.push_line(Line::styled(line, Style::default().fg(theme.foreground)));
        }
        text.push_line(Line::from(""));
    }
    text
}

/// Rows `text` occupies once wrapped to `width` columns.
fn wrapped_height(text: &Text, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_chat(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let text = chat_text(&app.chat, theme);
    let inner_w = area.width.saturating_sub(2);
    let inner_h = area.height.saturating_sub(2);
    let total = wrapped_height(&text, inner_w);
    let scroll_y = total.saturating_sub(inner_h).saturating_sub(app.chat_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(false))
        .title(Span::styled("Chat", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
        .style(theme.base());
    let chat = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_y, 0));
    frame.render_widget(chat, area);
}

fn draw_presets(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Presets;
    let mut spans = Vec::new();
    for (i, p) in app.presets().iter().enumerate() {
        let mut style = Style::default().fg(theme.foreground);
        if focused && i == app.preset_idx {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if let Some(k) = hotkey_label(i) {
            spans.push(Span::styled(format!("{} ", k), Style::default().fg(theme.muted)));
        }
        spans.push(Span::styled(format!("[{}]", p.label), style));
        spans.push(Span::raw("  "));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title("Quick actions")
        .style(theme.base());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, tick: usize) {
    let enabled = app.controls_enabled();
    let focused = app.input_focused() && enabled;

    let send = if enabled {
        Span::styled(" Enter ➤ ", Style::default().fg(theme.accent))
    } else {
        Span::styled(
            format!(" {} ", SPINNER[tick % SPINNER.len()]),
            Style::default().fg(theme.accent),
        )
    };
    let title = Line::from(vec![Span::raw("Message "), send]);
    let body_style = if enabled {
        Style::default().fg(theme.foreground)
    } else {
        theme.disabled()
    };
    let body = if app.input.is_empty() && enabled {
        Line::styled("What do you want me to do?", Style::default().fg(theme.muted))
    } else {
        Line::styled(app.input.as_str(), body_style)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(title)
        .style(theme.base());
    frame.render_widget(Paragraph::new(body).block(block), area);

    if focused {
        let x = area.x + 1 + u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        frame.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
    }
}

fn draw_config(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::KeyField;
    let masked: String = "•".repeat(app.key_field.chars().count());
    let line = Line::from(vec![
        Span::styled(masked, Style::default().fg(theme.foreground)),
        Span::styled(
            if focused { "   Enter to save" } else { "" },
            Style::default().fg(theme.muted),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title("DeepSeek API key")
        .style(theme.base());
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        let x = area.x + 1 + u16::try_from(app.key_field.chars().count()).unwrap_or(u16::MAX);
        frame.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
    }
}

fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let help = "Enter=send  Tab=focus  ^S=save key  ^T=theme  F1-F3=quick actions  PgUp/PgDn=scroll  Esc=quit";
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(theme.muted).bg(theme.background)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_height_splits_long_lines() {
        let text = Text::from(vec![Line::from("abcdefghij"), Line::from("")]);
        assert_eq!(wrapped_height(&text, 4), 3 + 1);
        assert_eq!(wrapped_height(&text, 20), 2);
    }

    #[test]
    fn chat_text_has_header_body_spacer() {
        let mut log = ChatLog::new();
        log.push(Sender::User, "a\nb");
        let text = chat_text(&log, &Theme::for_mode(false));
        assert_eq!(text.lines.len(), 4);
    }
}
