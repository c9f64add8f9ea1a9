use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let engine = app.session.engine();
        let pose = engine.camera().pose();

        let (mode_str, mode_color) = if engine.is_settled() {
            ("SETTLED", theme.fg0)
        } else {
            ("MOVING", theme.moving)
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} ", msg),
            None => format!(
                " Frame {}/{} | x:{:.0} y:{:.0} scale:{:.2} ",
                engine.current_key() + 1,
                engine.frame_count(),
                pose.x,
                pose.y,
                pose.scale
            ),
        };

        let text_color = match &app.status_message {
            Some(msg) if msg.starts_with("Error") => theme.error,
            _ => theme.fg0,
        };

        let help_hint = app.keymap.help_hint();
        let used = mode_str.len() + 2 + status_text.len() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", mode_str),
                Style::default().fg(theme.bg0).bg(mode_color),
            ),
            Span::styled(status_text, Style::default().fg(text_color).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
