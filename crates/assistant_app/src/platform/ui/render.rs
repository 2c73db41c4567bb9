use assistant_core::{AppViewModel, MessageView, Origin, TablePreview};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use super::constants::*;
use super::layout::{self, ScreenLayout};
use super::{Hitboxes, UiState};

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &mut UiState) {
    let regions: ScreenLayout = layout::compute(frame.area(), view);

    frame.render_widget(
        Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        regions.title,
    );

    let drop_style = drop_zone_style(view.drag_active);
    frame.render_widget(
        Paragraph::new(DROP_ZONE_TEXT)
            .alignment(Alignment::Center)
            .style(drop_style)
            .block(Block::bordered().border_style(drop_style)),
        regions.drop_zone,
    );

    let mut preview_button = None;
    if let (Some(row), Some(label)) = (regions.file_actions, view.preview_label) {
        let (name_area, button_area) = layout::file_actions(row, label);
        let name = view.file_name.as_deref().unwrap_or_default();
        frame.render_widget(Paragraph::new(format!(" File: {name}")), name_area);
        frame.render_widget(
            Paragraph::new(format!("[ {label} ]"))
                .alignment(Alignment::Center)
                .style(button_style()),
            button_area,
        );
        preview_button = Some(button_area);
    }

    if let (Some(area), Some(preview)) = (regions.preview, view.preview.as_ref()) {
        render_preview(frame, area, preview);
    }

    render_transcript(frame, regions.transcript, &view.transcript, ui);
    render_input(frame, &regions, view, ui);

    let status = ui.status.as_deref().unwrap_or(KEY_HINTS);
    frame.render_widget(
        Paragraph::new(status).style(placeholder_style()),
        regions.status,
    );

    ui.hitboxes = Hitboxes {
        drop_zone: regions.drop_zone,
        send_button: regions.send_button,
        preview_button,
    };
}

fn render_preview(frame: &mut Frame, area: Rect, preview: &TablePreview) {
    let header = Row::new(preview.headers.iter().map(String::as_str))
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
    let rows = preview
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(String::as_str)));
    let widths = vec![Constraint::Fill(1); preview.headers.len().max(1)];
    let title = format!(" Preview ({} rows) ", preview.rows.len());
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title(title)),
        area,
    );
}

fn render_transcript(frame: &mut Frame, area: Rect, messages: &[MessageView], ui: &mut UiState) {
    let block = Block::bordered();
    let inner = block.inner(area);
    let lines = transcript_lines(messages, inner.width);
    let offset = ui.scroll.resolve(lines.len(), inner.height);
    frame.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), area);
}

fn render_input(frame: &mut Frame, regions: &ScreenLayout, view: &AppViewModel, ui: &UiState) {
    let (title, text, placeholder) = match &ui.picker {
        Some(path) => (PICKER_TITLE, path.as_str(), ""),
        None => (INPUT_TITLE, view.draft.as_str(), INPUT_PLACEHOLDER),
    };
    let block = Block::bordered().title(title);
    let inner = block.inner(regions.input);
    let paragraph = if text.is_empty() {
        Paragraph::new(Span::styled(placeholder, placeholder_style()))
    } else {
        // Keep the tail visible when the text is wider than the box.
        Paragraph::new(tail_fitting(text, inner.width.saturating_sub(1)))
    };
    frame.render_widget(paragraph.block(block), regions.input);

    let cursor_x = inner.x + display_width(&tail_fitting(text, inner.width.saturating_sub(1)));
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));

    frame.render_widget(
        Paragraph::new(format!("[ {SEND_LABEL} ]"))
            .alignment(Alignment::Center)
            .style(button_style())
            .block(Block::bordered()),
        regions.send_button,
    );
}

/// Pre-wrapped transcript lines, so the line count matches what is drawn.
pub fn transcript_lines(messages: &[MessageView], width: u16) -> Vec<Line<'static>> {
    let text_width = width.saturating_sub(2).max(1) as usize;
    let mut lines = Vec::new();
    for message in messages {
        let (label, style) = match message.origin {
            Origin::User => (USER_LABEL, user_style()),
            Origin::Bot => (BOT_LABEL, bot_style()),
        };
        lines.push(Line::from(Span::styled(label, style)));
        for source_line in message.text.split('\n') {
            for wrapped in wrap_text(source_line, text_width) {
                lines.push(Line::from(format!("  {wrapped}")));
            }
        }
        lines.push(Line::default());
    }
    lines
}

/// Hard-wraps on display width. Always yields at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    lines.push(current);
    lines
}

fn display_width(text: &str) -> u16 {
    text.chars()
        .map(|ch| ch.width().unwrap_or(0))
        .sum::<usize>()
        .min(u16::MAX as usize) as u16
}

fn tail_fitting(text: &str, width: u16) -> String {
    let width = width as usize;
    let mut taken = Vec::new();
    let mut used = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        taken.push(ch);
    }
    taken.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use assistant_core::{update, AppState, Msg, SelectedFile};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::platform::ui::UiState;

    fn draw(view: &AppViewModel, ui: &mut UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, view, ui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn initial_screen_shows_greeting_drop_zone_and_placeholder() {
        let mut ui = UiState::default();
        let screen = draw(&AppState::new().view(), &mut ui);
        assert!(screen.contains(TITLE));
        assert!(screen.contains(DROP_ZONE_TEXT));
        assert!(screen.contains("Hi! How can I help you?"));
        assert!(screen.contains(INPUT_PLACEHOLDER));
        assert!(!screen.contains("Preview CSV"));
        assert!(ui.hitboxes.preview_button.is_none());
    }

    #[test]
    fn selected_file_shows_preview_button_and_table() {
        let (state, _) = update(
            AppState::new(),
            Msg::FileSelected(SelectedFile::new("people.csv", "name,age\nAda,36\n")),
        );
        let mut ui = UiState::default();
        let screen = draw(&state.view(), &mut ui);
        assert!(screen.contains("people.csv"));
        assert!(screen.contains("[ Preview CSV ]"));
        assert!(ui.hitboxes.preview_button.is_some());

        let (state, _) = update(state, Msg::PreviewToggled);
        let screen = draw(&state.view(), &mut ui);
        assert!(screen.contains("[ Hide Preview ]"));
        assert!(screen.contains("Ada"));
        assert!(screen.contains("36"));
    }

    #[test]
    fn picker_replaces_message_box() {
        let mut ui = UiState {
            picker: Some("/tmp/data.csv".to_string()),
            ..UiState::default()
        };
        let screen = draw(&AppState::new().view(), &mut ui);
        assert!(screen.contains("/tmp/data.csv"));
        assert!(!screen.contains(INPUT_PLACEHOLDER));
    }

    #[test]
    fn transcript_lines_label_each_message() {
        let (state, _) = update(AppState::new(), Msg::DraftChanged("hello".to_string()));
        let (state, _) = update(state, Msg::SendClicked);
        let (state, _) = update(
            state,
            Msg::QueryResolved {
                request_id: 1,
                result: Ok("line one\nline two".to_string()),
            },
        );
        let lines = transcript_lines(&state.view().transcript, 40);
        let texts: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert_eq!(
            texts,
            vec![
                "Bot",
                "  Hi! How can I help you?",
                "",
                "You",
                "  hello",
                "",
                "Bot",
                "  line one",
                "  line two",
                "",
            ]
        );
    }

    #[test]
    fn wrap_text_respects_width() {
        assert_eq!(wrap_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(wrap_text("", 3), vec![""]);
        assert_eq!(wrap_text("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn tail_fitting_keeps_end_of_long_drafts() {
        assert_eq!(tail_fitting("hello world", 5), "world");
        assert_eq!(tail_fitting("hi", 5), "hi");
    }
}
