//! Overlay rendering (error notification, result detail popup, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{SearchResult, SearchState, UiState};
use super::utils::format_price;

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        let popup_width = 52u16.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Lines the message takes when wrapped, for the popup height
        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
        let popup_height = 2 + error_line_count.max(1);

        let popup_area = centered_rect(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Whoops... (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_detail_popup(frame: &mut Frame, ui_state: &UiState, search_state: &SearchState) {
    let SearchState::Results(results) = search_state else {
        return;
    };
    let Some(result) = results.get(ui_state.selected_result) else {
        return;
    };

    let popup_area = centered_rect(frame.area(), 64, 10);
    frame.render_widget(Clear, popup_area);

    let lines = detail_lines(result);
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Details (Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(detail, popup_area);
}

fn detail_lines(result: &SearchResult) -> Vec<Line<'static>> {
    let artist = if result.artist().is_empty() {
        "Unknown"
    } else {
        result.artist()
    };

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(
                format!("{label:>8}  "),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    vec![
        Line::from(Span::styled(
            result.name().to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field("Artist", artist.to_string()),
        field("Type", result.display_type().to_string()),
        field("Genre", result.genre()),
        field("Price", format_price(result.price(), &result.currency)),
        field("Store", result.store_url().to_string()),
        field("Artwork", result.artwork_url().to_string()),
    ]
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Keybindings organized by category
    let keybindings = vec![
        ("", "── Search ──"),
        ("Enter", "Run the search"),
        ("Esc", "Clear the query"),
        ("← / →", "Switch category"),
        ("", ""),
        ("", "── Results ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open details"),
        ("Esc", "Back to search"),
        ("", ""),
        ("", "── General ──"),
        ("Tab", "Toggle section"),
        ("G", "Focus search"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(area, 48, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^40}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>12}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
