//! Result list rendering per search state

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, SearchResult, SearchState, UiState};
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    search_state: &SearchState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match search_state {
        SearchState::NotSearchedYet => {
            let hint = Paragraph::new(
                "Type a search term and press Enter\n\n\
                 Use ←/→ to pick a category\n\
                 Use ↑/↓ to select results, Enter to open details\n\
                 Press H for all keybindings",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
            frame.render_widget(hint, area);
        }
        SearchState::Loading => {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Results ")
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(loading, area);
        }
        SearchState::NoResults => {
            let nothing = Paragraph::new("(Nothing found)")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Results ")
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(nothing, area);
        }
        SearchState::Results(results) => {
            render_result_list(frame, area, results, ui_state.selected_result, is_focused);
        }
    }
}

fn render_result_list(
    frame: &mut Frame,
    area: Rect,
    results: &[SearchResult],
    selected_index: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let content_width = area.width.saturating_sub(4) as usize;
    let name_width = content_width / 2;

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let subtitle = if result.artist().is_empty() {
                "Unknown".to_string()
            } else {
                format!("{} ({})", result.artist(), result.display_type())
            };
            let text = format!(
                "{}  {}",
                truncate_string(result.name(), name_width),
                subtitle
            );

            let style = if i == selected_index && is_focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if i == selected_index {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", results.len()))
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, items, selected_index, block);
}
