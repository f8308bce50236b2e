//! Modal text prompt for task labels and lane names.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;
use crate::state::Prompt;

/// Preferred width of the prompt box.
const PROMPT_WIDTH: u16 = 44;

/// Input row, blank row and hint row plus the border.
const PROMPT_HEIGHT: u16 = 5;

/// Renders the prompt centered over `area`.
///
/// Long input is shown by its tail so the cursor stays visible.
pub fn render_prompt(prompt: &Prompt, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(
            prompt.title(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let room = usize::from(block.inner(popup).width.saturating_sub(3));
    let skip = prompt.input.chars().count().saturating_sub(room);
    let visible: String = prompt.input.chars().skip(skip).collect();

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(visible),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            prompt.hint(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    Paragraph::new(lines).block(block).render(popup, buf);
}
