// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Progression display widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::quiz::{Outcome, QuizSession};

/// Width of one numeral cell
const CELL_WIDTH: u16 = 8;

/// Row of numerals, with resolved chords underneath when revealed
pub struct ProgressionWidget<'a> {
    session: &'a QuizSession,
    revealed: bool,
    block: Option<Block<'a>>,
}

impl<'a> ProgressionWidget<'a> {
    /// Create a new progression widget
    pub fn new(session: &'a QuizSession) -> Self {
        Self {
            session,
            revealed: false,
            block: None,
        }
    }

    /// Show the resolved chords
    pub fn revealed(mut self, revealed: bool) -> Self {
        self.revealed = revealed;
        self
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn numeral_style(&self, index: usize) -> Style {
        let current = self.session.current_question().map(|(i, _)| i);
        match self.session.answers().get(index).map(|a| a.outcome) {
            Some(Outcome::Correct) => Style::default().fg(Color::Green),
            Some(Outcome::Incorrect { .. }) => Style::default().fg(Color::Red),
            Some(Outcome::TimedOut { .. }) => Style::default().fg(Color::DarkGray),
            None if current == Some(index) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            None => Style::default().fg(Color::White),
        }
    }
}

impl Widget for ProgressionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block.clone() {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let questions = self.session.questions();
        if questions.is_empty() {
            Paragraph::new("Empty progression")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let constraints: Vec<Constraint> = questions
            .iter()
            .map(|_| Constraint::Length(CELL_WIDTH))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let show_chords = self.revealed || self.session.is_submitted();
        for (i, question) in questions.iter().enumerate() {
            let mut lines = vec![Line::styled(
                format!(" {:^5} ", question.numeral.symbol()),
                self.numeral_style(i),
            )];
            if show_chords {
                lines.push(Line::styled(
                    format!(" {:^5} ", question.answer),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Paragraph::new(lines).render(cells[i], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{KeyName, Numeral};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn session() -> QuizSession {
        QuizSession::new(
            0,
            KeyName::G,
            vec![Numeral::Tonic, Numeral::LeadingTone],
            None,
            &mut StdRng::seed_from_u64(1),
            Instant::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_numerals_rendered() {
        let session = session();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        ProgressionWidget::new(&session).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains('I'));
        assert!(text.contains("vii°"));
        assert!(!text.contains("F#dim"));
    }

    #[test]
    fn test_revealed_shows_chords() {
        let session = session();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        ProgressionWidget::new(&session)
            .revealed(true)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("F#dim"));
    }
}
