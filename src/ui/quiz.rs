// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Multiple-choice panel: current question, options, countdown and results.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Widget},
};

use crate::quiz::{Outcome, QuizSession};

/// Question and options, or the results once the quiz is submitted
pub struct QuizWidget<'a> {
    session: &'a QuizSession,
    remaining: Option<Duration>,
    block: Option<Block<'a>>,
}

impl<'a> QuizWidget<'a> {
    /// Create a new quiz widget
    pub fn new(session: &'a QuizSession) -> Self {
        Self {
            session,
            remaining: None,
            block: None,
        }
    }

    /// Time left as last reported by the countdown; no gauge when `None`
    pub fn remaining(mut self, remaining: Option<Duration>) -> Self {
        self.remaining = remaining;
        self
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_question(&self, area: Rect, buf: &mut Buffer) {
        let Some((index, question)) = self.session.current_question() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Prompt
                Constraint::Min(4),    // Options
                Constraint::Length(1), // Countdown
            ])
            .split(area);

        let prompt = Line::from(vec![
            Span::styled(
                format!("Question {}/{}: ", index + 1, self.session.questions().len()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("which chord is "),
            Span::styled(
                question.numeral.symbol(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" in {}?", self.session.key())),
        ]);
        Paragraph::new(prompt).render(chunks[0], buf);

        let options: Vec<Line> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, chord)| {
                Line::from(vec![
                    Span::styled(format!("  {}) ", i + 1), Style::default().fg(Color::Cyan)),
                    Span::raw(*chord),
                ])
            })
            .collect();
        Paragraph::new(options).render(chunks[1], buf);

        if let (Some(remaining), Some(limit)) = (self.remaining, self.session.time_limit()) {
            Gauge::default()
                .gauge_style(Style::default().fg(countdown_color(remaining, limit)))
                .ratio(countdown_ratio(remaining, limit))
                .label(format!("{:.1}s", remaining.as_secs_f64()))
                .render(chunks[2], buf);
        }
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let score = self.session.score();
        let mut lines = vec![
            Line::styled(
                format!("Score: {}/{}", score.correct, self.session.questions().len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
        ];

        for record in self.session.answers() {
            let question = &self.session.questions()[record.question];
            let detail = match record.outcome {
                Outcome::Correct => Span::styled("✓", Style::default().fg(Color::Green)),
                Outcome::Incorrect { .. } => Span::styled(
                    format!("✗ you chose {}", record.chosen.unwrap_or("-")),
                    Style::default().fg(Color::Red),
                ),
                Outcome::TimedOut { .. } => {
                    Span::styled("⏱ no answer", Style::default().fg(Color::DarkGray))
                }
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {:>4} = {:<6} ", question.numeral.symbol(), question.answer)),
                detail,
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Press n for a new progression",
            Style::default().fg(Color::DarkGray),
        ));
        Paragraph::new(lines).render(area, buf);
    }
}

impl Widget for QuizWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block.clone() {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if self.session.is_submitted() {
            self.render_results(area, buf);
        } else {
            self.render_question(area, buf);
        }
    }
}

/// Fraction of the time limit still left (0.0 - 1.0)
pub fn countdown_ratio(remaining: Duration, limit: Duration) -> f64 {
    if limit.is_zero() {
        return 0.0;
    }
    (remaining.as_secs_f64() / limit.as_secs_f64()).clamp(0.0, 1.0)
}

/// Gauge color: green, then yellow under half, red under a quarter
fn countdown_color(remaining: Duration, limit: Duration) -> Color {
    let ratio = countdown_ratio(remaining, limit);
    if ratio < 0.25 {
        Color::Red
    } else if ratio < 0.5 {
        Color::Yellow
    } else {
        Color::Green
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

    fn session(now: Instant) -> QuizSession {
        QuizSession::new(
            0,
            KeyName::D,
            vec![Numeral::Dominant, Numeral::Submediant],
            Some(Duration::from_secs(10)),
            &mut StdRng::seed_from_u64(6),
            now,
        )
        .unwrap()
    }

    #[test]
    fn test_countdown_ratio() {
        let limit = Duration::from_secs(10);
        assert_eq!(countdown_ratio(Duration::from_secs(10), limit), 1.0);
        assert_eq!(countdown_ratio(Duration::from_secs(5), limit), 0.5);
        assert_eq!(countdown_ratio(Duration::ZERO, limit), 0.0);
        assert_eq!(countdown_ratio(Duration::from_secs(1), Duration::ZERO), 0.0);
    }

    #[test]
    fn test_countdown_color() {
        let limit = Duration::from_secs(8);
        assert_eq!(countdown_color(Duration::from_secs(8), limit), Color::Green);
        assert_eq!(countdown_color(Duration::from_secs(3), limit), Color::Yellow);
        assert_eq!(countdown_color(Duration::from_secs(1), limit), Color::Red);
    }

    #[test]
    fn test_renders_question_and_options() {
        let now = Instant::now();
        let session = session(now);
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        QuizWidget::new(&session)
            .remaining(Some(Duration::from_millis(7500)))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Question 1/2"));
        for option in &session.questions()[0].options {
            assert!(text.contains(option), "missing option {}", option);
        }
        assert!(text.contains("7.5s"));
    }

    #[test]
    fn test_no_gauge_without_remaining() {
        let now = Instant::now();
        let session = session(now);
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        QuizWidget::new(&session).render(area, &mut buf);

        assert!(!buffer_text(&buf).contains(".0s"));
    }

    #[test]
    fn test_renders_results_when_submitted() {
        let now = Instant::now();
        let mut session = session(now);
        while let Some(token) = session.token() {
            session.expire(token, now);
        }

        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        QuizWidget::new(&session).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Score: 0/2"));
        assert!(text.contains("no answer"));
    }
}
