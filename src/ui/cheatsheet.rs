// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Cheatsheet table: every key against every numeral.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Cell, Row, Table, Widget},
};

use crate::music::{ChordQuality, KeyName, Numeral};

/// Table of the diatonic chords in every key, highlighting the selected one
pub struct CheatsheetWidget<'a> {
    selected: KeyName,
    block: Option<Block<'a>>,
}

impl<'a> CheatsheetWidget<'a> {
    /// Create a new cheatsheet highlighting `selected`
    pub fn new(selected: KeyName) -> Self {
        Self {
            selected,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for CheatsheetWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(
            std::iter::once(Cell::from("Key")).chain(Numeral::ALL.iter().map(|n| Cell::from(n.symbol()))),
        )
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows = KeyName::ALL.iter().map(|&key| {
            let style = if key == self.selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let family = key.chords();
            Row::new(
                std::iter::once(Cell::from(key.name())).chain(
                    Numeral::ALL
                        .iter()
                        .zip(family.iter())
                        .map(|(numeral, &chord)| {
                            Cell::from(chord).style(quality_style(numeral.quality()))
                        }),
                ),
            )
            .style(style)
        });

        let widths = [Constraint::Length(4)]
            .into_iter()
            .chain(Numeral::ALL.iter().map(|_| Constraint::Length(6)));

        let mut table = Table::new(rows, widths).header(header).column_spacing(1);
        if let Some(block) = self.block {
            table = table.block(block);
        }
        table.render(area, buf);
    }
}

/// Chord colour by triad quality
fn quality_style(quality: ChordQuality) -> Style {
    match quality {
        ChordQuality::Major => Style::default(),
        ChordQuality::Minor => Style::default().fg(Color::Cyan),
        ChordQuality::Diminished => Style::default().fg(Color::Magenta),
    }
}
