use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, Position};
use crate::leaderboard::LeaderboardPanel;
use crate::lifecycle::{LifecycleController, Phase};
use crate::metrics::SessionStats;

const BACKGROUND: Color = Color::Rgb(181, 76, 144);
const SNAKE_COLOR: Color = Color::Rgb(199, 159, 255);
const FOOD_COLOR: Color = Color::Rgb(255, 159, 228);
const TEXT_COLOR: Color = Color::Rgb(255, 192, 203);

/// Everything the renderer reads; nothing here is mutated while drawing
pub struct AppView<'a> {
    pub controller: &'a LifecycleController,
    pub panel: &'a LeaderboardPanel,
    pub stats: &'a SessionStats,
    pub leaderboard_enabled: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &AppView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(view);
        frame.render_widget(stats, chunks[0]);

        // Center the board horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match view.controller.phase() {
            Phase::Idle => self.render_idle(view),
            Phase::Counting(_) | Phase::Announcing => {
                let banner = view.controller.banner().unwrap_or_default();
                self.render_banner(game_area, banner)
            }
            Phase::Running => self.render_grid(view.controller.state()),
            Phase::Ended => self.render_game_over(view),
        };
        frame.render_widget(body, game_area);

        let controls = self.render_controls(view);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let cell = state.cell_size.max(1) as i32;
        let columns = state.width as i32 / cell;
        let rows = state.height as i32 / cell;
        let mut lines = Vec::with_capacity(rows as usize);

        for row in 0..rows {
            let mut spans = Vec::with_capacity(columns as usize);

            for col in 0..columns {
                let pos = Position::new(col * cell, row * cell);

                let span = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(SNAKE_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(SNAKE_COLOR))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(BACKGROUND))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(BACKGROUND))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_banner(&self, area: Rect, banner: String) -> Paragraph<'static> {
        // Pad so the banner lands in the vertical middle of the box
        let padding = (area.height.saturating_sub(3) / 2) as usize;
        let mut lines = vec![Line::from(""); padding];
        lines.push(Line::from(Span::styled(
            banner,
            Style::default().fg(TEXT_COLOR).add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(BACKGROUND)),
        )
    }

    fn render_idle(&self, view: &AppView) -> Paragraph<'static> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default().fg(TEXT_COLOR).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        if view.leaderboard_enabled {
            lines.push(Line::from(""));
            lines.extend(Self::leaderboard_lines(view.panel));
        }

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BACKGROUND)),
        )
    }

    fn render_game_over(&self, view: &AppView) -> Paragraph<'static> {
        let state = view.controller.state();
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if view.leaderboard_enabled {
            lines.push(Line::from(vec![
                Span::styled("Nickname: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}_", view.panel.nickname()),
                    Style::default().fg(Color::White),
                ),
            ]));
            if let Some(status) = view.panel.status() {
                lines.push(Line::from(Span::styled(
                    status.to_string(),
                    Style::default().fg(TEXT_COLOR),
                )));
            }
            lines.push(Line::from(""));
            lines.extend(Self::leaderboard_lines(view.panel));
        }

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn leaderboard_lines(panel: &LeaderboardPanel) -> Vec<Line<'static>> {
        let rows = panel.lines();
        if rows.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![Line::from(Span::styled(
            "Leaderboard",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
        ))];
        lines.extend(
            rows.into_iter()
                .map(|row| Line::from(Span::styled(row, Style::default().fg(Color::White)))),
        );
        lines
    }

    fn render_stats(&self, view: &AppView) -> Paragraph<'static> {
        let state = view.controller.state();
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.stats.best_score().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.stats.games_played().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, view: &AppView) -> Paragraph<'static> {
        let spans = if view.controller.phase() == Phase::Ended && view.leaderboard_enabled {
            vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" submit | "),
                Span::styled("Tab", Style::default().fg(Color::Cyan)),
                Span::raw(" leaderboard | "),
                Span::styled("Ctrl+R", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]
        } else {
            vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
