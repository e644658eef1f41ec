use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::game::TickEngine;
use crate::input::{InputHandler, InputMode, KeyAction};
use crate::leaderboard::{
    LeaderboardClient, LeaderboardPanel, LeaderboardReply, LeaderboardTasks, ReplyKind,
};
use crate::lifecycle::{sleep_until_deadline, LifecycleController, LifecycleEvent, Phase};
use crate::metrics::SessionStats;
use crate::render::{AppView, Renderer};

/// Interactive game: countdown, play, game over, leaderboard
pub struct PlayMode {
    controller: LifecycleController,
    panel: LeaderboardPanel,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    leaderboard: LeaderboardTasks,
    replies: mpsc::UnboundedReceiver<LeaderboardReply>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: AppConfig) -> Result<Self> {
        let engine = TickEngine::new(config.game).context("Invalid game configuration")?;

        let client = config
            .leaderboard
            .enabled
            .then(|| LeaderboardClient::new(&config.leaderboard));
        let (leaderboard, replies) = LeaderboardTasks::new(client);

        Ok(Self {
            controller: LifecycleController::new(engine),
            panel: LeaderboardPanel::new(),
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            leaderboard,
            replies,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.request_leaderboard();

        loop {
            let deadline = self.controller.next_deadline();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Countdown step or game tick
                _ = sleep_until_deadline(deadline) => {
                    self.on_timer();
                }

                // Leaderboard call finished
                Some(reply) = self.replies.recv() => {
                    self.apply_reply(reply);
                }

                // Render frame
                _ = render_timer.tick() => {
                    let view = AppView {
                        controller: &self.controller,
                        panel: &self.panel,
                        stats: &self.stats,
                        leaderboard_enabled: self.leaderboard.is_enabled(),
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn input_mode(&self) -> InputMode {
        if self.controller.phase() == Phase::Ended && self.leaderboard.is_enabled() {
            InputMode::NicknameEntry
        } else {
            InputMode::Play
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key, self.input_mode());
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.controller.queue_direction(direction);
            }
            KeyAction::Start => {
                if matches!(self.controller.phase(), Phase::Idle | Phase::Ended) {
                    self.start_game();
                }
            }
            KeyAction::Restart => self.start_game(),
            KeyAction::ShowLeaderboard => self.request_leaderboard(),
            KeyAction::NicknameChar(ch) => self.panel.push_char(ch),
            KeyAction::NicknameBackspace => self.panel.pop_char(),
            KeyAction::Submit => self.submit_score(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn start_game(&mut self) {
        self.leaderboard.cancel_all();
        self.controller.start();
        self.panel.on_new_round();
    }

    fn on_timer(&mut self) {
        match self.controller.on_timer() {
            Some(LifecycleEvent::Started) => self.stats.on_round_start(),
            Some(LifecycleEvent::GameOver { score, .. }) => {
                self.stats.on_game_over(score);
                self.request_leaderboard();
            }
            _ => {}
        }
    }

    fn submit_score(&mut self) {
        let Some(score) = self.controller.final_score() else {
            return;
        };
        if !self.leaderboard.is_enabled() {
            return;
        }

        // Empty nickname, a submit in flight or one already accepted
        let Ok(name) = self.panel.begin_submit() else {
            return;
        };

        let generation = self.controller.generation();
        info!(generation, score, "submitting score");
        self.leaderboard.spawn_submit(generation, name, score);
    }

    fn request_leaderboard(&mut self) {
        if self.leaderboard.spawn_fetch(self.controller.generation()) {
            self.panel.begin_fetch();
        }
    }

    fn apply_reply(&mut self, reply: LeaderboardReply) {
        if !self.controller.is_current(reply.generation) {
            debug!(generation = reply.generation, "dropping stale leaderboard reply");
            return;
        }

        match reply.kind {
            ReplyKind::Submitted(result) => {
                if self.controller.phase() != Phase::Ended {
                    return;
                }
                let accepted = result.is_ok();
                self.panel.apply_submit(result);
                if accepted {
                    self.request_leaderboard();
                }
            }
            ReplyKind::Fetched(result) => {
                if let Ok(entries) = &result {
                    info!(count = entries.len(), "leaderboard loaded");
                }
                self.panel.apply_fetch(result);
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
