//! Interactive application model.
//!
//! [`App`] turns key presses into [`Command`]s for the [`TabController`] and
//! renders the visible tab as text: tab bar, metrics, canvas, sliders and a
//! status line. It owns no terminal state; see [`crate::terminal`] for that.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Stylize;
use tracing::warn;

use crate::canvas::TerminalCanvas;
use crate::config::Config;
use crate::messages::{Command, Demo, ParamChange};
use crate::params::ParamSpec;
use crate::tabs::TabController;

/// Slider steps taken per arrow press with Shift held.
const COARSE_STEPS: i32 = 10;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
pub struct App {
    tabs: TabController<TerminalCanvas>,
    /// Selected slider row on the visible tab.
    selected: usize,
    use_color: bool,
    /// Last rejected command, shown in the status line.
    notice: Option<String>,
}

impl App {
    /// Create the app for a resolved configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            tabs: TabController::new(config.initial_tab),
            selected: 0,
            use_color: config.use_color(),
            notice: None,
        }
    }

    /// The tab controller.
    #[must_use]
    pub const fn tabs(&self) -> &TabController<TerminalCanvas> {
        &self.tabs
    }

    /// The slider currently selected for adjustment.
    #[must_use]
    pub fn selected_param(&self) -> &'static ParamSpec {
        let specs = self.tabs.current().params().specs();
        &specs[self.selected.min(specs.len() - 1)]
    }

    /// Deliver due frames at `now`.
    pub fn tick(&mut self, now: Duration) -> usize {
        self.tabs.pump(now)
    }

    /// Handle a key press at time `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Duration) -> Control {
        let active = self.tabs.active();
        let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit;
            }
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('s' | ' ') | KeyCode::Enter => {
                self.apply(Command::Start(active), now);
            }
            KeyCode::Char('r') => self.apply(Command::Reset(active), now),
            KeyCode::Tab => self.apply(Command::SwitchTab(active.next()), now),
            KeyCode::BackTab => self.apply(Command::SwitchTab(active.prev()), now),
            KeyCode::Char(c) => {
                if let Some(demo) = Demo::from_shortcut(c) {
                    self.apply(Command::SwitchTab(demo), now);
                }
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                let last = self.tabs.current().params().specs().len() - 1;
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::Left => self.nudge(if coarse { -COARSE_STEPS } else { -1 }, now),
            KeyCode::Right => self.nudge(if coarse { COARSE_STEPS } else { 1 }, now),
            _ => {}
        }
        Control::Continue
    }

    fn nudge(&mut self, steps: i32, now: Duration) {
        let spec = self.selected_param();
        let current = self.tabs.current().param(spec.name).unwrap_or(spec.default);
        let change = ParamChange::new(self.tabs.active(), spec.name, spec.nudge(current, steps));
        self.apply(Command::SetParam(change), now);
    }

    fn apply(&mut self, command: Command, now: Duration) {
        if let Command::SwitchTab(demo) = command
            && demo != self.tabs.active()
        {
            self.selected = 0;
        }
        match self.tabs.dispatch(command, now) {
            Ok(()) => self.notice = None,
            Err(err) => {
                warn!(error = %err, "command rejected");
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Render the whole screen.
    #[must_use]
    pub fn view(&self) -> String {
        let sim = self.tabs.current();
        let mut lines = vec![self.render_tab_bar(), String::new()];

        let metrics: Vec<_> = sim.metrics().iter().map(ToString::to_string).collect();
        lines.push(format!(" {}", metrics.join("   ")));

        match sim.surface() {
            Some(canvas) => {
                let border = "─".repeat(canvas.cols());
                lines.push(format!(" ┌{border}┐"));
                for row in canvas.render(self.use_color).lines() {
                    lines.push(format!(" │{row}│"));
                }
                lines.push(format!(" └{border}┘"));
            }
            None => lines.push(" (no canvas)".to_string()),
        }

        let selected = self.selected_param().name;
        for (spec, value) in sim.params().iter() {
            let marker = if spec.name == selected { '>' } else { ' ' };
            let row = format!(
                " {marker} {:<18} {:>10}   [{} .. {}]",
                spec.label,
                spec.format(value),
                spec.min,
                spec.max
            );
            lines.push(if spec.name == selected && self.use_color {
                row.bold().to_string()
            } else {
                row
            });
        }

        lines.push(String::new());
        lines.push(self.render_status());
        lines.join("\n")
    }

    fn render_tab_bar(&self) -> String {
        let active = self.tabs.active();
        let tabs: Vec<String> = Demo::all()
            .iter()
            .map(|&demo| {
                let label = format!(" {} {} ", demo.shortcut(), demo.name());
                if demo != active {
                    label
                } else if self.use_color {
                    label.reverse().to_string()
                } else {
                    format!("[{}]", label.trim())
                }
            })
            .collect();
        format!(" Physics Lab  {}", tabs.join(" "))
    }

    fn render_status(&self) -> String {
        let sim = self.tabs.current();
        let state = format!(
            " {} | frames {} | s start  r reset  ↑↓ select  ←→ adjust  1-4/Tab switch  q quit",
            sim.run_state(),
            sim.frames_rendered()
        );
        match &self.notice {
            Some(notice) => format!("{state}\n ! {notice}"),
            None => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RunState;

    fn app(tab: Demo) -> App {
        App::new(&Config {
            initial_tab: tab,
            color_mode: crate::config::ColorMode::Never,
            ..Config::default()
        })
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut app = app(Demo::Projectile);
        assert_eq!(app.handle_key(press(KeyCode::Char('q')), Duration::ZERO), Control::Quit);
        assert_eq!(app.handle_key(press(KeyCode::Esc), Duration::ZERO), Control::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c, Duration::ZERO), Control::Quit);
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut app = app(Demo::Projectile);
        app.handle_key(press(KeyCode::Char('3')), Duration::ZERO);
        assert_eq!(app.tabs().active(), Demo::Harmonic);
        app.handle_key(press(KeyCode::Tab), Duration::ZERO);
        assert_eq!(app.tabs().active(), Demo::Collision);
        app.handle_key(press(KeyCode::BackTab), Duration::ZERO);
        assert_eq!(app.tabs().active(), Demo::Harmonic);
    }

    #[test]
    fn start_then_tick_draws_frames() {
        let mut app = app(Demo::Collision);
        app.handle_key(press(KeyCode::Char('s')), Duration::ZERO);
        assert_eq!(app.tabs().current().run_state(), RunState::Running);
        assert_eq!(app.tick(Duration::from_millis(16)), 1);
        assert!(app.tabs().current().surface().unwrap().ink() > 0);
    }

    #[test]
    fn arrows_select_and_adjust() {
        let mut app = app(Demo::Projectile);
        app.handle_key(press(KeyCode::Down), Duration::ZERO);
        assert_eq!(app.selected_param().name, "angle");
        app.handle_key(press(KeyCode::Right), Duration::ZERO);
        assert_eq!(app.tabs().current().param("angle"), Some(46.0));

        let shift_left = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        app.handle_key(shift_left, Duration::ZERO);
        assert_eq!(app.tabs().current().param("angle"), Some(36.0));

        app.handle_key(press(KeyCode::Down), Duration::ZERO);
        assert_eq!(app.selected_param().name, "angle");
        app.handle_key(press(KeyCode::Up), Duration::ZERO);
        app.handle_key(press(KeyCode::Up), Duration::ZERO);
        assert_eq!(app.selected_param().name, "velocity");
    }

    #[test]
    fn adjust_stops_at_range_edge() {
        let mut app = app(Demo::Projectile);
        for _ in 0..20 {
            let key = KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT);
            app.handle_key(key, Duration::ZERO);
        }
        assert_eq!(app.tabs().current().param("velocity"), Some(100.0));
    }

    #[test]
    fn switching_tabs_resets_selection() {
        let mut app = app(Demo::Newton);
        app.handle_key(press(KeyCode::Down), Duration::ZERO);
        app.handle_key(press(KeyCode::Char('4')), Duration::ZERO);
        assert_eq!(app.selected_param().name, "mass1");
    }

    #[test]
    fn reset_key_restores_defaults() {
        let mut app = app(Demo::Harmonic);
        app.handle_key(press(KeyCode::Right), Duration::ZERO);
        assert_eq!(app.tabs().current().param("mass"), Some(2.1));
        app.handle_key(press(KeyCode::Char('r')), Duration::ZERO);
        assert_eq!(app.tabs().current().param("mass"), Some(2.0));
    }

    #[test]
    fn view_shows_tabs_metrics_and_sliders() {
        let app = app(Demo::Projectile);
        let view = app.view();
        assert!(view.contains("[1 Projectile Motion]"));
        assert!(view.contains("Newton's Laws"));
        assert!(view.contains("Range: 254.84 m"));
        assert!(view.contains("> Initial Velocity"));
        assert!(view.contains("idle | frames 0"));
        assert!(!view.contains('\u{1b}'));
    }
}
