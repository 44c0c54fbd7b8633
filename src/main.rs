use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use dota_lookup::config::{LookupConfig, ResultBasis};
use dota_lookup::opendota_fetch::OpenDotaSource;
use dota_lookup::provider::spawn_provider;
use dota_lookup::state::{
    self, AppState, HeroCell, MatchResult, MatchRow, PlayerProfile, apply_delta,
    format_last_login,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<state::ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<state::ProviderCommand>>, basis: ResultBasis) -> Self {
        let mut state = AppState::new();
        state.result_basis = basis;
        if basis == ResultBasis::RankTier {
            state.push_log("[WARN] Win/Lose uses the legacy rank tier comparison");
        }
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.state.input.pop();
            }
            KeyCode::Down => self.state.select_next(),
            KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(ch) => self.state.input.push(ch),
            _ => {}
        }
    }

    fn submit(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Lookup unavailable");
            return;
        };
        let Some(cmd) = self.state.begin_lookup() else {
            self.state.push_log("[INFO] Enter an account ID first");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Lookup request failed");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = LookupConfig::from_env();
    let basis = config.result_basis;
    let source = match OpenDotaSource::new(config) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err:#}");
            return Ok(());
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(Arc::new(source), tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx), basis);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(10),
            Constraint::Min(4),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let input = Paragraph::new(format!("{}_", app.state.input)).block(
        Block::default()
            .title("OpenDota Player Lookup - Account ID")
            .borders(Borders::ALL),
    );
    frame.render_widget(input, chunks[0]);

    render_status(frame, chunks[1], &app.state);

    let profile = Paragraph::new(profile_text(app.state.profile()))
        .block(Block::default().title("Player").borders(Borders::ALL));
    frame.render_widget(profile, chunks[2]);

    render_matches(frame, chunks[3], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[4]);

    let footer = Paragraph::new("Enter Search | ↑/↓ Move | F1 Help | Esc Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[5]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = if state.is_loading() {
        Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow))
    } else if let Some(err) = state.error() {
        Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new("")
    };
    frame.render_widget(status, area);
}

fn profile_text(profile: Option<&PlayerProfile>) -> String {
    let Some(profile) = profile else {
        return "No player loaded".to_string();
    };
    let Some(account) = &profile.account else {
        return format!("Rank Tier: {}", profile.rank_label());
    };

    let mut lines = vec![
        account.persona_name.clone(),
        format!("Steam ID: {}", account.steam_id),
        format!(
            "Country: {}",
            account.country_code.as_deref().unwrap_or("-")
        ),
        format!("Rank Tier: {}", profile.rank_label()),
        format!("Plus User: {}", if account.plus { "Yes" } else { "No" }),
        format!("Steam Profile: {}", account.profile_url),
        format!("Avatar: {}", account.avatar_url),
    ];
    if let Some(last_login) = &account.last_login {
        lines.push(format!("Last Login: {}", format_last_login(last_login)));
    }
    lines.join("\n")
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Recent Matches").borders(Borders::ALL);
    let rows = state.match_rows();
    if rows.is_empty() {
        let empty = Paragraph::new("No recent matches")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    // header row + table body
    let visible = sections[0].height.saturating_sub(1) as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);

    let header = Row::new(vec![
        "Match ID", "Hero", "Result", "Kills", "Deaths", "Assists", "Duration", "Game Mode",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows[start..end].iter().enumerate().map(|(i, row)| {
        let selected = start + i == state.selected;
        match_row(row, selected)
    });

    let table = Table::new(body, match_columns()).header(header);
    frame.render_widget(table, sections[0]);

    let detail = state
        .selected_row()
        .map(|row| match &row.hero {
            HeroCell::Known(info) => format!("{} icon: {}", info.display_name, info.icon_url),
            HeroCell::Unknown => format!("Match {}: hero unknown", row.match_id),
        })
        .unwrap_or_default();
    let detail = Paragraph::new(detail).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(detail, sections[1]);
}

fn match_row(row: &MatchRow, selected: bool) -> Row<'static> {
    let result_style = match row.result {
        MatchResult::Win => Style::default().fg(Color::Green),
        MatchResult::Lose => Style::default().fg(Color::Red),
    };
    let cells = vec![
        Cell::from(row.match_id.to_string()),
        Cell::from(row.hero.label().to_string()),
        Cell::from(row.result.label()).style(result_style),
        Cell::from(row.kills.to_string()),
        Cell::from(row.deaths.to_string()),
        Cell::from(row.assists.to_string()),
        Cell::from(row.duration.clone()),
        Cell::from(row.game_mode),
    ];
    let row_style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    Row::new(cells).style(row_style)
}

fn match_columns() -> [Constraint; 8] {
    [
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(22),
    ]
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "OpenDota Player Lookup - Help",
        "",
        "  type         Edit account ID",
        "  Backspace    Delete character",
        "  Enter        Search",
        "  ↑/↓          Move match selection",
        "  F1           Toggle help",
        "  Esc / Ctrl-C Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
