//! Interactive terminal editor.
//!
//! Layout: the rendered shape on the right, a status panel on the left,
//! and one box per parameter along the bottom. Errors and save results
//! open as modal popups over everything else.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use image::Rgba;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{picker::{Picker, ProtocolType}, protocol::StatefulProtocol, StatefulImage};

use blobby::Field;
use blobby::geometry::path_length;

use crate::app::{App, DialogKind, Mode};
use crate::render::flatten_onto;

/// Terminal-side image state for the preview pane.
struct Preview {
    picker: Picker,
    protocol: Option<Box<dyn StatefulProtocol>>,
}

impl Preview {
    fn new() -> Self {
        // Sixel is the most widely supported protocol; font size is a guess
        // when the terminal won't report it
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;
        Self { picker, protocol: None }
    }

    /// Re-render the preview if the app asked for it.
    fn update(&mut self, app: &mut App) {
        if !app.needs_image_update {
            return;
        }
        app.needs_image_update = false;

        match app.render() {
            Ok(Some(image)) => {
                let flat = flatten_onto(&image, Rgba([255, 255, 255, 255]));
                self.protocol = Some(self.picker.new_resize_protocol(flat));
            }
            Ok(None) => self.protocol = None,
            Err(e) => log::warn!("Preview render failed: {}", e),
        }
    }
}

/// Set up the terminal, run the editor, and restore the terminal.
pub fn run_tui(app: &mut App) -> Result<(), String> {
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(EnterAlternateScreen).map_err(|e| e.to_string())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| e.to_string())?;

    let result = run_app(&mut terminal, app);

    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(LeaveAlternateScreen).map_err(|e| e.to_string())?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), String> {
    let mut preview = Preview::new();

    loop {
        preview.update(app);

        terminal
            .draw(|frame| ui(frame, app, &mut preview))
            .map_err(|_| "Draw error".to_string())?;

        if event::poll(Duration::from_millis(50)).map_err(|e| e.to_string())? {
            if let Event::Key(key) = event::read().map_err(|e| e.to_string())? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Route a key press according to the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.dialog.is_some() {
        app.dismiss_dialog();
        return;
    }

    match app.mode {
        Mode::Editing { .. } | Mode::SavePrompt { .. } => match key.code {
            KeyCode::Enter => app.commit_input(),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.focus_prev(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.step_focused(-1.0),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
                app.step_focused(1.0)
            }
            KeyCode::Enter | KeyCode::Char('e') => app.begin_edit(),
            KeyCode::Char('a') => {
                app.adjust();
            }
            KeyCode::Char('r') => {
                app.refresh();
            }
            KeyCode::Char('s') => app.begin_save(),
            _ => {}
        },
    }
}

fn ui(frame: &mut Frame, app: &App, preview: &mut Preview) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(40),
        ])
        .split(main_layout[0]);

    // Stats panel
    let stats_text = match app.shape() {
        Some(shape) => format!(
            "Vertices: {}\nPoints: {}\nLength: {:.2}\nLine: {:.2}pt\nCanvas: {}px\nSeed:\n{}",
            shape.vertex_count,
            shape.curve.len(),
            path_length(&shape.curve),
            app.line_width(),
            app.style().size,
            app.seed().map(|s| s.to_string()).unwrap_or_default(),
        ),
        None => "No shape".to_string(),
    };
    let stats = Paragraph::new(stats_text)
        .block(Block::default()
            .title(" Shape ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White));
    frame.render_widget(stats, top_layout[0]);

    let image_block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner_area = image_block.inner(top_layout[1]);
    frame.render_widget(image_block, top_layout[1]);

    if let Some(ref mut protocol) = preview.protocol {
        frame.render_stateful_widget(StatefulImage::new(None), inner_area, protocol);
    }

    render_fields(frame, app, main_layout[1]);

    let help = Paragraph::new(
        "Tab/↑↓ field  ←→ -/+  e edit  a adjust  r refresh  s save  q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, main_layout[2]);

    if let Mode::SavePrompt { buffer } = &app.mode {
        render_popup(frame, " Save as PNG ", &format!("{}_", buffer), Color::Cyan);
    }

    if let Some(dialog) = &app.dialog {
        let color = match dialog.kind {
            DialogKind::Error => Color::Red,
            DialogKind::Info => Color::Green,
        };
        let title = format!(" {} ", dialog.title);
        let body = format!("{}\n\n(press any key)", dialog.message);
        render_popup(frame, &title, &body, color);
    }
}

fn render_fields(frame: &mut Frame, app: &App, area: Rect) {
    let fields = Field::all();
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Ratio(1, fields.len() as u32))
        .collect();
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let focused = i == app.focus;
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let text = match &app.mode {
            Mode::Editing { buffer } if focused => format!("{}_", buffer),
            _ => app.text(*field).to_string(),
        };

        let widget = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default()
                .title(format!(" {} ", field.label()))
                .borders(Borders::ALL)
                .border_style(style));
        frame.render_widget(widget, boxes[i]);
    }
}

fn render_popup(frame: &mut Frame, title: &str, body: &str, color: Color) {
    let area = centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(body.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)));
    frame.render_widget(popup, area);
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
