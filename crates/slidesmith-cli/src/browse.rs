use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use slidesmith_engine::text::LineIndex;
use slidesmith_engine::{
    EditHistory, Severity, Slide, ValidationError, Validator, delete_slide, duplicate_slide,
    extract_slides, get_slide_title, io, reorder_slides,
};
use std::io::{Stdout, stdout};
use std::path::PathBuf;

struct App {
    path: PathBuf,
    history: EditHistory,
    validator: Validator,
    slides: Vec<Slide>,
    diagnostics: Vec<ValidationError>,
    slide_list_state: ListState,
    saved: String,
    status: String,
}

impl App {
    fn new(path: PathBuf, validator: Validator) -> Result<Self> {
        let content = io::read_document(&path)?;
        let mut app = Self {
            path,
            history: EditHistory::new(content.clone()),
            validator,
            slides: Vec::new(),
            diagnostics: Vec::new(),
            slide_list_state: ListState::default(),
            saved: content,
            status: String::new(),
        };
        app.refresh();

        // Select first slide if available
        if !app.slides.is_empty() {
            app.slide_list_state.select(Some(0));
        }

        Ok(app)
    }

    fn doc(&self) -> &str {
        self.history.current()
    }

    fn is_modified(&self) -> bool {
        self.doc() != self.saved
    }

    fn refresh(&mut self) {
        self.slides = extract_slides(self.history.current());
        self.diagnostics = self.validator.validate(self.history.current());
        if let Some(i) = self.slide_list_state.selected()
            && i >= self.slides.len()
        {
            self.slide_list_state
                .select(self.slides.len().checked_sub(1));
        }
    }

    fn next_slide(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        let i = match self.slide_list_state.selected() {
            Some(i) => (i + 1) % self.slides.len(),
            None => 0,
        };
        self.slide_list_state.select(Some(i));
    }

    fn previous_slide(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        let i = match self.slide_list_state.selected() {
            Some(0) | None => self.slides.len() - 1,
            Some(i) => i - 1,
        };
        self.slide_list_state.select(Some(i));
    }

    fn apply(&mut self, edit: impl FnOnce(&str) -> String) {
        let updated = edit(self.doc());
        if self.history.push(updated) {
            self.refresh();
        }
    }

    fn move_selected(&mut self, down: bool) {
        let Some(from) = self.slide_list_state.selected() else {
            return;
        };
        let to = if down { from + 1 } else { from.wrapping_sub(1) };
        if to >= self.slides.len() {
            return;
        }
        self.apply(|doc| reorder_slides(doc, from, to));
        self.slide_list_state.select(Some(to));
    }

    fn delete_selected(&mut self) {
        if let Some(i) = self.slide_list_state.selected() {
            self.apply(|doc| delete_slide(doc, i));
        }
    }

    fn duplicate_selected(&mut self) {
        if let Some(i) = self.slide_list_state.selected() {
            self.apply(|doc| duplicate_slide(doc, i));
            self.slide_list_state.select(Some(i + 1));
        }
    }

    fn undo(&mut self) {
        if self.history.undo().is_some() {
            self.refresh();
        }
    }

    fn redo(&mut self) {
        if self.history.redo().is_some() {
            self.refresh();
        }
    }

    fn save(&mut self) {
        match io::write_document(&self.path, self.history.current()) {
            Ok(()) => {
                self.saved = self.history.current().to_string();
                self.status = format!("saved {}", self.path.display());
            }
            Err(e) => self.status = format!("Error saving: {e}"),
        }
    }

    /// Slide HTML followed by the diagnostics whose line falls inside it.
    fn selected_content(&self) -> Vec<Line<'static>> {
        let Some(slide) = self
            .slide_list_state
            .selected()
            .and_then(|i| self.slides.get(i))
        else {
            return self.diagnostics.iter().map(diagnostic_line).collect();
        };

        let lines = LineIndex::new(self.doc());
        let first = lines.line(slide.start);
        let last = lines.line(slide.end.saturating_sub(1));

        let mut content: Vec<Line> = slide
            .html
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        let problems: Vec<_> = self
            .diagnostics
            .iter()
            .filter(|d| (first..=last).contains(&d.line))
            .collect();
        if !problems.is_empty() {
            content.push(Line::from(String::new()));
            content.extend(problems.into_iter().map(diagnostic_line));
        }
        content
    }
}

fn diagnostic_line(d: &ValidationError) -> Line<'static> {
    let color = match d.severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    };
    Line::from(Span::styled(d.to_string(), Style::default().fg(color)))
}

pub fn run(path: PathBuf, validator: Validator) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(path, validator)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.status.clear();
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_slide(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_slide(),
                KeyCode::Char('J') => app.move_selected(true),
                KeyCode::Char('K') => app.move_selected(false),
                KeyCode::Char('d') => app.delete_selected(),
                KeyCode::Char('y') => app.duplicate_selected(),
                KeyCode::Char('u') => app.undo(),
                KeyCode::Char('r') => app.redo(),
                KeyCode::Char('s') => app.save(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    // Slide list panel
    let slide_items: Vec<ListItem> = app
        .slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            ListItem::new(Line::from(format!("{:>2}. {}", i + 1, get_slide_title(&slide.html))))
        })
        .collect();

    let title = format!(
        "Slides{}",
        if app.is_modified() { " [modified]" } else { "" }
    );
    let slide_list = List::new(slide_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(slide_list, chunks[0], &mut app.slide_list_state);

    // Content panel
    let mut content_text = app.selected_content();
    if content_text.is_empty() {
        content_text.push(Line::from("No slides in this document"));
    }

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Slide"))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = if app.status.is_empty() {
        Line::from(vec![
            Span::raw("q: Quit | ↑/k ↓/j: Select | K/J: Move | "),
            Span::raw("d: Delete | y: Duplicate | u/r: Undo/Redo | s: Save"),
        ])
    } else {
        Line::from(app.status.clone())
    };

    f.render_widget(Paragraph::new(help_text), rows[1]);
}
