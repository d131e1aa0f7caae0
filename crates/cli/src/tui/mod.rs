pub mod field;

use std::collections::HashMap;
use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use squares_core::{Focus, Key, KeyPress, Mode, Modifiers, Navigator, Outcome};
use squares_engine::hue::AUTO_SATURATION;
use squares_engine::{title, Board, CellId, GridId, GridSpec, HueSource, KeyValueStore};

use crate::util;
use field::TextField;

const HUE_NUDGE: f64 = 10.0;
const VALUE_NUDGE: f64 = 5.0;
const MIN_CELL_WIDTH: u16 = 3;
const MAX_CELL_WIDTH: u16 = 8;

#[derive(Debug, Clone, PartialEq)]
enum Target {
    Cell(CellId),
    Code,
}

/// Clickable region recorded by the last draw.
#[derive(Debug, Clone)]
struct Hit {
    rect: Rect,
    target: Target,
}

struct SquaresApp<S, H> {
    board: Board<S, H>,
    nav: Navigator,
    /// Title input of the selected square
    title: TextField,
    code: TextField,
    /// Where keystrokes go; `None` while nothing is selected
    focus: Option<Focus>,
    /// Square the two fields were loaded from
    loaded: Option<CellId>,
    hits: Vec<Hit>,
    /// Top-left square (row, col) drawn for each grid
    scroll: HashMap<GridId, (usize, usize)>,
    status: String,
    should_quit: bool,
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Scroll origin that keeps `cursor` inside a window of `visible` lines.
fn follow(origin: usize, cursor: usize, visible: usize) -> usize {
    if cursor < origin {
        cursor
    } else if visible > 0 && cursor >= origin + visible {
        cursor + 1 - visible
    } else {
        origin
    }
}

/// Map a terminal key event onto the navigator's key vocabulary.
fn translate(key: &KeyEvent) -> KeyPress {
    let mut modifiers = Modifiers {
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    let key = match key.code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers.shift = true;
            Key::Tab
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        // most terminals deliver Ctrl+Backspace as ^H and Ctrl+Enter as ^J
        KeyCode::Char('h' | 'H') if modifiers.ctrl => Key::Backspace,
        KeyCode::Char('j' | 'J') if modifiers.ctrl => Key::Enter,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    KeyPress::new(key, modifiers)
}

impl<S: KeyValueStore, H: HueSource> SquaresApp<S, H> {
    fn new(board: Board<S, H>) -> Self {
        Self {
            board,
            nav: Navigator::new(),
            title: TextField::default(),
            code: TextField::default(),
            focus: None,
            loaded: None,
            hits: Vec::new(),
            scroll: HashMap::new(),
            status: String::new(),
            should_quit: false,
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q' | 'Q'))
        {
            self.should_quit = true;
            return;
        }

        let press = translate(&key);
        match self.focus {
            None => self.key_unselected(press),
            Some(Focus::Title) => self.key_title(&key, press),
            Some(Focus::CodeEditor) => self.key_code(&key, press),
        }
    }

    /// Any navigation key starts at the first square of the main grid.
    fn key_unselected(&mut self, press: KeyPress) {
        if !(press.key.is_arrow() || matches!(press.key, Key::Tab | Key::Enter)) {
            return;
        }
        let first = self
            .board
            .grids()
            .grids()
            .next()
            .and_then(|g| self.board.id_of(&g.id, 0, 0));
        if let Some(cell) = first {
            let out = self.nav.click(&mut self.board, cell);
            self.apply(out);
        }
    }

    fn key_title(&mut self, key: &KeyEvent, press: KeyPress) {
        let out = self.nav.title_key(&mut self.board, press, self.title.caret());
        if out.handled {
            self.apply(out);
            return;
        }

        let m = press.modifiers;
        let changed = match key.code {
            KeyCode::Char(c) if !m.ctrl && !m.alt => {
                self.title.insert(c);
                true
            }
            KeyCode::Backspace if !m.ctrl => self.title.backspace(),
            KeyCode::Left => {
                self.title.left();
                false
            }
            KeyCode::Right => {
                self.title.right();
                false
            }
            KeyCode::Home => {
                self.title.home();
                false
            }
            KeyCode::End => {
                self.title.end();
                false
            }
            _ => false,
        };
        if changed {
            let text = self.title.text();
            let out = self.nav.title_input(&mut self.board, &text);
            self.apply(out);
        }
    }

    fn key_code(&mut self, key: &KeyEvent, press: KeyPress) {
        if press.modifiers.alt && self.nudge_color(press.key) {
            return;
        }

        let out = self.nav.code_key(&mut self.board, press);
        if out.handled {
            self.apply(out);
            return;
        }

        let m = press.modifiers;
        let changed = match key.code {
            KeyCode::Char(c) if !m.ctrl && !m.alt => {
                self.code.insert(c);
                true
            }
            KeyCode::Enter if !m.ctrl => {
                self.code.insert('\n');
                true
            }
            KeyCode::Tab => {
                self.code.insert_str("  ");
                true
            }
            KeyCode::Backspace if !m.ctrl => self.code.backspace(),
            KeyCode::Left => {
                self.code.left();
                false
            }
            KeyCode::Right => {
                self.code.right();
                false
            }
            KeyCode::Home => {
                self.code.home();
                false
            }
            KeyCode::End => {
                self.code.end();
                false
            }
            _ => false,
        };
        if changed {
            let text = self.code.text();
            let out = self.nav.code_input(&mut self.board, &text);
            self.apply(out);
        }
    }

    /// Alt+Left/Right turn the hue, Alt+Up/Down raise or lower the value.
    fn nudge_color(&mut self, key: Key) -> bool {
        let Some(cell) = self.nav.selected() else {
            return false;
        };
        let color = self.board.color(cell);
        let mut next = match key {
            Key::Left => color.with_hue_shift(-HUE_NUDGE),
            Key::Right => color.with_hue_shift(HUE_NUDGE),
            Key::Up => color.with_value_shift(VALUE_NUDGE),
            Key::Down => color.with_value_shift(-VALUE_NUDGE),
            _ => return false,
        };
        // a gray square shows no hue
        if matches!(key, Key::Left | Key::Right) && next.s == 0.0 {
            next.s = AUTO_SATURATION;
        }
        let out = self.nav.color_input(&mut self.board, next);
        self.apply(out);
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);
        let Some(target) = self
            .hits
            .iter()
            .find(|hit| hit.rect.contains(pos))
            .map(|hit| hit.target.clone())
        else {
            return;
        };

        match target {
            Target::Cell(cell) => {
                let out = if title::is_button(&self.board.title(&cell)) {
                    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
                    self.nav.click_button(&mut self.board, cell, shift)
                } else {
                    self.nav.click(&mut self.board, cell)
                };
                self.apply(out);
            }
            Target::Code => {
                let out = self.nav.enter_code();
                if out.handled {
                    self.focus = Some(Focus::CodeEditor);
                }
                self.apply(out);
            }
        }
    }

    /// Bring the host in line with what the navigator did.
    fn apply(&mut self, out: Outcome) {
        if let Some(label) = &out.pressed {
            self.status = format!("pressed [{}]", label);
        }
        if let Some(page) = &out.page {
            let shown = if page.is_empty() { "0" } else { page.as_str() };
            self.status = format!("page {}", shown);
        }
        if let Some(color) = out.auto_color {
            self.status = format!("auto color {}", color.to_hex());
        }

        let selected = self.nav.selected().cloned();
        if selected != self.loaded || out.cleared.is_some() {
            self.reload(selected);
        }

        match out.focus {
            Some(Focus::Title) => {
                self.title.select_all();
                self.focus = Some(Focus::Title);
            }
            Some(Focus::CodeEditor) => {
                self.code.end();
                self.focus = Some(Focus::CodeEditor);
            }
            None => {}
        }
        if self.nav.mode() == Mode::Unselected {
            self.focus = None;
        }
    }

    fn reload(&mut self, cell: Option<CellId>) {
        match &cell {
            Some(c) => {
                self.title.load(&self.board.title(c));
                self.code = TextField::new(&self.board.code(c));
            }
            None => {
                self.title = TextField::default();
                self.code = TextField::default();
            }
        }
        self.loaded = cell;
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
        let panes = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let mut hits = Vec::new();
        let mut scroll = std::mem::take(&mut self.scroll);
        self.draw_title_bar(frame, rows[0]);
        if let Some(main) = self.board.grids().grids().next() {
            self.draw_grid(frame, panes[0], main, &mut scroll, &mut hits);
        }
        self.draw_editor(frame, panes[1], &mut scroll, &mut hits);
        self.draw_status(frame, rows[2]);
        self.scroll = scroll;
        self.hits = hits;
    }

    fn draw_title_bar(&self, frame: &mut Frame, area: Rect) {
        let selected = self
            .nav
            .selected()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mode = match self.nav.mode() {
            Mode::Unselected => "no selection",
            Mode::EditingTitle => "title",
            Mode::EditingCode => "code",
        };
        let title = format!(" squares | {} | {} ", selected, mode);
        let para = Paragraph::new(Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .style(Style::default().bg(Color::Cyan));
        frame.render_widget(para, area);
    }

    /// Draw the window of `spec` that fits `area`, scrolled so the selected
    /// square stays on screen.
    fn draw_grid(
        &self,
        frame: &mut Frame,
        area: Rect,
        spec: &GridSpec,
        scroll: &mut HashMap<GridId, (usize, usize)>,
        hits: &mut Vec<Hit>,
    ) {
        let page = self.board.page(&spec.id);
        let label = if page.is_empty() {
            format!(" {} ", spec.id)
        } else {
            format!(" {} @{} ", spec.id, page)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(label);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cw = (inner.width / to_u16(spec.cols.max(1))).clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);
        let visible_rows = inner.height as usize;
        let visible_cols = (inner.width / cw) as usize;

        let (mut top, mut left) = scroll.get(&spec.id).copied().unwrap_or_default();
        top = top.min(spec.rows.saturating_sub(visible_rows));
        left = left.min(spec.cols.saturating_sub(visible_cols));
        if let Some(sel) = self.nav.selected().filter(|c| c.grid == spec.id) {
            top = follow(top, sel.row, visible_rows);
            left = follow(left, sel.col, visible_cols);
        }
        scroll.insert(spec.id.clone(), (top, left));

        let bottom = spec.rows.min(top + visible_rows);
        let right = spec.cols.min(left + visible_cols);
        let mut lines: Vec<Line> = Vec::with_capacity(bottom - top);
        for row in top..bottom {
            let y = inner.y + to_u16(row - top);
            let mut spans = Vec::with_capacity(right - left);
            for col in left..right {
                let x = inner.x + to_u16(col - left) * cw;
                let Some(id) = self.board.grids().id_of(&spec.id, &page, row, col) else {
                    continue;
                };
                if self.focus == Some(Focus::Title) && self.nav.selection().is_selected(&id) {
                    let text = self.title.text();
                    let before: String = text.chars().take(self.title.cursor()).collect();
                    let offset = to_u16(util::display_width(&before)).min(cw - 1);
                    frame.set_cursor_position(Position::new(x + offset, y));
                }
                spans.push(self.cell_span(&id, cw as usize));
                hits.push(Hit { rect: Rect::new(x, y, cw, 1), target: Target::Cell(id) });
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn cell_span(&self, id: &CellId, width: usize) -> Span<'static> {
        let square = self.board.square(id);
        let selected = self.nav.selection().is_selected(id);
        let editing = selected && self.focus == Some(Focus::Title);

        // the square being edited shows the live input text
        let button = if editing { None } else { square.button_label() };
        let label = if editing {
            util::pad_right(&self.title.text(), width)
        } else if let Some(button) = button {
            util::pad_center(button, width)
        } else if square.is_short() {
            util::pad_center(&square.title, width)
        } else {
            util::pad_right(&square.title, width)
        };

        let (r, g, b) = square.color.to_rgb();
        let fg = if square.color.v < 50.0 { Color::White } else { Color::Black };
        let mut style = Style::default().fg(fg).bg(Color::Rgb(r, g, b));
        if button.is_some() {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(label, style)
    }

    fn draw_editor(
        &self,
        frame: &mut Frame,
        area: Rect,
        scroll: &mut HashMap<GridId, (usize, usize)>,
        hits: &mut Vec<Hit>,
    ) {
        let side: Vec<&GridSpec> = self.board.grids().grids().skip(1).collect();
        let mut constraints: Vec<Constraint> = side
            .iter()
            .map(|g| Constraint::Length(to_u16(g.rows).saturating_add(2)))
            .collect();
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(3));
        let chunks = Layout::vertical(constraints).split(area);

        for (spec, chunk) in side.iter().zip(chunks.iter()) {
            self.draw_grid(frame, *chunk, spec, scroll, hits);
        }
        self.draw_code(frame, chunks[side.len()], hits);
        self.draw_swatch(frame, chunks[side.len() + 1]);
    }

    fn draw_code(&self, frame: &mut Frame, area: Rect, hits: &mut Vec<Hit>) {
        let focused = self.focus == Some(Focus::CodeEditor);
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" code ");
        let inner = block.inner(area);

        let text = self.code.text();
        let lines: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
        hits.push(Hit { rect: inner, target: Target::Code });

        if focused {
            let (line, col) = self.code.cursor_line_col();
            let (line, col) = (to_u16(line), to_u16(col));
            if line < inner.height && col < inner.width {
                frame.set_cursor_position(Position::new(inner.x + col, inner.y + line));
            }
        }
    }

    fn draw_swatch(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" color ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(cell) = self.nav.selected() else {
            return;
        };
        let color = self.board.color(cell);
        let (r, g, b) = color.to_rgb();
        let fg = if color.v < 50.0 { Color::White } else { Color::Black };
        let label = format!(
            " {}  h{:.0} s{:.0} v{:.0}",
            color.to_hex(),
            color.h,
            color.s,
            color.v
        );
        let para = Paragraph::new(label).style(Style::default().fg(fg).bg(Color::Rgb(r, g, b)));
        frame.render_widget(para, inner);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let left = format!(" {}", self.status);
        let right = match self.focus {
            None => "arrows: select  Ctrl+Q: quit ",
            Some(Focus::Title) => "Tab/arrows: move  Ctrl+Enter: code  Esc: deselect  Ctrl+Q: quit ",
            Some(Focus::CodeEditor) => "Ctrl+arrows: move  Alt+arrows: color  Esc: title  Ctrl+Q: quit ",
        };

        let padding = (area.width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

        let para = Paragraph::new(Line::from(vec![Span::styled(
            status,
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        )]))
        .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(para, area);
    }
}

/// Run the interactive editor until Ctrl+Q.
pub fn run<S: KeyValueStore, H: HueSource>(board: Board<S, H>) -> Result<(), String> {
    let mut app = SquaresApp::new(board);

    terminal::enable_raw_mode()
        .map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    stdout()
        .execute(EnableMouseCapture)
        .map_err(|e| format!("failed to enable mouse capture: {}", e))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            let event = event::read().map_err(|e| format!("event read error: {}", e))?;
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
