use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue, terminal,
};
use quadlife::Grid;
use std::io::{self, Write};

pub enum ConsoleCommand {
    Exit,
    Handled,
}

/// Terminal frontend. Live cells are drawn as `█` in the same orientation as
/// the window: the first grid index runs left to right, the second bottom to top.
pub struct ConsoleRender {
    report: String,
}

impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            report: String::new(),
        })
    }

    pub fn render(&self, grid: &Grid) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for (row, col, alive) in grid.iter() {
            if !alive {
                continue;
            }
            let Some((x, y)) = screen_cell(row, col, grid.size(), (cols, rows)) else {
                continue;
            };
            queue!(stdout, cursor::MoveTo(x, y))?;
            stdout.write_all("█".as_bytes())?;
        }

        // write footer below the grid
        let footer = (grid.size() as u16).min(rows.saturating_sub(1));
        queue!(stdout, cursor::MoveTo(0, footer))?;
        stdout.write_all(self.report.as_bytes())?;

        stdout.flush()
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure an event is present for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            event::Event::Key(KeyEvent {
                code: KeyCode::Enter,
                kind: KeyEventKind::Press,
                ..
            })
            // raw mode swallows SIGINT
            | event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => ConsoleCommand::Exit,
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}

/// Maps grid cell `(row, col)` to a terminal `(column, line)`.
///
/// Terminal lines grow downward, so the second index is flipped to keep +y
/// pointing up. Cells outside the terminal yield `None`.
fn screen_cell(
    row: usize,
    col: usize,
    size: usize,
    (cols, rows): (u16, u16),
) -> Option<(u16, u16)> {
    let line = size.checked_sub(col + 1)?;
    if row >= cols as usize || line >= rows as usize {
        return None;
    }
    Some((row as u16, line as u16))
}

impl Drop for ConsoleRender {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(io::stdout(), cursor::Show) {
            log::error!("failed to show cursor: {e}");
        }
    }
}
