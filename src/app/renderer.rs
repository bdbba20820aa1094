use std::{io::Write, time::Duration};

use crossterm::{
    cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    generators::{BuildEvent, MazeObserver},
    maze::{Direction, Maze},
};

/// Character set used to draw walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyphs {
    /// `_` and `|`, readable in any terminal.
    Ascii,
    /// Eighth-block characters.
    #[default]
    Block,
}

impl Glyphs {
    /// Drawn under a cell whose south wall is present.
    pub fn floor(self) -> char {
        match self {
            Glyphs::Ascii => '_',
            Glyphs::Block => '▁',
        }
    }

    /// Drawn right of a cell whose east wall is present.
    pub fn post(self) -> char {
        match self {
            Glyphs::Ascii => '|',
            Glyphs::Block => '▕',
        }
    }

    /// Fills cells that have no open side yet, when colour is off.
    pub fn shade(self) -> char {
        match self {
            Glyphs::Ascii => '#',
            Glyphs::Block => '▒',
        }
    }
}

/// What happens between animation frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// Draw as fast as possible.
    None,
    /// Sleep after each frame.
    Delay(Duration),
    /// Wait for Enter on stdin after each frame.
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub glyphs: Glyphs,
    /// Shade fully walled cells with a background colour instead of a glyph.
    pub color: bool,
    /// Draw a frame before every accepted edge, not only the finished maze.
    pub animate: bool,
    pub pacing: Pacing,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            glyphs: Glyphs::Block,
            color: true,
            animate: true,
            pacing: Pacing::Delay(Duration::from_millis(10)),
        }
    }
}

/// Draws maze frames in place: the screen is cleared once, then every frame starts at the
/// top-left corner and overwrites the previous one.
pub struct Renderer<W: Write> {
    out: W,
    options: RenderOptions,
    /// Whether the screen has been cleared yet
    cleared: bool,
    frames: usize,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthChar;
            let glyphs = options.glyphs;
            for c in [glyphs.floor(), glyphs.post(), glyphs.shade()] {
                assert_eq!(
                    c.width(),
                    Some(1),
                    "Each glyph must occupy exactly one character width."
                );
            }
        }
        Self {
            out,
            options,
            cleared: false,
            frames: 0,
        }
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draws the whole maze and flushes.
    pub fn draw_frame(&mut self, maze: &Maze) -> std::io::Result<()> {
        if !self.cleared {
            queue!(self.out, terminal::Clear(ClearType::All))?;
            self.cleared = true;
        }
        queue!(self.out, cursor::MoveTo(0, 0))?;

        let glyphs = self.options.glyphs;
        queue!(self.out, style::Print(' '))?;
        for _ in 1..maze.width() * 2 {
            queue!(self.out, style::Print(glyphs.floor()))?;
        }
        queue!(self.out, style::Print("\n"))?;

        for y in 0..maze.height() {
            queue!(self.out, style::Print(glyphs.post()))?;
            for x in 0..maze.width() {
                let [bottom, right] = cell_chars(maze, (x, y), glyphs);
                if !maze[(x, y)].is_empty() {
                    queue!(self.out, style::Print(bottom), style::Print(right))?;
                } else if self.options.color {
                    let text = format!("{}{}", bottom, right);
                    queue!(self.out, style::PrintStyledContent(text.on(Color::Grey)))?;
                } else {
                    let shade = glyphs.shade();
                    queue!(self.out, style::Print(shade), style::Print(shade))?;
                }
            }
            queue!(self.out, style::Print("\n"))?;
        }
        // Erase anything left below the maze, such as the step prompt
        queue!(self.out, terminal::Clear(ClearType::FromCursorDown))?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    fn pause(&mut self) -> std::io::Result<()> {
        match self.options.pacing {
            Pacing::None => {}
            Pacing::Delay(delay) => {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
            Pacing::Step => {
                queue!(self.out, style::Print("Press Enter to continue..."))?;
                self.out.flush()?;
                // Wait for Enter key press
                std::io::stdin().read_line(&mut String::new())?;
            }
        }
        Ok(())
    }
}

/// The two characters drawn for a cell: its south wall, then its east wall.
///
/// An open east side is drawn as a floor when neither this cell nor its east neighbor is open
/// south, so the floor line runs unbroken under the passage.
pub fn cell_chars(maze: &Maze, coord: (usize, usize), glyphs: Glyphs) -> [char; 2] {
    let cell = maze[coord];
    let bottom = if cell.contains(Direction::South) {
        ' '
    } else {
        glyphs.floor()
    };
    let right = if !cell.contains(Direction::East) {
        glyphs.post()
    } else {
        let joined = match maze.neighbor(coord, Direction::East) {
            Some(east) => cell | maze[east],
            None => cell,
        };
        if joined.contains(Direction::South) {
            ' '
        } else {
            glyphs.floor()
        }
    };
    [bottom, right]
}

impl<W: Write> MazeObserver for Renderer<W> {
    fn on_event(&mut self, event: &BuildEvent, maze: &Maze) -> std::io::Result<()> {
        match event {
            BuildEvent::Accepting { .. } => {
                if self.options.animate {
                    self.draw_frame(maze)?;
                    self.pause()?;
                }
            }
            BuildEvent::Finished => {
                self.draw_frame(maze)?;
                tracing::debug!(frames = self.frames, "Rendered final frame");
            }
        }
        Ok(())
    }
}
