//! Editor state for the TUI.
//!
//! Holds the four parameter fields as text (exactly what the user typed),
//! the one shape currently on screen, and any open dialog. Everything here
//! is terminal-free so it can be driven from tests.

use std::path::{Path, PathBuf};

use blobby::{
    generate_shape, parse_line_width, shape_to_svg, step_value, Field, RenderStyle, Rng, Shape,
    ShapeParams,
};
use image::RgbaImage;

use crate::config::Config;
use crate::render::{rasterize, save_png, with_png_extension};

/// Kind of modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Info,
}

/// A modal message; any key dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn error(title: &str, message: impl Into<String>) -> Self {
        Self { kind: DialogKind::Error, title: title.to_string(), message: message.into() }
    }

    fn info(title: &str, message: impl Into<String>) -> Self {
        Self { kind: DialogKind::Info, title: title.to_string(), message: message.into() }
    }
}

/// What key presses are currently feeding.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Navigating fields and running commands
    Normal,
    /// Typing into the focused field
    Editing { buffer: String },
    /// Typing an export path
    SavePrompt { buffer: String },
}

/// Application state for the TUI.
pub struct App {
    /// Field text in `Field::all()` order
    texts: Vec<String>,
    /// Index of the focused field
    pub focus: usize,
    /// The curve on screen, if any generation has succeeded
    shape: Option<Shape>,
    /// Seed the current shape was generated from
    seed: Option<u64>,
    /// Line width the current shape is drawn with
    line_width: f64,
    /// Source of per-shape seeds
    seeds: Rng,
    /// Render style and export directory
    config: Config,
    pub mode: Mode,
    pub dialog: Option<Dialog>,
    /// Set when the preview image must be re-rendered
    pub needs_image_update: bool,
    pub should_quit: bool,
}

impl App {
    /// Create the editor and draw the first shape.
    pub fn new(config: &Config, seed: u64) -> Self {
        let texts = Field::all()
            .iter()
            .map(|&f| config.params.field_text(f))
            .collect();

        let mut app = App {
            texts,
            focus: 0,
            shape: None,
            seed: None,
            line_width: config.params.line_width,
            seeds: Rng::new(seed),
            config: config.clone(),
            mode: Mode::Normal,
            dialog: None,
            needs_image_update: false,
            should_quit: false,
        };

        app.refresh();
        app
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn style(&self) -> &RenderStyle {
        &self.config.render
    }

    pub fn focused_field(&self) -> Field {
        Field::all()[self.focus]
    }

    /// Current text of a field.
    pub fn text(&self, field: Field) -> &str {
        &self.texts[field_index(field)]
    }

    /// Replace the text of a field without acting on it.
    pub fn set_text(&mut self, field: Field, text: impl Into<String>) {
        self.texts[field_index(field)] = text.into();
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.texts.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 { self.texts.len() - 1 } else { self.focus - 1 };
    }

    /// Regenerate the shape from all four fields.
    ///
    /// On invalid input an error dialog opens and the previous shape stays.
    /// Returns whether a new shape was drawn.
    pub fn refresh(&mut self) -> bool {
        let params = match ShapeParams::parse(
            self.text(Field::MinVertices),
            self.text(Field::MaxVertices),
            self.text(Field::Scatter),
            self.text(Field::LineWidth),
        ) {
            Ok(params) => params,
            Err(e) => {
                self.dialog = Some(Dialog::error("Invalid input", e.to_string()));
                return false;
            }
        };

        let seed = self.seeds.next_u64();
        match generate_shape(&params, &mut Rng::new(seed)) {
            Ok(shape) => {
                log::debug!("Generated {} vertices from seed {}", shape.vertex_count, seed);
                self.shape = Some(shape);
                self.seed = Some(seed);
                self.line_width = params.line_width;
                self.needs_image_update = true;
                true
            }
            Err(e) => {
                self.dialog = Some(Dialog::error("Generation failed", e.to_string()));
                false
            }
        }
    }

    /// Redraw the current curve with the line width field; the curve itself
    /// is kept.
    pub fn adjust(&mut self) -> bool {
        match parse_line_width(self.text(Field::LineWidth)) {
            Ok(width) => {
                if self.shape.is_some() && width != self.line_width {
                    self.line_width = width;
                    self.needs_image_update = true;
                }
                true
            }
            Err(e) => {
                self.dialog = Some(Dialog::error("Invalid input", e.to_string()));
                false
            }
        }
    }

    /// Increment (`direction > 0`) or decrement the focused field by its
    /// step, then adjust or refresh.
    pub fn step_focused(&mut self, direction: f64) {
        let field = self.focused_field();
        let delta = field.step() * direction.signum();
        if let Some(text) = step_value(self.text(field), delta, field.is_integer()) {
            self.set_text(field, text);
        }
        self.apply(field);
    }

    /// Act on a field change: line width adjusts, the rest regenerate.
    fn apply(&mut self, field: Field) {
        if field == Field::LineWidth {
            self.adjust();
        } else {
            self.refresh();
        }
    }

    pub fn begin_edit(&mut self) {
        let buffer = self.text(self.focused_field()).to_string();
        self.mode = Mode::Editing { buffer };
    }

    pub fn begin_save(&mut self) {
        self.mode = Mode::SavePrompt { buffer: default_export_name() };
    }

    /// Append a typed character to whichever buffer is open.
    pub fn input_char(&mut self, c: char) {
        if let Mode::Editing { buffer } | Mode::SavePrompt { buffer } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Mode::Editing { buffer } | Mode::SavePrompt { buffer } = &mut self.mode {
            buffer.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Finish the open edit or save prompt.
    pub fn commit_input(&mut self) {
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Editing { buffer } => {
                let field = self.focused_field();
                self.set_text(field, buffer);
                self.apply(field);
            }
            Mode::SavePrompt { buffer } => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    return;
                }
                let path = self.config.resolve_output(Path::new(trimmed));
                self.dialog = Some(match self.save_to(&path) {
                    Ok(saved) => Dialog::info("Saved", format!("Image saved to {}", saved.display())),
                    Err(e) => Dialog::error("Save failed", e),
                });
            }
            Mode::Normal => {}
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// SVG of the current shape at the current line width.
    pub fn current_svg(&self) -> Option<String> {
        self.shape
            .as_ref()
            .map(|shape| shape_to_svg(shape, self.line_width, &self.config.render))
    }

    /// Render the current shape with a transparent background.
    pub fn render(&self) -> Result<Option<RgbaImage>, String> {
        match self.current_svg() {
            Some(svg) => rasterize(&svg).map(Some).map_err(|e| e.to_string()),
            None => Ok(None),
        }
    }

    /// Export the current rendering as PNG. Returns the path written.
    pub fn save_to(&self, path: &Path) -> Result<PathBuf, String> {
        let image = self.render()?.ok_or_else(|| "Nothing to save yet".to_string())?;
        let path = with_png_extension(path);
        save_png(&image, &path).map_err(|e| e.to_string())?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

fn field_index(field: Field) -> usize {
    Field::all().iter().position(|&f| f == field).unwrap_or(0)
}

/// Timestamped default export file name.
pub fn default_export_name() -> String {
    chrono::Local::now().format("blob-%Y%m%d-%H%M%S.png").to_string()
}
