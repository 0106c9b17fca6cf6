use std::mem;
use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::config::Config;
use crate::error::ClientError;
use crate::form::FormField;
use crate::models::HEADERS;
use crate::session::Session;

use super::forms::{build_line, cursor_offset, error_line, FIELDS};
use super::helpers::{centered_rect, key_hints};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Form panel: one line per field, the error line, plus the borders.
const FORM_HEIGHT: u16 = FIELDS.len() as u16 + 3;
/// Rows skipped by PageUp/PageDown in the table.
const PAGE_STEP: isize = 10;

/// Which part of the screen receives key presses.
enum Mode {
    Table,
    Form,
    /// Destination picker for the image export.
    ImagePrompt(PathPrompt),
}

struct PathPrompt {
    path: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state for the TUI.
pub struct App {
    session: Session,
    config: Config,
    mode: Mode,
    status: Option<StatusMessage>,
    last_export: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            session: Session::new(),
            config,
            mode: Mode::Table,
            status: None,
            last_export: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Table);

        self.mode = match mode {
            Mode::Table => self.handle_table_key(code, &mut exit),
            Mode::Form => self.handle_form_key(code),
            Mode::ImagePrompt(prompt) => self.handle_image_prompt(code, prompt),
        };

        exit
    }

    fn handle_table_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let view = self.session.view_mut();
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if view.marked_count() > 0 {
                    view.clear_marks();
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => view.move_cursor(-1),
            KeyCode::Down => view.move_cursor(1),
            KeyCode::PageUp => view.move_cursor(-PAGE_STEP),
            KeyCode::PageDown => view.move_cursor(PAGE_STEP),
            KeyCode::Home => view.select_first(),
            KeyCode::End => view.select_last(),
            KeyCode::Char(' ') => view.toggle_mark(),
            KeyCode::Char('a') | KeyCode::Char('+') | KeyCode::Tab => {
                self.clear_status();
                return Mode::Form;
            }
            KeyCode::Char('-') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.export_spreadsheet(),
            KeyCode::Char('i') | KeyCode::Char('I') => {
                if self.session.store().is_empty() {
                    self.set_status(ClientError::EmptyData.to_string(), StatusKind::Error);
                } else {
                    self.clear_status();
                    return Mode::ImagePrompt(PathPrompt {
                        path: self.config.image_path.display().to_string(),
                    });
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => self.open_last_export(),
            _ => {}
        }
        Mode::Table
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Mode {
        let form = self.session.form_mut();
        match code {
            KeyCode::Esc => return Mode::Table,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Left | KeyCode::Right if form.active == FormField::Status => {
                form.toggle_status();
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.session.submit_form() {
                Ok(record) => {
                    self.set_status(format!("Cliente {} incluído.", record.name), StatusKind::Info);
                }
                Err(err) => self.set_status(err.to_string(), StatusKind::Error),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Form
    }

    fn handle_image_prompt(&mut self, code: KeyCode, mut prompt: PathPrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Exportação cancelada.", StatusKind::Info);
                Mode::Table
            }
            KeyCode::Backspace => {
                prompt.path.pop();
                Mode::ImagePrompt(prompt)
            }
            KeyCode::Enter => {
                let path = prompt.path.trim();
                if path.is_empty() {
                    self.set_status("Exportação cancelada.", StatusKind::Info);
                } else {
                    self.export_image(Path::new(path));
                }
                Mode::Table
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                prompt.path.push(ch);
                Mode::ImagePrompt(prompt)
            }
            _ => Mode::ImagePrompt(prompt),
        }
    }

    fn delete_selected(&mut self) {
        match self.session.delete_selected() {
            Ok(1) => self.set_status("1 cliente excluído.", StatusKind::Info),
            Ok(removed) => {
                self.set_status(format!("{removed} clientes excluídos."), StatusKind::Info)
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn export_spreadsheet(&mut self) {
        let path = self.config.spreadsheet_path.clone();
        match self.session.export_spreadsheet(&path) {
            Ok(()) => {
                self.set_status("Planilha atualizada com sucesso!", StatusKind::Info);
                self.last_export = Some(path);
            }
            Err(err) => self.report_export_failure(&err, &path),
        }
    }

    fn export_image(&mut self, path: &Path) {
        match self.session.export_image(path) {
            Ok(()) => {
                self.set_status(
                    format!(
                        "Tabela salva como imagem com sucesso! Arquivo salvo em: {}",
                        path.display()
                    ),
                    StatusKind::Info,
                );
                self.last_export = Some(path.to_path_buf());
            }
            Err(err) => self.report_export_failure(&err, path),
        }
    }

    /// Footer message for a failed export. Write failures name the target
    /// file; the previous export (if any) stays the one `o` opens.
    fn report_export_failure(&mut self, err: &ClientError, path: &Path) {
        if err.is_write_failure() {
            self.set_status(format!("{err} ({})", path.display()), StatusKind::Error);
        } else {
            self.set_status(err.to_string(), StatusKind::Error);
        }
    }

    fn open_last_export(&mut self) {
        let Some(path) = self.last_export.clone() else {
            self.set_status("Nenhum arquivo exportado ainda.", StatusKind::Error);
            return;
        };
        match open_path(&path) {
            Ok(()) => self.set_status(format!("Abrindo {}.", path.display()), StatusKind::Info),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to open export");
                self.set_status(
                    format!("Não foi possível abrir {}: {err}", path.display()),
                    StatusKind::Error,
                );
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Mode::ImagePrompt(prompt) = &self.mode {
            self.draw_image_prompt(frame, area, prompt);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let focused = matches!(self.mode, Mode::Form);
        let form = self.session.form();
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title("Cliente")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        let mut lines: Vec<Line> = FIELDS
            .iter()
            .map(|field| build_line(form, *field, focused))
            .collect();
        lines.push(error_line(form));
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if focused {
            if let Some(offset) = cursor_offset(form) {
                let row = FIELDS
                    .iter()
                    .position(|field| *field == form.active)
                    .unwrap_or(0);
                frame.set_cursor_position((inner.x + offset as u16, inner.y + row as u16));
            }
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let view = self.session.view();
        let title = if view.marked_count() > 0 {
            format!("Clientes ({}) - {} marcados", view.len(), view.marked_count())
        } else {
            format!("Clientes ({})", view.len())
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        if view.is_empty() {
            let message = Paragraph::new("Nenhum cliente cadastrado. Pressione 'a' para incluir.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(HEADERS.to_vec()).style(Style::default().add_modifier(Modifier::BOLD));
        let rows = view.rows().iter().enumerate().map(|(idx, row)| {
            let style = if view.is_marked(idx) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(row.cells().to_vec()).style(style)
        });
        let widths = [
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(view.cursor());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match self.mode {
            Mode::Table => key_hints(&[
                ("↑↓", "Navegar"),
                ("Space", "Marcar"),
                ("a", "Incluir"),
                ("-", "Excluir"),
                ("s", "Atualizar Planilha"),
                ("i", "Salvar Tabela"),
                ("o", "Abrir"),
                ("q", "Sair"),
            ]),
            Mode::Form => key_hints(&[
                ("Tab", "Próximo campo"),
                ("←→", "Status"),
                ("Enter", "Incluir"),
                ("Esc", "Tabela"),
            ]),
            Mode::ImagePrompt(_) => key_hints(&[("Enter", "Salvar"), ("Esc", "Cancelar")]),
        }
    }

    fn draw_image_prompt(&self, frame: &mut Frame, area: Rect, prompt: &PathPrompt) {
        let popup_area = centered_rect(60, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Salvar imagem como")
            .borders(Borders::ALL);
        let inner = block.inner(popup_area);

        let label = "Arquivo: ";
        let lines = vec![
            Line::from(vec![Span::raw(label), Span::raw(prompt.path.clone())]),
            Line::from(""),
            Line::from(Span::styled(
                "PNG, JPG ou BMP conforme a extensão.",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);

        let cursor_x = inner.x + (label.len() + prompt.path.chars().count()) as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::{tempdir, TempDir};

    fn new_app() -> (App, TempDir) {
        let dir = tempdir().unwrap();
        let config = Config {
            spreadsheet_path: dir.path().join("clientes_atualizados.xlsx"),
            image_path: dir.path().join("clientes.png"),
            log_file: dir.path().join("client-manager.log"),
            log_level: "info".to_string(),
        };
        (App::new(config), dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn add_client(app: &mut App, name: &str, code: &str, tax_id: &str) {
        type_text(app, name);
        app.handle_key(KeyCode::Tab);
        type_text(app, code);
        app.handle_key(KeyCode::Tab);
        type_text(app, tax_id);
        app.handle_key(KeyCode::Enter);
    }

    fn status(app: &App) -> Option<(&str, StatusKind)> {
        app.status.as_ref().map(|s| (s.text.as_str(), s.kind))
    }

    #[test]
    fn test_form_adds_clients_and_resets() {
        let (mut app, _dir) = new_app();
        app.handle_key(KeyCode::Char('a'));
        assert!(matches!(app.mode, Mode::Form));

        add_client(&mut app, "Acme", "001", "12.345");
        assert_eq!(app.session().store().len(), 1);
        assert_eq!(status(&app), Some(("Cliente Acme incluído.", StatusKind::Info)));
        assert!(app.session().form().name.is_empty());
        assert_eq!(app.session().form().active, FormField::Name);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session().store().len(), 1);
        assert_eq!(
            status(&app),
            Some(("Todos os campos devem ser preenchidos", StatusKind::Error))
        );
    }

    #[test]
    fn test_status_selector_toggles_with_arrows() {
        let (mut app, _dir) = new_app();
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.session().form().active, FormField::Status);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Tab);
        add_client(&mut app, "Beta", "002", "99");

        let rows = app.session().view().rows();
        assert_eq!(rows[0].cells()[3], "Não Ativo");
    }

    #[test]
    fn test_delete_needs_a_selection() {
        let (mut app, _dir) = new_app();
        app.handle_key(KeyCode::Char('a'));
        add_client(&mut app, "X", "1", "1");
        add_client(&mut app, "Y", "2", "2");
        add_client(&mut app, "X", "1", "1");
        app.handle_key(KeyCode::Esc);

        app.handle_key(KeyCode::Char('-'));
        assert_eq!(
            status(&app),
            Some(("Selecione um cliente para excluir", StatusKind::Error))
        );
        assert_eq!(app.session().store().len(), 3);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Delete);
        assert_eq!(status(&app), Some(("2 clientes excluídos.", StatusKind::Info)));
        let names: Vec<_> = app.session().snapshot().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Y"]);
    }

    #[test]
    fn test_image_export_refuses_empty_table_without_prompt() {
        let (mut app, dir) = new_app();
        app.handle_key(KeyCode::Char('i'));

        assert!(matches!(app.mode, Mode::Table));
        assert_eq!(status(&app).map(|(_, kind)| kind), Some(StatusKind::Error));
        assert!(!dir.path().join("clientes.png").exists());
    }

    #[test]
    fn test_image_prompt_writes_to_chosen_path() {
        let (mut app, dir) = new_app();
        app.handle_key(KeyCode::Char('a'));
        add_client(&mut app, "Acme", "001", "12.345");
        app.handle_key(KeyCode::Esc);

        app.handle_key(KeyCode::Char('i'));
        let default_path = dir.path().join("clientes.png");
        match &app.mode {
            Mode::ImagePrompt(prompt) => {
                assert_eq!(prompt.path, default_path.display().to_string())
            }
            _ => panic!("expected the destination prompt"),
        }
        for _ in 0..4 {
            app.handle_key(KeyCode::Backspace);
        }
        type_text(&mut app, ".bmp");
        app.handle_key(KeyCode::Enter);

        let chosen = dir.path().join("clientes.bmp");
        assert!(chosen.exists());
        assert!(!default_path.exists());
        assert_eq!(app.last_export.as_deref(), Some(chosen.as_path()));
    }

    #[test]
    fn test_spreadsheet_key_writes_configured_path() {
        let (mut app, dir) = new_app();
        app.handle_key(KeyCode::Char('s'));

        assert!(dir.path().join("clientes_atualizados.xlsx").exists());
        assert_eq!(
            status(&app),
            Some(("Planilha atualizada com sucesso!", StatusKind::Info))
        );
    }

    #[test]
    fn test_draw_renders_headers_and_rows() {
        let (mut app, _dir) = new_app();
        app.handle_key(KeyCode::Char('a'));
        add_client(&mut app, "Acme", "001", "12.345");
        app.handle_key(KeyCode::Esc);

        let mut terminal = Terminal::new(TestBackend::new(140, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Clientes (1)"));
        assert!(screen.contains("CNPJ"));
        assert!(screen.contains("Acme"));
        assert!(screen.contains("Atualizar Planilha"));
    }

    #[test]
    fn test_write_failure_names_the_target_file() {
        let (mut app, dir) = new_app();
        let target = dir.path().join("missing").join("clientes.xlsx");
        app.config.spreadsheet_path = target.clone();
        app.handle_key(KeyCode::Char('s'));

        let (text, kind) = status(&app).unwrap();
        assert_eq!(kind, StatusKind::Error);
        assert!(text.starts_with("Não foi possível atualizar a planilha"));
        assert!(text.ends_with(&format!("({})", target.display())));
        assert!(app.last_export.is_none());
    }

    #[test]
    fn test_form_panel_shows_submit_error() {
        let (mut app, _dir) = new_app();
        app.handle_key(KeyCode::Char('a'));
        type_text(&mut app, "Acme");
        app.handle_key(KeyCode::Enter);
        assert!(app.session().store().is_empty());

        let mut terminal = Terminal::new(TestBackend::new(140, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let form_rows: String = (0..FORM_HEIGHT)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        assert!(form_rows.contains("Todos os campos devem ser preenchidos"));

        app.handle_key(KeyCode::Char('x'));
        assert!(app.session().form().error.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _dir) = new_app();
        assert!(app.handle_key(KeyCode::Char('q')));

        let (mut app, _dir) = new_app();
        app.handle_key(KeyCode::Char('a'));
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Esc);
        assert!(app.handle_key(KeyCode::Esc));
    }
}
