//! Line-oriented terminal front end for `ViewController`.
//!
//! Renders whichever view the controller is in, reads one command per line,
//! and prints pending notifications after every action. Input fields offer
//! their current value as the default so a failed action can be retried
//! with Enter; answering `-` empties the field instead.

use std::io::{self, BufRead, Write};

use todo_sync::{Transport, View, ViewController};

/// Answer that empties a prefilled field.
const CLEAR: &str = "-";

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `quit` or end of input.
    pub fn run<T: Transport>(&mut self, vc: &mut ViewController<T>) -> io::Result<()> {
        let mut dirty = true;
        loop {
            if dirty {
                self.render(vc)?;
            }
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            let command = line.trim();
            dirty = match (vc.view(), command) {
                (_, "") => false,
                (_, "quit" | "exit") => break,
                (View::Unauthenticated, "login") => {
                    if !self.read_login_form(vc)? {
                        break;
                    }
                    vc.login();
                    true
                }
                (View::Unauthenticated, "signup") => {
                    if !self.read_login_form(vc)? {
                        break;
                    }
                    vc.signup();
                    true
                }
                (View::Authenticated, "new") => {
                    if !self.read_todo_form(vc)? {
                        break;
                    }
                    vc.create_todo();
                    true
                }
                (View::Authenticated, "refresh") => {
                    vc.refresh();
                    true
                }
                (View::Authenticated, "list") => true,
                (_, other) => {
                    writeln!(self.output, "unknown command: {other}")?;
                    false
                }
            };
            for note in vc.take_notifications() {
                writeln!(self.output, "! {}", note.message)?;
            }
        }
        self.output.flush()
    }

    fn render<T: Transport>(&mut self, vc: &ViewController<T>) -> io::Result<()> {
        writeln!(self.output, "== Todo App ==")?;
        match vc.view() {
            View::Unauthenticated => {
                writeln!(self.output, "Commands: login, signup, quit")?;
            }
            View::Authenticated => {
                writeln!(self.output, "Your Todos")?;
                if vc.todos().is_empty() {
                    writeln!(self.output, "  (none yet)")?;
                }
                for (index, todo) in vc.todos().iter().enumerate() {
                    writeln!(self.output, "{:>3}. {}", index + 1, todo.title)?;
                    if !todo.content.is_empty() {
                        writeln!(self.output, "     {}", todo.content)?;
                    }
                }
                writeln!(self.output, "Commands: new, refresh, list, quit")?;
            }
        }
        Ok(())
    }

    /// Returns false on end of input.
    fn read_login_form<T: Transport>(&mut self, vc: &mut ViewController<T>) -> io::Result<bool> {
        let Some(email) = self.field("Email", &vc.login_form.email, false)? else {
            return Ok(false);
        };
        let Some(password) = self.field("Password", &vc.login_form.password, true)? else {
            return Ok(false);
        };
        vc.login_form.email = email;
        vc.login_form.password = password;
        Ok(true)
    }

    fn read_todo_form<T: Transport>(&mut self, vc: &mut ViewController<T>) -> io::Result<bool> {
        let Some(title) = self.field("Todo Title", &vc.todo_form.title, false)? else {
            return Ok(false);
        };
        let Some(content) = self.field("Todo Content", &vc.todo_form.content, false)? else {
            return Ok(false);
        };
        vc.todo_form.title = title;
        vc.todo_form.content = content;
        Ok(true)
    }

    /// Prompt for a field. An empty answer keeps `current`; `-` clears it.
    ///
    /// Input is read with plain `read_line`, so secret fields still echo.
    /// Their prompt says so and only their default is masked.
    fn field(&mut self, label: &str, current: &str, secret: bool) -> io::Result<Option<String>> {
        let label = if secret {
            format!("{label} (visible as typed)")
        } else {
            label.to_string()
        };
        let prompt = match (current.is_empty(), secret) {
            (true, _) => format!("{label}: "),
            (false, true) => format!("{label} [****, {CLEAR} clears]: "),
            (false, false) => format!("{label} [{current}, {CLEAR} clears]: "),
        };
        Ok(self.prompt(&prompt)?.map(|answer| match answer.as_str() {
            "" => current.to_string(),
            CLEAR => String::new(),
            _ => answer,
        }))
    }

    /// Read one line without its line terminator. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
