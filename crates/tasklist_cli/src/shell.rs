//! Line-oriented prompt loop over a task service.
//!
//! # Invariants
//! - One command is read and fully executed before the next prompt.
//! - Bad input never ends the loop; only `exit` or end of input does.

use crate::command::{parse_position, Command};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use tasklist_core::{ListError, ServiceError, TaskService, TaskStore};

const COMMAND_PROMPT: &str = "Enter a command (add, list, toggle, delete, help, exit): ";

/// Outcome of prompting for a task position.
enum PositionInput {
    Index(usize),
    Invalid,
    Eof,
}

pub struct Shell<'s, R, W, S: TaskStore> {
    input: R,
    output: W,
    service: &'s mut TaskService<S>,
}

impl<'s, R: BufRead, W: Write, S: TaskStore> Shell<'s, R, W, S> {
    pub fn new(input: R, output: W, service: &'s mut TaskService<S>) -> Self {
        Self {
            input,
            output,
            service,
        }
    }

    /// Runs until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!("event=shell_start module=shell status=ok");
        self.report_load_failure()?;
        loop {
            let Some(line) = self.prompt(COMMAND_PROMPT)? else {
                writeln!(self.output)?;
                break;
            };
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(unknown) => {
                    debug!("event=command module=shell status=rejected word={:?}", unknown.0);
                    writeln!(self.output, "Invalid command.")?;
                    continue;
                }
            };
            debug!("event=command module=shell status=ok name={command}");

            let keep_going = match command {
                Command::Add => self.add()?,
                Command::List => self.list()?,
                Command::Toggle => self.toggle()?,
                Command::Delete => self.delete()?,
                Command::Help => self.help()?,
                Command::Exit => {
                    writeln!(self.output, "Goodbye!")?;
                    false
                }
            };
            if !keep_going {
                break;
            }
        }
        info!("event=shell_stop module=shell status=ok");
        self.output.flush()
    }

    fn add(&mut self) -> io::Result<bool> {
        let Some(title) = self.prompt("Enter a title: ")? else {
            return Ok(false);
        };
        match self.service.add(title.as_str()) {
            Ok(_) => writeln!(self.output, "Added \"{title}\".")?,
            Err(ServiceError::List(ListError::Validation(_))) => {
                writeln!(self.output, "Title cannot be empty.")?
            }
            Err(err) => self.report(&err, format!("Added \"{title}\"."))?,
        }
        Ok(true)
    }

    fn list(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{}", self.service.render())?;
        Ok(true)
    }

    fn toggle(&mut self) -> io::Result<bool> {
        self.list()?;
        let index = match self.read_index("Enter the number of the task to toggle: ")? {
            PositionInput::Index(index) => index,
            PositionInput::Invalid => return Ok(true),
            PositionInput::Eof => return Ok(false),
        };
        match self.service.toggle(index) {
            Ok(completed) => {
                let message = self.toggled_message(index, completed);
                writeln!(self.output, "{message}")?;
            }
            Err(ServiceError::List(ListError::IndexOutOfRange { .. })) => {
                writeln!(self.output, "Invalid task number.")?;
                self.list()?;
            }
            Err(err) => {
                let message = self
                    .service
                    .list()
                    .get(index)
                    .map(|item| self.toggled_message(index, item.is_completed()))
                    .unwrap_or_default();
                self.report(&err, message)?;
            }
        }
        Ok(true)
    }

    fn delete(&mut self) -> io::Result<bool> {
        self.list()?;
        let index = match self.read_index("Enter the number of the task to delete: ")? {
            PositionInput::Index(index) => index,
            PositionInput::Invalid => return Ok(true),
            PositionInput::Eof => return Ok(false),
        };
        match self.service.delete(index) {
            Ok(removed) => writeln!(self.output, "Deleted \"{}\".", removed.title())?,
            Err(ServiceError::List(ListError::IndexOutOfRange { .. })) => {
                writeln!(self.output, "Invalid task number.")?
            }
            Err(err) => self.report(&err, "Deleted.".to_string())?,
        }
        Ok(true)
    }

    fn help(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Commands:")?;
        for command in Command::ALL {
            writeln!(self.output, "  {:<7} {}", command.as_str(), command.description())?;
        }
        Ok(true)
    }

    fn toggled_message(&self, index: usize, completed: bool) -> String {
        let title = self
            .service
            .list()
            .get(index)
            .map(|item| item.title())
            .unwrap_or_default();
        if completed {
            format!("Marked \"{title}\" as done.")
        } else {
            format!("Marked \"{title}\" as not done.")
        }
    }

    /// Prints the applied change followed by a save warning.
    fn report(&mut self, err: &ServiceError, applied: String) -> io::Result<()> {
        if !applied.is_empty() {
            writeln!(self.output, "{applied}")?;
        }
        writeln!(self.output, "Warning: {err}")
    }

    /// Reads a 1-based position and converts it to a 0-based index.
    fn read_index(&mut self, label: &str) -> io::Result<PositionInput> {
        let Some(line) = self.prompt(label)? else {
            return Ok(PositionInput::Eof);
        };
        match parse_position(&line) {
            Some(index) => Ok(PositionInput::Index(index)),
            None => {
                writeln!(self.output, "Please enter a task number.")?;
                Ok(PositionInput::Invalid)
            }
        }
    }

    fn report_load_failure(&mut self) -> io::Result<()> {
        let Some(failure) = self.service.load_failure() else {
            return Ok(());
        };
        writeln!(self.output, "Warning: could not load tasks: {}", failure.error)?;
        if let Some(path) = failure.set_aside_path() {
            writeln!(
                self.output,
                "The unreadable task file was kept at {}.",
                path.display()
            )?;
        }
        if let Some(err) = &failure.set_aside_error {
            writeln!(
                self.output,
                "Changes in this session will not be saved ({err})."
            )?;
        }
        Ok(())
    }

    /// Writes `label` and reads one line without its line terminator.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::{self, BufRead, Cursor, Read};
    use std::rc::Rc;
    use tasklist_core::{TaskService, VolatileStore};

    /// Console stand-in: hands out one line per read and records what was
    /// on screen at the moment each read started.
    struct Terminal {
        lines: VecDeque<String>,
        pending: Vec<u8>,
        screen: Rc<RefCell<Vec<u8>>>,
        seen_at_read: Vec<String>,
    }

    impl Terminal {
        fn last_screen_line(&self) -> String {
            let screen = String::from_utf8(self.screen.borrow().clone()).unwrap();
            screen.rsplit('\n').next().unwrap_or_default().to_string()
        }
    }

    impl Read for Terminal {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            self.consume(n);
            Ok(n)
        }
    }

    impl BufRead for Terminal {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            if self.pending.is_empty() {
                let last = self.last_screen_line();
                self.seen_at_read.push(last);
                if let Some(line) = self.lines.pop_front() {
                    self.pending = format!("{line}\n").into_bytes();
                }
            }
            Ok(&self.pending)
        }

        fn consume(&mut self, amount: usize) {
            self.pending.drain(..amount);
        }
    }

    struct SharedScreen(Rc<RefCell<Vec<u8>>>);

    impl io::Write for SharedScreen {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run_script(script: &str) -> (String, TaskService<VolatileStore>) {
        let mut service = TaskService::open(VolatileStore::new());
        let mut output = Vec::new();
        Shell::new(Cursor::new(script.as_bytes()), &mut output, &mut service)
            .run()
            .unwrap();
        (String::from_utf8(output).unwrap(), service)
    }

    #[test]
    fn buy_milk_session() {
        let (output, service) = run_script(
            "add\nBuy milk\nlist\ntoggle\n1\nlist\ndelete\n1\nlist\nexit\n",
        );

        assert!(output.contains("Added \"Buy milk\"."));
        assert!(output.contains("1. ⬜ Buy milk"));
        assert!(output.contains("Marked \"Buy milk\" as done."));
        assert!(output.contains("1. ✅ Buy milk"));
        assert!(output.contains("Deleted \"Buy milk\"."));
        assert!(output.contains("No tasks yet."));
        assert!(output.ends_with("Goodbye!\n"));
        assert!(service.list().is_empty());
    }

    #[test]
    fn unknown_command_keeps_loop_running() {
        let (output, service) = run_script("dance\nadd\nstill here\nexit\n");

        assert!(output.contains("Invalid command."));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn empty_title_is_rejected() {
        let (output, service) = run_script("add\n\nexit\n");

        assert!(output.contains("Title cannot be empty."));
        assert!(service.list().is_empty());
    }

    #[test]
    fn out_of_range_toggle_relists_tasks() {
        let (output, service) = run_script("add\nonly\ntoggle\n5\nexit\n");

        assert!(output.contains("Invalid task number."));
        assert_eq!(output.matches("1. ⬜ only").count(), 2);
        assert!(!service.list().get(0).unwrap().is_completed());
    }

    #[test]
    fn non_numeric_position_is_rejected() {
        let (output, service) = run_script("add\nkeep\ndelete\nfirst\nexit\n");

        assert!(output.contains("Please enter a task number."));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn bad_position_returns_to_command_prompt_without_extra_read() {
        let screen = Rc::new(RefCell::new(Vec::new()));
        let mut terminal = Terminal {
            lines: ["add", "keep", "delete", "abc", "exit"]
                .into_iter()
                .map(String::from)
                .collect(),
            pending: Vec::new(),
            screen: Rc::clone(&screen),
            seen_at_read: Vec::new(),
        };
        let mut service = TaskService::open(VolatileStore::new());

        Shell::new(&mut terminal, SharedScreen(Rc::clone(&screen)), &mut service)
            .run()
            .unwrap();

        assert_eq!(
            terminal.seen_at_read[4],
            "Enter a command (add, list, toggle, delete, help, exit): "
        );
        assert!(terminal
            .seen_at_read
            .iter()
            .all(|line| line.ends_with(": ")));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let (output, service) = run_script("add\nno exit command\n");

        assert!(!output.contains("Goodbye!"));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn end_of_input_while_prompting_for_title_stops_the_loop() {
        let (_, service) = run_script("add\n");
        assert!(service.list().is_empty());
    }

    #[test]
    fn help_lists_every_command() {
        let (output, _) = run_script("help\nexit\n");

        for word in ["add", "list", "toggle", "delete", "help", "exit"] {
            assert!(output.contains(&format!("  {word}")), "missing {word}");
        }
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (output, service) = run_script("add\r\nWindows task\r\nexit\r\n");

        assert!(output.contains("Added \"Windows task\"."));
        assert_eq!(service.list().get(0).unwrap().title(), "Windows task");
    }
}
