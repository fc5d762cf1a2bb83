//! Interactive line-oriented front end for [`TodoApp`].

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::app::{TaskRef, TodoApp};

pub const HELP: &str = "\
Commands:
  add <text>       add a task
  toggle <n|id>    flip a task's completed flag
  delete <n|id>    delete a task
  reload           fetch the list again
  help             show this help
  quit             leave";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Toggle(TaskRef),
    Delete(TaskRef),
    Reload,
    Help,
    Quit,
    Nothing,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(ShellCommand::Nothing),
            "add" | "a" => Ok(ShellCommand::Add(rest.to_string())),
            "toggle" | "t" => rest.parse().map(ShellCommand::Toggle),
            "delete" | "del" | "d" => rest.parse().map(ShellCommand::Delete),
            "reload" | "r" => Ok(ShellCommand::Reload),
            "help" | "h" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

/// Run `command` against `app`. Returns `false` when the shell should exit.
pub async fn execute(app: &mut TodoApp, command: ShellCommand) -> Result<bool, String> {
    match command {
        ShellCommand::Add(text) => {
            app.set_input(text);
            if !app.add().await {
                return Err("nothing to add".to_string());
            }
        }
        ShellCommand::Toggle(task) => {
            let id = app.resolve(&task).ok_or_else(|| no_such_position(&task))?;
            app.toggle(&id).await;
        }
        ShellCommand::Delete(task) => {
            let id = app.resolve(&task).ok_or_else(|| no_such_position(&task))?;
            app.delete(&id).await;
        }
        ShellCommand::Reload => app.load().await,
        ShellCommand::Help | ShellCommand::Nothing => {}
        ShellCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn no_such_position(task: &TaskRef) -> String {
    match task {
        TaskRef::Position(n) => format!("no task at position {n}"),
        TaskRef::Id(id) => format!("no task {id}"),
    }
}

/// Read commands from `input` until EOF or `quit`, rendering after each one.
pub async fn run<R, W>(app: &mut TodoApp, input: R, out: &mut W, styled: bool) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", app.view().render(styled))?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ShellCommand::parse(&line) {
            Ok(ShellCommand::Help) => writeln!(out, "{HELP}")?,
            Ok(ShellCommand::Nothing) => {}
            Ok(command) => match execute(app, command).await {
                Ok(true) => writeln!(out, "{}", app.view().render(styled))?,
                Ok(false) => break,
                Err(msg) => writeln!(out, "{msg}")?,
            },
            Err(msg) => writeln!(out, "{msg}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ShellCommand::parse("add  Buy milk "),
            Ok(ShellCommand::Add("Buy milk".into()))
        );
        assert_eq!(
            ShellCommand::parse("t 2"),
            Ok(ShellCommand::Toggle(TaskRef::Position(2)))
        );
        assert_eq!(
            ShellCommand::parse("delete abc-123"),
            Ok(ShellCommand::Delete(TaskRef::Id("abc-123".into())))
        );
        assert_eq!(ShellCommand::parse("QUIT"), Ok(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("   "), Ok(ShellCommand::Nothing));
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShellCommand::parse("toggle").is_err());
        assert!(ShellCommand::parse("frobnicate 1").is_err());
    }
}
