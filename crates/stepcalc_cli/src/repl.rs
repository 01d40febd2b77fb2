use crate::config::CliConfig;
use crate::render::{render_json, render_text};
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use stepcalc_engine::{CalculatorSession, Engine};

const HELP: &str = "\
Type a problem and press Enter, e.g. '2x + 5 = 15' or 'derivative of x^2'.
Use 'ans' inside an expression to recall the last numeric answer.
Commands: ans, clear, help, quit";

/// What the loop should do after a line.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Interactive calculator around a [`CalculatorSession`].
pub struct Repl {
    session: CalculatorSession,
    show_steps: bool,
    json: bool,
}

impl Repl {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            session: CalculatorSession::with_engine(Engine::with_options(config.solver.clone())),
            show_steps: config.show_steps,
            json: config.json,
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        match line {
            "quit" | "exit" => Reply::Quit,
            "help" => Reply::Print(HELP.to_string()),
            "clear" => {
                self.session.clear();
                Reply::Print("Cleared.".to_string())
            }
            "ans" => Reply::Print(
                self.session
                    .last_answer()
                    .map(|a| format!("ans = {a}"))
                    .unwrap_or_else(|| "No answer yet.".to_string()),
            ),
            _ => {
                let result = self.session.submit(line);
                if self.json {
                    match render_json(&result) {
                        Ok(json) => Reply::Print(json),
                        Err(e) => Reply::Print(format!("Error: {e}")),
                    }
                } else {
                    Reply::Print(render_text(&result, self.show_steps))
                }
            }
        }
    }

    fn build_prompt(&self) -> String {
        match self.session.last_answer() {
            Some(answer) => format!("[ans={answer}] > "),
            None => "> ".to_string(),
        }
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        println!("stepcalc interactive calculator. Type 'help' for commands.");

        let config = rustyline::Config::builder()
            .max_history_size(100)?
            .auto_add_history(false)
            .build();
        let mut rl =
            rustyline::Editor::<(), rustyline::history::DefaultHistory>::with_config(config)?;

        // History file path: ~/.stepcalc_history
        let history_path = dirs::home_dir()
            .map(|p| p.join(".stepcalc_history"))
            .unwrap_or_else(|| PathBuf::from(".stepcalc_history"));
        let _ = rl.load_history(&history_path);

        loop {
            match rl.readline(&self.build_prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line)?;

                    match self.handle_line(line) {
                        Reply::Print(text) => println!("{text}"),
                        Reply::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            }
        }

        let _ = rl.save_history(&history_path);
        Ok(())
    }
}
