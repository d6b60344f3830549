//! Line-oriented interactive session driving a [`FlowController`].
//!
//! Each input line becomes at most one intent. While an analysis is in
//! flight the session keeps reading lines, so `back` can abandon the request;
//! the late response is then handed to the controller and dropped as stale.

use anyhow::Result;
use indicatif::ProgressBar;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::progress::create_spinner;
use crate::cli::render;
use crate::domain::errors::AnalysisError;
use crate::domain::models::{AnalysisResult, AnalysisTicket, Bucket, FlowState, Intent};
use crate::services::{AnalysisClient, AnalyzeOutcome, Completion, FlowController};

type AnalysisDelivery = (AnalysisTicket, Result<AnalysisResult, AnalysisError>);

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Intent(Intent),
    Help,
    ShowJson,
    Quit,
    Noop,
}

/// Parse a 1-based position typed by the user into an index.
fn parse_position(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{}' is not a valid position (use 1, 2, ...)", text.trim())),
    }
}

fn required_text(text: &str, usage: &str) -> Result<String, String> {
    if text.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(text.to_string())
    }
}

fn bucket_and_rest<'a>(rest: &'a str, usage: &str) -> Result<(Bucket, &'a str), String> {
    let (bucket, tail) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("usage: {usage}"))?;
    Ok((bucket.parse()?, tail.trim()))
}

/// Turn a typed line into a command.
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(SessionCommand::Noop);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let intent = match verb.to_lowercase().as_str() {
        "help" | "?" => return Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => return Ok(SessionCommand::Quit),
        "json" => return Ok(SessionCommand::ShowJson),
        "start" => Intent::Start,
        "back" => Intent::Back,
        "analyze" | "analyse" => Intent::Analyze,
        "reset" => Intent::Reset,
        "dismiss" => Intent::DismissError,
        "add" => {
            let (bucket, text) = bucket_and_rest(rest, "add <bucket> <text>")?;
            Intent::AddItem {
                bucket,
                text: required_text(text, "add <bucket> <text>")?,
            }
        }
        "rm" => {
            let (bucket, position) = bucket_and_rest(rest, "rm <bucket> <n>")?;
            Intent::RemoveItem {
                bucket,
                index: parse_position(position)?,
            }
        }
        "value" => Intent::AddValue(required_text(rest, "value <text>")?),
        "rm-value" => Intent::RemoveValue(parse_position(rest)?),
        "constraint" => Intent::AddConstraint(required_text(rest, "constraint <text>")?),
        "rm-constraint" => Intent::RemoveConstraint(parse_position(rest)?),
        "energy" => Intent::SetEnergy(
            rest.parse()
                .map_err(|_| format!("'{rest}' is not an energy level (use 1 to 5)"))?,
        ),
        other => return Err(format!("unknown command '{other}' (type `help` for the list)")),
    };
    Ok(SessionCommand::Intent(intent))
}

enum Event {
    Line(Option<String>),
    Delivered(Box<AnalysisDelivery>),
}

#[derive(PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// Interactive session writing screens to `out`.
pub struct Session<W: Write> {
    flow: FlowController,
    client: AnalysisClient,
    out: W,
    show_progress: bool,
    json_results: bool,
    spinner: Option<ProgressBar>,
    deliveries_tx: mpsc::UnboundedSender<AnalysisDelivery>,
    deliveries_rx: mpsc::UnboundedReceiver<AnalysisDelivery>,
}

impl<W: Write> Session<W> {
    pub fn new(client: AnalysisClient, out: W) -> Self {
        let (deliveries_tx, deliveries_rx) = mpsc::unbounded_channel();
        Self {
            flow: FlowController::new(),
            client,
            out,
            show_progress: true,
            json_results: false,
            spinner: None,
            deliveries_tx,
            deliveries_rx,
        }
    }

    /// Never draw the spinner.
    #[must_use]
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Print results as JSON instead of the dashboard.
    #[must_use]
    pub fn with_json_results(mut self, enabled: bool) -> Self {
        self.json_results = enabled;
        self
    }

    pub fn flow(&self) -> &FlowController {
        &self.flow
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Process lines until `quit` or end of input.
    ///
    /// At end of input an in-flight analysis is still awaited so its outcome
    /// is shown.
    pub async fn run<R>(&mut self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut input_open = true;
        self.render()?;

        loop {
            let event = if input_open {
                tokio::select! {
                    line = lines.next_line() => Event::Line(line?),
                    Some(delivery) = self.deliveries_rx.recv() => Event::Delivered(Box::new(delivery)),
                }
            } else if self.flow.is_loading() {
                match self.deliveries_rx.recv().await {
                    Some(delivery) => Event::Delivered(Box::new(delivery)),
                    None => break,
                }
            } else {
                break;
            };

            match event {
                Event::Line(Some(line)) => {
                    if self.handle_line(&line)? == Control::Quit {
                        break;
                    }
                }
                Event::Line(None) => input_open = false,
                Event::Delivered(delivery) => {
                    let (ticket, outcome) = *delivery;
                    self.deliver(ticket, outcome)?;
                }
            }
        }

        self.stop_spinner();
        self.out.flush()?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Control> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                self.notice(&message)?;
                return Ok(Control::Continue);
            }
        };

        match command {
            SessionCommand::Noop => {}
            SessionCommand::Quit => return Ok(Control::Quit),
            SessionCommand::Help => {
                let text = render::help(self.flow.state());
                self.emit(&text)?;
            }
            SessionCommand::ShowJson => match self.flow.result() {
                Some(result) => {
                    let text = serde_json::to_string_pretty(result)?;
                    self.emit(&text)?;
                }
                None => self.notice("There is no analysis to show yet.")?,
            },
            SessionCommand::Intent(Intent::Analyze) => self.start_analysis()?,
            SessionCommand::Intent(intent) => match self.flow.dispatch(intent) {
                Ok(()) => {
                    if !self.flow.is_loading() {
                        self.stop_spinner();
                    }
                    self.render()?;
                }
                Err(err) => self.notice(&err.to_string())?,
            },
        }
        Ok(Control::Continue)
    }

    fn start_analysis(&mut self) -> Result<()> {
        match self.flow.begin_analysis() {
            Err(err) => self.notice(&err.to_string())?,
            Ok(AnalyzeOutcome::Invalid(_)) => self.render()?,
            Ok(AnalyzeOutcome::Dispatched(pending)) => {
                let client = self.client.clone();
                let tx = self.deliveries_tx.clone();
                tokio::spawn(async move {
                    let outcome = client.analyze(&pending.input).await;
                    // The receiver is gone only when the session has ended.
                    let _ = tx.send((pending.ticket, outcome));
                });
                self.render()?;
                if self.show_progress {
                    self.spinner = Some(create_spinner("Analyzing your answers..."));
                }
            }
        }
        Ok(())
    }

    fn deliver(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<()> {
        let completion = self.flow.complete_analysis(ticket, outcome);
        if !self.flow.is_loading() {
            self.stop_spinner();
        }
        match completion {
            Completion::Stale => debug!(%ticket, "ignored late analysis response"),
            Completion::Stored | Completion::Failed => self.render()?,
        }
        Ok(())
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        let out = &mut self.out;
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| writeln!(out, "{text}"))?,
            None => writeln!(out, "{text}")?,
        }
        out.flush()?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        let text = format!("{} {message}", console::style("!").yellow().bold());
        self.emit(&text)
    }

    fn render(&mut self) -> Result<()> {
        let screen = match self.flow.state() {
            FlowState::Intro => render::intro(),
            FlowState::Input => render::input_screen(
                self.flow.input(),
                self.flow.error_message(),
                self.flow.is_loading(),
            ),
            FlowState::Result => match self.flow.result() {
                Some(result) if self.json_results => serde_json::to_string_pretty(result)?,
                Some(result) => format!(
                    "{}\nType `reset` to revise your answers, `json` for raw output or `quit`.",
                    render::result_screen(result)
                ),
                None => String::new(),
            },
        };
        self.emit(&screen)
    }
}
