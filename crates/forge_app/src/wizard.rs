//! Line-oriented terminal wizard driving the core state machine.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use forge_core::{update, Msg, Platform, VisualStyle, WizardState, WizardStep};
use forge_logging::forge_warn;

use crate::config::AppConfig;
use crate::runner::EffectRunner;

const SUGGESTED_TOPICS: [&str; 4] = [
    "Historical Facts",
    "Sports Motivation",
    "Tech News",
    "Travel",
];

const STYLES: [(VisualStyle, &str); 4] = [
    (VisualStyle::Cinematic, "High contrast, epic footage, slow."),
    (VisualStyle::Minimalist, "Ultra clean, black and white, modern."),
    (VisualStyle::Chaos, "Fast, glitchy, saturated, viral."),
    (VisualStyle::Corporate, "Professional, business stock, blue."),
];

pub fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(&config, msg_tx)?;
    let mut session = Session {
        state: WizardState::new(),
        runner,
        msg_rx,
    };

    println!("MultiForge Studio — backend {}", config.backend_url);
    loop {
        match session.state.step() {
            WizardStep::Topic => {
                if !session.topic_screen()? {
                    return Ok(());
                }
            }
            WizardStep::Script => session.script_screen()?,
            WizardStep::Visuals => session.visuals_screen()?,
            WizardStep::Submitting => session.submitting_screen(),
            WizardStep::Result => {
                if !session.result_screen()? {
                    return Ok(());
                }
            }
        }
    }
}

struct Session {
    state: WizardState,
    runner: EffectRunner,
    msg_rx: Receiver<Msg>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let current = std::mem::take(&mut self.state);
        let (mut next, effects) = update(current, msg);
        self.runner.enqueue(effects);
        next.consume_dirty();
        self.state = next;
    }

    /// Drains engine messages into the state machine until `done` holds or
    /// the deadline passes.
    fn pump_engine(&mut self, done: impl Fn(&WizardState) -> bool, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !done(&self.state) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.msg_rx.recv_timeout(remaining.min(Duration::from_millis(200))) {
                Ok(msg) => {
                    self.dispatch(msg);
                    self.render_job_progress();
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn render_job_progress(&self) {
        let view = self.state.view();
        if view.step != WizardStep::Submitting {
            return;
        }
        if let Some(line) = view.logs.last() {
            println!("> {line}");
        }
        println!("[{:>3}%] {}", view.progress, view.current_step);
    }

    /// Returns false when the user quits from the first screen.
    fn topic_screen(&mut self) -> io::Result<bool> {
        let view = self.state.view();
        println!();
        println!("— Topic ({}) —", view.platform.as_str());
        if let Some(error) = &view.last_error {
            println!("last attempt failed: {error}");
        }
        for (i, suggestion) in SUGGESTED_TOPICS.iter().enumerate() {
            println!("  #{} {}", i + 1, suggestion);
        }
        println!("Type a topic (or #N), 'p' to cycle platform, 'q' to quit.");

        let line = read_line("topic> ")?;
        match line.trim() {
            "" => Ok(true),
            "q" => Ok(false),
            "p" => {
                let next = match view.platform {
                    Platform::Tiktok => Platform::Youtube,
                    Platform::Youtube => Platform::Instagram,
                    Platform::Instagram => Platform::Tiktok,
                };
                self.dispatch(Msg::PlatformSelected(next));
                Ok(true)
            }
            trimmed => {
                let topic = trimmed
                    .strip_prefix('#')
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| SUGGESTED_TOPICS.get(i).copied())
                    .unwrap_or(trimmed);
                self.dispatch(Msg::TopicChanged(topic.to_string()));
                self.dispatch(Msg::GenerateClicked);
                println!("drafting a script...");
                if !self.pump_engine(
                    |state| state.step() != WizardStep::Topic,
                    Duration::from_secs(10),
                ) {
                    forge_warn!("script generator did not answer in time");
                    println!("the script generator is not responding, try again");
                }
                Ok(true)
            }
        }
    }

    fn script_screen(&mut self) -> io::Result<()> {
        let view = self.state.view();
        println!();
        println!("— Script —");
        println!("{}", view.script_content);
        println!();
        println!("[enter] confirm, 'e' edit, 'b' back.");

        match read_line("script> ")?.trim() {
            "e" => {
                println!("Enter the new script; finish with a single '.' line.");
                let script = read_block()?;
                self.dispatch(Msg::ScriptEdited(script));
            }
            "b" => self.dispatch(Msg::BackClicked),
            _ => self.dispatch(Msg::ScriptConfirmed),
        }
        Ok(())
    }

    fn visuals_screen(&mut self) -> io::Result<()> {
        let view = self.state.view();
        println!();
        println!("— Visual style —");
        if let Some(error) = &view.last_error {
            println!("last attempt failed: {error}");
        }
        for (i, (style, blurb)) in STYLES.iter().enumerate() {
            let marker = if *style == view.visual_style { '*' } else { ' ' };
            println!(" {marker}{} {:<12} {}", i + 1, style.as_str(), blurb);
        }
        println!("[enter] launch production, 1-4 pick style, 'b' back.");

        match read_line("style> ")?.trim() {
            "b" => self.dispatch(Msg::BackClicked),
            pick @ ("1" | "2" | "3" | "4") => {
                let index = pick.parse::<usize>().unwrap_or(1) - 1;
                self.dispatch(Msg::StyleSelected(STYLES[index].0));
            }
            _ => {
                self.dispatch(Msg::LaunchClicked);
                println!("submitting production request...");
            }
        }
        Ok(())
    }

    fn submitting_screen(&mut self) {
        // The step stays frozen here until the backend reports a terminal
        // status; the job itself runs remotely, so no local timeout applies.
        self.pump_engine(
            |state| state.step() != WizardStep::Submitting,
            Duration::from_secs(60 * 60),
        );
    }

    /// Returns false when the user is done for good.
    fn result_screen(&mut self) -> io::Result<bool> {
        let view = self.state.view();
        println!();
        println!("— Done —");
        match &view.result_video_url {
            Some(url) => println!("your video: {url}"),
            None => println!("the backend reported success but sent no video url"),
        }
        println!("'n' new project, anything else quits.");

        if read_line("result> ")?.trim() == "n" {
            self.dispatch(Msg::ResetClicked);
            return Ok(true);
        }
        Ok(false)
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn read_block() -> io::Result<String> {
    let mut lines = Vec::new();
    loop {
        let line = read_line("")?;
        if line.trim() == "." {
            break;
        }
        if line.is_empty() {
            // EOF
            break;
        }
        lines.push(line.trim_end().to_string());
    }
    Ok(lines.join("\n"))
}
