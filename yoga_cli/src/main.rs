use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use yoga_core::*;

#[derive(Parser)]
#[command(name = "yoga")]
#[command(about = "Voice-driven yoga pose suggestions for your pain area", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override data directory (where the recording is stored)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe your pain area and customize the routine (default)
    Session {
        /// Start from typed text instead of recording
        #[arg(long)]
        text: Option<String>,

        /// Recording length in seconds
        #[arg(long)]
        duration: Option<u64>,
    },

    /// Suggest a routine from typed text
    Suggest {
        #[arg(required = true)]
        text: Vec<String>,

        /// Print only the numbered routine
        #[arg(long)]
        export: bool,
    },

    /// Transcribe an existing WAV file and suggest a routine
    Transcribe { file: PathBuf },

    /// List supported pain areas
    Areas,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    yoga_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    config.validate()?;

    let catalog = get_default_catalog().with_custom(&config.catalog.custom);
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    tracing::debug!("Catalog ready with {} pain areas", catalog.entries().len());

    match cli.command {
        Some(Commands::Session { text, duration }) => {
            cmd_session(&catalog, &config, text, duration)
        }
        Some(Commands::Suggest { text, export }) => cmd_suggest(&catalog, &text.join(" "), export),
        Some(Commands::Transcribe { file }) => cmd_transcribe(&catalog, &config, file),
        Some(Commands::Areas) => cmd_areas(&catalog),
        None => {
            // Default to "session" command
            cmd_session(&catalog, &config, None, None)
        }
    }
}

fn cmd_session(
    catalog: &PoseCatalog,
    config: &Config,
    text: Option<String>,
    duration: Option<u64>,
) -> Result<()> {
    let duration = duration
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.audio.duration());
    if duration.is_zero() {
        return Err(Error::Config("Recording duration must be > 0".into()));
    }

    let recorder = MicrophoneRecorder::new(
        config.audio.device.clone(),
        config.audio.sample_rate,
        config.data.recording_path(),
    );
    let transcriber = HttpTranscriber::from_config(&config.transcription);
    let mut session = Session::new(catalog, Box::new(recorder), Box::new(transcriber), duration);

    match text {
        Some(text) => {
            session.apply_transcript(text);
            display_session(&session);
        }
        None => record_and_display(&mut session),
    }

    print_commands();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        if matches!(action, SessionAction::Quit) {
            break;
        }
        apply_action(&mut session, action);
    }

    println!("Namaste!");
    Ok(())
}

fn cmd_suggest(catalog: &PoseCatalog, text: &str, export: bool) -> Result<()> {
    let routine = RoutineState::new(catalog, classify(catalog, text));
    if export {
        println!("{}", routine.export_lines());
    } else {
        display_routine(Some(text), &routine);
    }
    Ok(())
}

fn cmd_transcribe(catalog: &PoseCatalog, config: &Config, file: PathBuf) -> Result<()> {
    let transcriber = HttpTranscriber::from_config(&config.transcription);
    let text = transcriber.transcribe(&AudioHandle::from_path(file))?;

    let routine = RoutineState::new(catalog, classify(catalog, &text));
    display_routine(Some(&text), &routine);
    Ok(())
}

fn cmd_areas(catalog: &PoseCatalog) -> Result<()> {
    let areas: Vec<_> = catalog.areas().map(title_case).collect();
    println!("Supported pain areas: {}", areas.join(", "));
    Ok(())
}

fn record_and_display(session: &mut Session) {
    println!(
        "Recording for {} seconds... Please speak now!",
        session.duration().as_secs()
    );

    match session.record().map(|_| ()) {
        Ok(()) => {
            println!("Audio processed successfully!");
            display_session(session);
        }
        Err(e) => {
            println!("{}", e.user_message());
            if matches!(e, Error::Transcription(_)) {
                println!("Sorry, could not understand your speech. Please try again.");
            }
        }
    }
}

fn display_session(session: &Session) {
    match session.routine() {
        Some(routine) => display_routine(session.transcript(), routine),
        None => println!("No routine yet. Type 'record' to describe your pain area."),
    }
}

fn display_routine(transcript: Option<&str>, routine: &RoutineState) {
    println!();
    if let Some(text) = transcript {
        println!("You said: '{}'", text);
    }

    let area = routine.pain_area();
    if area.is_general() {
        println!("╭─────────────────────────────────────────╮");
        println!("│  General Yoga Routine");
        println!("╰─────────────────────────────────────────╯");
        println!("Your General Yoga Routine:");
    } else {
        println!("╭─────────────────────────────────────────╮");
        println!("│  Detected Pain Area: {}", area.title());
        println!("╰─────────────────────────────────────────╯");
        println!("Your Complete {} Workout Routine:", area.title());
    }
    println!();

    for (i, pose) in routine.poses().iter().enumerate() {
        println!("  {}. {}", i + 1, pose);
    }

    println!();
    println!("Routine: {}", routine.summary());
    println!();
}

fn print_commands() {
    println!("─────────────────────────────────────────");
    println!("  up N / u N      move pose N up");
    println!("  down N / d N    move pose N down");
    println!("  reset / r       restore the original order");
    println!("  export / e      print the routine as text");
    println!("  record / n      record a new description");
    println!("  help / h        show these commands");
    println!("  quit / q        leave");
}

#[derive(Debug, PartialEq, Eq)]
enum SessionAction {
    /// Zero-based index
    Up(usize),
    /// Zero-based index
    Down(usize),
    Reset,
    Export,
    Record,
    Help,
    Quit,
}

/// Parse one line of user input; positions are 1-based
fn parse_action(line: &str) -> std::result::Result<SessionAction, String> {
    let mut parts = line.split_whitespace();
    let command = match parts.next() {
        Some(c) => c.to_lowercase(),
        None => return Err("Type 'help' to see the commands.".into()),
    };

    let position = |arg: Option<&str>| -> std::result::Result<usize, String> {
        let arg = arg.ok_or_else(|| format!("Usage: {} N", command))?;
        match arg.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("Invalid position '{}'. Positions start at 1.", arg)),
        }
    };

    match command.as_str() {
        "up" | "u" => position(parts.next()).map(SessionAction::Up),
        "down" | "d" => position(parts.next()).map(SessionAction::Down),
        "reset" | "r" => Ok(SessionAction::Reset),
        "export" | "e" => Ok(SessionAction::Export),
        "record" | "n" => Ok(SessionAction::Record),
        "help" | "h" | "?" => Ok(SessionAction::Help),
        "quit" | "q" | "exit" => Ok(SessionAction::Quit),
        other => Err(format!(
            "Unknown command '{}'. Type 'help' to see the commands.",
            other
        )),
    }
}

fn apply_action(session: &mut Session, action: SessionAction) {
    let has_routine = session.routine().is_some();
    let needs_routine = matches!(
        action,
        SessionAction::Up(_) | SessionAction::Down(_) | SessionAction::Reset | SessionAction::Export
    );
    if needs_routine && !has_routine {
        println!("No routine yet. Type 'record' to describe your pain area.");
        return;
    }

    match action {
        SessionAction::Up(index) => {
            if session.move_up(index) {
                display_session(session);
            } else {
                println!("Pose {} can't move up.", index + 1);
            }
        }
        SessionAction::Down(index) => {
            if session.move_down(index) {
                display_session(session);
            } else {
                println!("Pose {} can't move down.", index + 1);
            }
        }
        SessionAction::Reset => {
            session.reset();
            println!("Routine reset to original order.");
            display_session(session);
        }
        SessionAction::Export => {
            if let Some(lines) = session.export_lines() {
                println!("─────────────────────────────────────────");
                println!("{}", lines);
                println!("─────────────────────────────────────────");
                println!("Routine displayed above - you can copy it manually!");
            }
        }
        SessionAction::Record => record_and_display(session),
        SessionAction::Help => print_commands(),
        SessionAction::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positions_are_one_based() {
        assert_eq!(parse_action("up 3\n"), Ok(SessionAction::Up(2)));
        assert_eq!(parse_action("d 1"), Ok(SessionAction::Down(0)));
        assert_eq!(parse_action("  U 5  "), Ok(SessionAction::Up(4)));
    }

    #[test]
    fn test_parse_rejects_bad_positions() {
        assert!(parse_action("up 0").is_err());
        assert!(parse_action("down x").is_err());
        assert!(parse_action("up").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_action("reset"), Ok(SessionAction::Reset));
        assert_eq!(parse_action("e"), Ok(SessionAction::Export));
        assert_eq!(parse_action("record"), Ok(SessionAction::Record));
        assert_eq!(parse_action("q"), Ok(SessionAction::Quit));
        assert!(parse_action("").is_err());
        assert!(parse_action("dance").is_err());
    }
}
