use anyhow::Context;
use clap::Parser;
use course_picker::adapters::source_for;
use course_picker::app::render::{render_json, render_summary, render_table, HELP};
use course_picker::config::LogFormat;
use course_picker::domain::ports::ConfigProvider;
use course_picker::utils::error::ErrorSeverity;
use course_picker::utils::{logger, validation::Validate};
use course_picker::{
    Catalog, CliConfig, Command, CourseId, Outcome, PickerError, SelectionEngine, Session,
    Settings, TomlConfig,
};
use std::io::{BufRead, Write};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let settings = match Settings::from_cli(&cli, file_config.as_ref()).and_then(|settings| {
        if let Some(file) = &file_config {
            file.validate()?;
        }
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, settings.log_level.as_deref()),
        LogFormat::Json => logger::init_json_logger(cli.verbose, settings.log_level.as_deref()),
    }

    tracing::info!("Starting course-picker");
    tracing::debug!("Effective settings: {:?}", settings);

    let source = source_for(&settings);
    let catalog = match Catalog::from_source(&*source) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => exit_with(&e),
    };
    tracing::info!(
        "Catalog ready: {} courses, up to {} may be chosen",
        catalog.len(),
        settings.max_selectable()
    );

    let mut session = Session::new(SelectionEngine::from_config(catalog, &settings));
    for code in &cli.choose {
        report(session.apply(Command::Add(CourseId(*code))));
    }

    if cli.interactive {
        run_interactive(&mut session)?;
    } else if cli.json {
        let engine = session.engine();
        println!("{}", render_json(&engine.rows(), &engine.summary())?);
    } else {
        print_all(&session);
    }

    Ok(())
}

fn run_interactive(session: &mut Session) -> anyhow::Result<()> {
    println!("{}", render_table(&session.engine().rows()));
    println!("Type 'help' for commands.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).context("reading command")?;
        if read == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                continue;
            }
        };

        match session.apply(command) {
            Outcome::Quit => break,
            Outcome::Render => println!("{}", render_table(&session.engine().rows())),
            Outcome::Summary => println!("{}", render_summary(&session.engine().summary())),
            Outcome::Help => println!("{}", HELP),
            Outcome::Updated => println!("{}", render_table(&session.engine().rows())),
            other => report(other),
        }
    }

    print_all(session);
    Ok(())
}

fn print_all(session: &Session) {
    let engine = session.engine();
    println!("{}", render_table(&engine.rows()));
    println!("{}", render_summary(&engine.summary()));
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Rejected { id, reason } => {
            let error = PickerError::BlockedSelection { id, reason };
            eprintln!("⚠️  {}", error.user_friendly_message());
        }
        Outcome::Ignored { id } => eprintln!("⚠️  Course {} is not in the catalog", id),
        _ => {}
    }
}

fn exit_with(e: &PickerError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
