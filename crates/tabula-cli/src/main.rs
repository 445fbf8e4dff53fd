mod wizard;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tabula_form::{
    ConsoleSink, FieldId, OrderForm, Session, StepCursor, StepId, build_render_payload, form_schema,
    render_card, render_json_ui, render_order, render_text, step_schema, unknown_fields,
    validate_answers, visible_fields,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wizard::{PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Order-intake wizard for made-to-order dining tables",
    long_about = "Walks a customer through the six-step dining-table questionnaire and hands the completed order to the submission sink"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Card,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the six-step intake wizard in a text shell.
    Wizard {
        /// Optional JSON file containing previously collected answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Show verbose output (progress, visible fields, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit the submitted order as pretty JSON.
        #[arg(long)]
        answers_json: bool,
        /// Render mode for the verbose step display.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Check an answers file and print the advisory report.
    Validate {
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the record schema, or one step's visible-field schema.
    Schema {
        /// Step index in 0..=5; omit for the whole-record schema.
        #[arg(long)]
        step: Option<usize>,
    },
    /// Print the render payload the widget layer would receive.
    Render {
        /// Optional JSON file containing collected answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Step index in 0..=5.
        #[arg(long, default_value_t = 0)]
        step: usize,
        /// Output mode for the payload.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Render a record into a markdown order sheet.
    Summary {
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Write the sheet to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard {
            answers,
            verbose,
            answers_json,
            format,
        } => run_wizard(answers, verbose, answers_json, format),
        Command::Validate { answers } => run_validate(answers),
        Command::Schema { step } => run_schema(step),
        Command::Render {
            answers,
            step,
            format,
        } => run_render(answers, step, format),
        Command::Summary { answers, out } => run_summary(answers, out),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

enum StepOutcome {
    Advance,
    Retreat,
    Submit,
    Quit,
}

fn run_wizard(
    answers: Option<PathBuf>,
    verbose: bool,
    answers_json: bool,
    format: RenderMode,
) -> CliResult<()> {
    let form = load_answers(answers.as_deref())?;
    let mut session = Session::with_answers(form);
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), answers_json);

    loop {
        let payload = session.render();
        presenter.show_header();
        if verbose {
            match format {
                RenderMode::Text => presenter.show_step(&payload),
                RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?),
                RenderMode::Card => println!("{}", serde_json::to_string_pretty(&render_card(&payload))?),
            }
        } else {
            presenter.show_step(&payload);
        }

        match collect_step(&mut session, &presenter)? {
            StepOutcome::Advance => {
                session.advance();
            }
            StepOutcome::Retreat => {
                session.retreat();
            }
            StepOutcome::Submit => {
                let mut sink = ConsoleSink;
                let order = session.submit(&mut sink)?;
                presenter.show_completion(&order);
                return Ok(());
            }
            StepOutcome::Quit => {
                println!("Aborted; nothing was submitted.");
                return Ok(());
            }
        }
    }
}

/// Prompts the current step's visible fields one at a time, re-resolving
/// visibility after every answer so a field set earlier in the step can
/// reveal its guarded follow-up, then asks for navigation.
fn collect_step(session: &mut Session, presenter: &WizardPresenter) -> CliResult<StepOutcome> {
    let step = session.current_step();
    let mut asked: Vec<FieldId> = Vec::new();

    loop {
        let next = visible_fields(step, session.form())
            .into_iter()
            .find(|field| !asked.contains(field));
        let Some(field) = next else { break };
        asked.push(field);

        loop {
            let context = PromptContext::new(field, session.form(), session.cursor());
            let Some(input) = presenter.prompt(&context)? else {
                return Ok(StepOutcome::Quit);
            };
            match input.as_str() {
                ":back" if session.cursor().can_retreat() => return Ok(StepOutcome::Retreat),
                ":back" => {
                    presenter.show_nav_help(session.cursor());
                }
                ":next" if session.cursor().can_advance() => return Ok(StepOutcome::Advance),
                ":submit" if session.cursor().is_terminal() => return Ok(StepOutcome::Submit),
                ":next" | ":submit" => {
                    presenter.show_nav_help(session.cursor());
                }
                ":quit" => return Ok(StepOutcome::Quit),
                "" => break,
                raw => match session.set(field, raw) {
                    Ok(()) => break,
                    Err(err) => presenter.show_parse_error(&err),
                },
            }
        }
    }

    loop {
        let Some(input) = presenter.nav_prompt(session.cursor())? else {
            return Ok(StepOutcome::Quit);
        };
        match input.as_str() {
            "" | ":next" if session.cursor().can_advance() => return Ok(StepOutcome::Advance),
            "y" | "yes" | ":submit" if session.cursor().is_terminal() => {
                return Ok(StepOutcome::Submit);
            }
            ":back" if session.cursor().can_retreat() => return Ok(StepOutcome::Retreat),
            ":quit" | "n" | "no" => return Ok(StepOutcome::Quit),
            _ => presenter.show_nav_help(session.cursor()),
        }
    }
}

fn run_validate(answers: PathBuf) -> CliResult<()> {
    let raw = fs::read_to_string(&answers)?;
    let value: Value = serde_json::from_str(&raw)?;
    let report = validate_answers(&value)?;

    for field in &report.missing {
        println!("missing: {field}");
    }
    for unknown in &report.unknown_fields {
        println!("unknown field: {unknown}");
    }
    for finding in &report.findings {
        println!("{}: {} ({})", finding.field, finding.message, finding.code);
    }

    if report.clean() {
        println!("OK: answers are well-formed");
        Ok(())
    } else {
        Err("answers contain malformed or unknown fields".into())
    }
}

fn run_schema(step: Option<usize>) -> CliResult<()> {
    let schema = match step {
        Some(index) => step_schema(StepId::from_index(index)?, &OrderForm::default()),
        None => form_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_render(answers: Option<PathBuf>, step: usize, format: RenderMode) -> CliResult<()> {
    let form = load_answers(answers.as_deref())?;
    let cursor = StepCursor::at(StepId::from_index(step)?);
    let payload = build_render_payload(cursor, &form);
    match format {
        RenderMode::Text => println!("{}", render_text(&payload)),
        RenderMode::Json => println!(
            "{}",
            serde_json::to_string_pretty(&render_json_ui(&payload))?
        ),
        RenderMode::Card => println!("{}", serde_json::to_string_pretty(&render_card(&payload))?),
    }
    Ok(())
}

fn run_summary(answers: PathBuf, out: Option<PathBuf>) -> CliResult<()> {
    let form = load_answers(Some(answers.as_path()))?;
    let sheet = render_order(&form)?;
    match out {
        Some(path) => {
            fs::write(&path, &sheet)?;
            println!("Wrote order sheet to {}", path.display());
        }
        None => print!("{sheet}"),
    }
    Ok(())
}

fn load_answers(path: Option<&Path>) -> CliResult<OrderForm> {
    let Some(path) = path else {
        return Ok(OrderForm::default());
    };
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let unknown = unknown_fields(&value);
    if !unknown.is_empty() {
        warn!(fields = ?unknown, "ignoring unknown answer fields");
    }
    Ok(serde_json::from_value(value)?)
}
