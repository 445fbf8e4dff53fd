use std::fmt::Write as _;
use std::io::{self, Write};

use serde_json::to_string_pretty;
use tabula_form::{
    FieldId, FormError, OrderForm, RenderPayload, STEP_COUNT, StepCursor, render_text,
};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: step headers and prompts only.
    Clean,
    /// Verbose output: full step payloads, progress, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints step displays and prompts, and reads the customer's replies.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_answers_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header(&mut self) {
        if self.header_printed {
            return;
        }
        println!("Tabula dining-table intake");
        if self.verbosity.is_verbose() {
            println!("Blank keeps the current value; :next, :back, :quit navigate.");
        }
        self.header_printed = true;
    }

    pub fn show_step(&self, payload: &RenderPayload) {
        if self.verbosity.is_verbose() {
            println!();
            println!("{}", render_text(payload));
        } else {
            println!();
            println!(
                "Step {}/{}: {}",
                payload.step_index + 1,
                payload.step_count,
                payload.title
            );
        }
    }

    /// Prints one field prompt and reads the reply. `None` means EOF.
    pub fn prompt(&self, context: &PromptContext) -> io::Result<Option<String>> {
        let mut line = format!(
            "{}/{} {}",
            context.step_index + 1,
            context.step_count,
            context.label
        );
        if let Some(choices) = context.choices {
            let _ = write!(&mut line, " ({})", choices.join("/"));
        }
        if let Some(hint) = context.hint {
            let _ = write!(&mut line, " [{}]", hint);
        }
        if !context.current.is_empty() {
            let _ = write!(&mut line, " <{}>", context.current);
        }
        print!("{line} > ");
        io::stdout().flush()?;
        read_line()
    }

    /// Prints the navigation prompt for the current position. `None` is EOF.
    pub fn nav_prompt(&self, cursor: StepCursor) -> io::Result<Option<String>> {
        if cursor.is_terminal() {
            print!("Submit order? [y/:back/:quit] ");
        } else if cursor.can_retreat() {
            print!("[Enter=next, :back, :quit] ");
        } else {
            print!("[Enter=next, :quit] ");
        }
        io::stdout().flush()?;
        read_line()
    }

    pub fn show_nav_help(&self, cursor: StepCursor) {
        if cursor.is_terminal() {
            println!("Type y to submit, :back to revisit a step, :quit to abort.");
        } else {
            println!("Press Enter for the next step, :back to go back, :quit to abort.");
        }
    }

    pub fn show_parse_error(&self, error: &FormError) {
        eprintln!("Invalid answer: {}", error);
        if self.verbosity.is_verbose() {
            eprintln!("  Blank keeps the current value.");
        }
    }

    pub fn show_completion(&self, order: &OrderForm) {
        println!("Done ✅");
        match serde_cbor::to_vec(order) {
            Ok(bytes) => {
                println!("Order transcript (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize the order to CBOR: {}", err);
            }
        }
        if self.show_answers_json {
            match to_string_pretty(order) {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize the order to JSON: {}", err);
                }
            }
        }
    }
}

/// Context used to format a single field prompt.
pub struct PromptContext {
    pub step_index: usize,
    pub step_count: usize,
    pub label: &'static str,
    pub current: String,
    pub choices: Option<&'static [&'static str]>,
    pub hint: Option<&'static str>,
}

impl PromptContext {
    pub fn new(field: FieldId, form: &OrderForm, cursor: StepCursor) -> Self {
        Self {
            step_index: cursor.index(),
            step_count: STEP_COUNT,
            label: field.label(),
            current: form.get(field).display(),
            choices: field.choices(),
            hint: field.hint(),
        }
    }
}

fn read_line() -> io::Result<Option<String>> {
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(&mut encoded, "{:02x}", byte);
    }
    encoded
}
