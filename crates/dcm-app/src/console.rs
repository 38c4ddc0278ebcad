//! Line-oriented console protocol.
//!
//! Each cycle writes the current state as two lines (`ia`, then `w`), reads one
//! whitespace-separated triple `Vt Tlc Tlw` and advances the session by one
//! sample. Tokens of a triple may be split across lines.
//!
//! End of input before the first token of a triple ends the session cleanly.
//! A partial triple, a token that is not a number, or a non-finite value is
//! reported as [`AppError::MalformedInput`]; the engine only ever sees
//! well-formed inputs.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use dcm_sim::{MotorInputs, MotorState, SimSession};

use crate::error::{AppError, AppResult};

const INPUT_NAMES: [&str; 3] = ["Vt", "Tlc", "Tlw"];

/// Outcome of a console session that ended at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSummary {
    /// Input triples consumed.
    pub samples: u64,
}

struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
    line: Vec<u8>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            line: Vec::new(),
        }
    }

    fn next_token(&mut self) -> AppResult<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            // Invalid UTF-8 becomes U+FFFD and fails to parse as a number
            let text = String::from_utf8_lossy(&self.line);
            self.pending
                .extend(text.split_whitespace().map(str::to_owned));
        }
    }

    /// Next input triple, or `None` at a clean end of input.
    fn next_inputs(&mut self) -> AppResult<Option<MotorInputs>> {
        let mut values = [0.0; 3];
        for (i, name) in INPUT_NAMES.iter().enumerate() {
            let token = match self.next_token()? {
                Some(token) => token,
                None if i == 0 => return Ok(None),
                None => {
                    return Err(AppError::MalformedInput(format!(
                        "input ended after {i} of 3 values"
                    )));
                }
            };
            values[i] = parse_value(&token, name)?;
        }
        Ok(Some(MotorInputs::new(values[0], values[1], values[2])))
    }
}

fn parse_value(token: &str, name: &str) -> AppResult<f64> {
    let value: f64 = token
        .parse()
        .map_err(|_| AppError::MalformedInput(format!("{name}: '{token}' is not a number")))?;
    if !value.is_finite() {
        return Err(AppError::MalformedInput(format!(
            "{name}: '{token}' is not finite"
        )));
    }
    Ok(value)
}

fn write_state<W: Write>(output: &mut W, state: &MotorState) -> AppResult<()> {
    writeln!(output, "{}", state.ia)?;
    writeln!(output, "{}", state.w)?;
    output.flush()?;
    Ok(())
}

/// Serve the console protocol until `input` is exhausted.
pub fn run_console<R: BufRead, W: Write>(
    session: &mut SimSession,
    input: R,
    mut output: W,
) -> AppResult<ConsoleSummary> {
    let mut reader = TokenReader::new(input);
    let mut samples = 0u64;

    tracing::info!(
        steps_per_sample = session.steps_per_sample(),
        "console session started"
    );
    write_state(&mut output, &session.start())?;

    loop {
        let inputs = match reader.next_inputs() {
            Ok(Some(inputs)) => inputs,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, samples, "console session aborted");
                return Err(e);
            }
        };
        let state = session.advance(inputs)?;
        samples += 1;
        write_state(&mut output, &state)?;
    }

    tracing::info!(samples, time = session.time(), "console session ended");
    Ok(ConsoleSummary { samples })
}
