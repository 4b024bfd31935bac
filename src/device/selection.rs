//! Choosing the target device.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::Device;
use crate::error::DeviceError;

const TABLE_HEADERS: [&str; 3] = ["Index", "Serial", "Model"];

/// Asks the user which of several devices to use.
pub trait SelectionPrompt {
    /// Present `devices` and return the raw line the user entered.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` when the prompt cannot be shown or read.
    fn choose(&mut self, devices: &[Device]) -> io::Result<String>;
}

/// Prompt that prints a device table and reads one line of input.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    /// Prompt on the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Prompt over arbitrary streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt and return its output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> SelectionPrompt for TerminalPrompt<R, W> {
    fn choose(&mut self, devices: &[Device]) -> io::Result<String> {
        let last_index = devices.len().saturating_sub(1);
        writeln!(self.output, "Found more than one devices:")?;
        write!(self.output, "{}", render_device_table(devices))?;
        write!(
            self.output,
            "\nEnter the index of devices(0 ~ {last_index}): "
        )?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }
}

/// Pick the device to push to.
///
/// A single device is returned without prompting. With several devices the
/// prompt is consulted exactly once; input that is not an index into
/// `devices` is rejected rather than asked again.
///
/// # Errors
///
/// Returns `DeviceError::NoDevices` for an empty list,
/// `DeviceError::InvalidSelection` for a bad answer, and
/// `DeviceError::PromptFailed` when the prompt itself fails.
pub fn select_device<P: SelectionPrompt + ?Sized>(
    devices: Vec<Device>,
    prompt: &mut P,
) -> Result<Device, DeviceError> {
    if devices.len() <= 1 {
        return devices.into_iter().next().ok_or(DeviceError::NoDevices);
    }

    let answer = prompt
        .choose(&devices)
        .map_err(|error| DeviceError::PromptFailed {
            message: error.to_string(),
        })?;
    let input = answer.trim();
    let max_index = devices.len().saturating_sub(1);

    input
        .parse::<usize>()
        .ok()
        .and_then(|index| devices.into_iter().nth(index))
        .ok_or_else(|| DeviceError::InvalidSelection {
            input: input.to_owned(),
            max_index,
        })
}

/// Render devices as a bordered table with Index, Serial and Model columns.
#[must_use]
pub fn render_device_table(devices: &[Device]) -> String {
    let rows: Vec<[String; 3]> = devices
        .iter()
        .enumerate()
        .map(|(index, device)| {
            [
                index.to_string(),
                device.serial().to_owned(),
                device.model().to_owned(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths.iter().fold(String::from("+"), |mut line, width| {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
        line
    });

    let mut table = String::new();
    let header_cells = TABLE_HEADERS.map(String::from);
    for line in [border.clone(), table_row(&header_cells, &widths), border.clone()] {
        table.push_str(&line);
        table.push('\n');
    }
    for row in &rows {
        table.push_str(&table_row(row, &widths));
        table.push('\n');
    }
    table.push_str(&border);
    table.push('\n');
    table
}

fn table_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    cells
        .iter()
        .zip(widths.iter().copied())
        .fold(String::from("|"), |mut line, (cell, width)| {
            line.push_str(&format!(" {cell:^width$} |"));
            line
        })
}
