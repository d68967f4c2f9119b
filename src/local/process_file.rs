use colored::Colorize;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::processing::filterbank::GammatoneFilterbank;
use crate::processing::output::{ChannelOutput, FilterbankOutput};

/// Samples fed to the streaming filterbank per step.
pub const CHUNK_SIZE: usize = 10000;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSummary {
    pub samples: usize,
    pub channels: usize,
    pub chunks: usize,
}

/// Reads the first column of `file_path`, one sample per row. A leading
/// header row is skipped if it does not parse as a number.
pub fn read_signal_from_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(File::open(file_path)?);

    let mut samples = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let field = match record.get(0) {
            Some(field) => field.trim(),
            None => continue,
        };
        match field.parse::<f64>() {
            Ok(value) => samples.push(value),
            Err(_) if row == 0 => continue,
            Err(e) => {
                return Err(Error::Parse(format!(
                    "row {}: invalid sample {:?}: {}",
                    row + 1,
                    field,
                    e
                )))
            }
        }
    }

    Ok(samples)
}

/// Writes one column per channel (`re`/`im` pairs for complex output),
/// one row per sample.
pub fn write_output_csv<P: AsRef<Path>>(
    file_path: P,
    center_frequencies: &[f64],
    output: &FilterbankOutput,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(file_path)?;

    let mut header = Vec::new();
    for (index, (channel, cf)) in output.iter().zip(center_frequencies).enumerate() {
        match channel {
            ChannelOutput::Real(_) => header.push(format!("ch{}_{:.1}Hz", index, cf)),
            ChannelOutput::Complex(_) => {
                header.push(format!("ch{}_{:.1}Hz_re", index, cf));
                header.push(format!("ch{}_{:.1}Hz_im", index, cf));
            }
        }
    }
    wtr.write_record(&header)?;

    let mut row = Vec::with_capacity(header.len());
    for t in 0..output.num_samples() {
        row.clear();
        for channel in output.iter() {
            match channel {
                ChannelOutput::Real(samples) => row.push(samples[t].to_string()),
                ChannelOutput::Complex(samples) => {
                    row.push(samples[t].re.to_string());
                    row.push(samples[t].im.to_string());
                }
            }
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Filters a CSV signal with the filterbank described by a YAML config and
/// writes the channel outputs to `output_path`.
pub fn run<P: AsRef<Path>>(config_path: P, input_path: P, output_path: P) -> Result<ProcessSummary> {
    let config = load_config(&config_path)?;
    let filterbank = GammatoneFilterbank::from_config(&config)?;

    let samples = read_signal_from_csv(&input_path)?;
    if samples.is_empty() {
        return Err(crate::error::SignalError::Empty.into());
    }

    let total_chunks = (samples.len() + CHUNK_SIZE - 1) / CHUNK_SIZE;
    let mut stream = filterbank.stream();
    let mut output = FilterbankOutput::default();

    for (index, chunk) in samples.chunks(CHUNK_SIZE).enumerate() {
        let start_time = Instant::now();
        output.append(stream.process_chunk(chunk)?)?;
        println!(
            "{} chunk {} / {} in {:?}",
            "Processed".green(),
            index + 1,
            total_chunks,
            start_time.elapsed()
        );
    }

    write_output_csv(&output_path, &filterbank.center_frequencies(), &output)?;

    Ok(ProcessSummary {
        samples: samples.len(),
        channels: filterbank.num_channels(),
        chunks: total_chunks,
    })
}
