use colored::Colorize;
use std::process::ExitCode;

use gammatone::local::{process_file, simulate};
use gammatone::{load_config, Error, GammatoneFilterbank};

const USAGE: &str = "Usage:
  gammatone process <config.yaml> <input.csv> <output.csv>
  gammatone simulate <output.csv> <sample_rate_hz> <seconds> <freq_hz>...
  gammatone bands <config.yaml>";

fn parse_number(name: &str, value: &str) -> Result<f64, Error> {
    value
        .parse()
        .map_err(|e| Error::Parse(format!("invalid {} {:?}: {}", name, value, e)))
}

fn run(args: &[String]) -> Result<(), Error> {
    match args.first().map(String::as_str) {
        Some("process") if args.len() == 4 => {
            let summary = process_file::run(&args[1], &args[2], &args[3])?;
            println!(
                "{} {} samples through {} channels -> {}",
                "Filtered".green().bold(),
                summary.samples,
                summary.channels,
                args[3]
            );
        }
        Some("simulate") if args.len() >= 4 => {
            let sample_rate = parse_number("sample rate", &args[2])?;
            let seconds = parse_number("duration", &args[3])?;
            let frequencies = args[4..]
                .iter()
                .map(|f| parse_number("frequency", f))
                .collect::<Result<Vec<_>, _>>()?;
            let count = simulate::run(&args[1], sample_rate, seconds, &frequencies)?;
            println!(
                "{} {} samples -> {}",
                "Simulated".green().bold(),
                count,
                args[1]
            );
        }
        Some("bands") if args.len() == 2 => {
            let config = load_config(&args[1])?;
            let filterbank = GammatoneFilterbank::from_config(&config)?;
            println!("{:>5} {:>12} {:>12}", "index", "center_hz", "bandwidth_hz");
            for (index, channel) in filterbank.channels().iter().enumerate() {
                println!(
                    "{:>5} {:>12.2} {:>12.2}",
                    index,
                    channel.center_hz(),
                    channel.bandwidth_hz()
                );
            }
        }
        Some("help") | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
        }
        Some(command) => {
            return Err(Error::Parse(format!(
                "unrecognised or incomplete command {:?}\n{}",
                command, USAGE
            )));
        }
        None => return Err(Error::Parse(format!("no command given\n{}", USAGE))),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn unknown_command_fails() {
        assert!(matches!(run(&args(&["frobnicate"])), Err(Error::Parse(_))));
        assert!(matches!(run(&args(&[])), Err(Error::Parse(_))));
    }

    #[test]
    fn incomplete_command_fails() {
        assert!(matches!(
            run(&args(&["process", "config.yaml"])),
            Err(Error::Parse(_))
        ));
        assert!(matches!(run(&args(&["bands"])), Err(Error::Parse(_))));
    }

    #[test]
    fn help_succeeds() {
        assert!(run(&args(&["help"])).is_ok());
    }
}
