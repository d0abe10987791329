use clap::Parser;
use std::path::PathBuf;

/// Dual-track Tamil and world history timeline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Normalized items JSON (an array of events)
    #[arg(short = 'd', long = "data", value_name = "FILE", conflicts_with_all = ["events", "csv"])]
    pub data: Option<PathBuf>,

    /// Raw events export to normalize (needs --categories)
    #[arg(long = "events", value_name = "FILE", requires = "categories", conflicts_with = "csv")]
    pub events: Option<PathBuf>,

    /// Raw categories export used to name event categories
    #[arg(long = "categories", value_name = "FILE", requires = "events")]
    pub categories: Option<PathBuf>,

    /// Import events from a CSV file
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Settings file (default: the platform config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of decorative card images (overrides the setting)
    #[arg(long = "images", value_name = "DIR")]
    pub image_dir: Option<PathBuf>,

    /// Increase logging verbosity (default: info, -v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Where the initial dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Sample,
    Items(PathBuf),
    RawExport { events: PathBuf, categories: PathBuf },
    Csv(PathBuf),
}

impl Args {
    pub fn data_source(&self) -> DataSource {
        if let Some(path) = &self.data {
            return DataSource::Items(path.clone());
        }
        if let (Some(events), Some(categories)) = (&self.events, &self.categories) {
            return DataSource::RawExport {
                events: events.clone(),
                categories: categories.clone(),
            };
        }
        match &self.csv {
            Some(path) => DataSource::Csv(path.clone()),
            None => DataSource::Sample,
        }
    }

    /// Default `env_logger` filter for the verbosity flag.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("tamil-timeline").chain(args.iter().copied()))
    }

    #[test]
    fn no_flags_uses_sample() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.data_source(), DataSource::Sample);
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn raw_export_needs_both_files() {
        assert!(parse(&["--events", "e.json"]).is_err());
        let args = parse(&["--events", "e.json", "--categories", "c.json"]).unwrap();
        assert_eq!(
            args.data_source(),
            DataSource::RawExport {
                events: "e.json".into(),
                categories: "c.json".into()
            }
        );
    }

    #[test]
    fn data_sources_conflict() {
        assert!(parse(&["--data", "a.json", "--csv", "b.csv"]).is_err());
        let args = parse(&["--csv", "b.csv", "-vv"]).unwrap();
        assert_eq!(args.data_source(), DataSource::Csv("b.csv".into()));
        assert_eq!(args.log_filter(), "trace");
    }
}
