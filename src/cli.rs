//! Command-line interface definitions and argument parsing

use clap::Parser;
use std::path::{Path, PathBuf};

/// Exploratory data analysis CLI for retail sales CSV data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "Fashion_Retail_Sales.csv")]
    pub input: String,

    /// Directory where chart PNGs are written
    #[arg(short, long, default_value = "charts")]
    pub charts_dir: String,

    /// Path for the cleaned CSV (default: `<input stem>_Cleaned.csv` next to the input)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve the cleaned-dataset output path, deriving it from the input
    /// file name when no explicit override was given.
    pub fn cleaned_path(&self) -> PathBuf {
        if let Some(ref output) = self.output {
            return PathBuf::from(output);
        }

        let input = Path::new(&self.input);
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sales".to_string());
        input.with_file_name(format!("{}_Cleaned.csv", stem))
    }

    /// Path of a chart PNG inside the charts directory.
    pub fn chart_path(&self, name: &str) -> PathBuf {
        Path::new(&self.charts_dir).join(format!("{}.png", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str, output: Option<&str>) -> Args {
        Args {
            input: input.to_string(),
            charts_dir: "charts".to_string(),
            output: output.map(|s| s.to_string()),
            verbose: false,
        }
    }

    #[test]
    fn test_cleaned_path_derived_from_input() {
        let a = args("data/Fashion_Retail_Sales.csv", None);
        assert_eq!(
            a.cleaned_path(),
            PathBuf::from("data/Fashion_Retail_Sales_Cleaned.csv")
        );
    }

    #[test]
    fn test_cleaned_path_override() {
        let a = args("sales.csv", Some("out/clean.csv"));
        assert_eq!(a.cleaned_path(), PathBuf::from("out/clean.csv"));
    }

    #[test]
    fn test_chart_path() {
        let a = args("sales.csv", None);
        assert_eq!(
            a.chart_path("monthly_sales"),
            PathBuf::from("charts/monthly_sales.png")
        );
    }
}
