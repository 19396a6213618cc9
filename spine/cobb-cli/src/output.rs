//! Angle output formatting.

use clap::ValueEnum;

/// How measured angles are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma separated degrees.
    List,
    /// JSON array of degrees.
    Json,
}

/// Render angles in the requested format.
pub fn format_angles(degrees: &[f64], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::List => Ok(degrees
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", ")),
        OutputFormat::Json => serde_json::to_string(degrees),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list() {
        assert_eq!(
            format_angles(&[0.0, 12.5, 30.25], OutputFormat::List).unwrap(),
            "0, 12.5, 30.25"
        );
        assert_eq!(format_angles(&[], OutputFormat::List).unwrap(), "");
    }

    #[test]
    fn json() {
        let text = format_angles(&[1.5, 9.0], OutputFormat::Json).unwrap();
        let parsed: Vec<f64> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![1.5, 9.0]);
        assert_eq!(format_angles(&[], OutputFormat::Json).unwrap(), "[]");
    }
}
