pub use daybook_core::format::OutputFormat;

use clap::builder::PossibleValuesParser;
use clap::builder::TypedValueParser;

/// `--format` parser: the listed values, mapped through `FromStr`
pub fn format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new(["human", "json"]).try_map(|s| s.parse::<OutputFormat>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Probe {
        #[arg(long, default_value = "human", value_parser = format_parser())]
        format: OutputFormat,
    }

    #[test]
    fn test_format_values() {
        let probe = Probe::try_parse_from(["probe", "--format", "json"]).unwrap();
        assert_eq!(probe.format, OutputFormat::Json);
        assert_eq!(
            Probe::try_parse_from(["probe"]).unwrap().format,
            OutputFormat::Human
        );
        assert!(Probe::try_parse_from(["probe", "--format", "records"]).is_err());
    }
}
