//! Format output dispatch helpers

/// Dispatch on the output format.
///
/// The JSON branch is an expression returning `Result<()>`; the human branch
/// is a block and the macro supplies the `Ok(())`.
///
/// ```rust,ignore
/// output_by_format!(cli.format,
///     json => print_json(&report),
///     human => { println!("{} entries", report.len()); }
/// )
/// ```
#[macro_export]
macro_rules! output_by_format {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
