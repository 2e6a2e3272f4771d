//! Argument-count and syntax prediction for composite format templates.
#[macro_use]
pub mod flog;

mod options;
pub use options::{ScanOptions, DEFAULT_NUMERIC_LIMIT};

mod scan_impl;
pub use scan_impl::{scan, scan_with, Error, Prediction, Stop};

mod template;
pub use template::{Template, ToTemplate};


#[macro_export]
macro_rules! predict {
    // Variant which scans with default options.
    ($template:expr $(,)?) => {
        $crate::predict!($template, &$crate::ScanOptions::default())
    };

    // Variant which scans with the given options.
    (
        $template:expr, // template as anything implementing ToTemplate
        $options:expr // &ScanOptions
        $(,)? // optional trailing comma
    ) => {
        {
            #[allow(unused_imports)]
            use $crate::ToTemplate;
            let template = $template.to_template();
            let mut storage = ::std::vec::Vec::new();
            $crate::scan_with(template.as_chars(&mut storage), $options)
        }
    };
}

/// Predicts how many positional arguments a composite formatter needs for `template`,
/// and whether it would reject the template regardless of arguments.
///
/// # Parameters
/// - `template`: The template, or `None` if the caller has none.
///
/// # Returns
/// A `Prediction`, or `Error::MissingTemplate` if no template was supplied.
pub fn predict_format_arguments<'a, T: ToTemplate<'a>>(
    template: Option<T>,
) -> Result<Prediction, Error> {
    predict_format_arguments_with(template, &ScanOptions::default())
}

/// Like `predict_format_arguments`, with explicit scan options.
pub fn predict_format_arguments_with<'a, T: ToTemplate<'a>>(
    template: Option<T>,
    options: &ScanOptions,
) -> Result<Prediction, Error> {
    let Some(template) = template else {
        FLOG!(error, "no template supplied for argument prediction");
        return Err(Error::MissingTemplate);
    };
    let template = template.to_template();
    let mut storage = Vec::new();
    let prediction = scan_with(template.as_chars(&mut storage), options);
    FLOG!(
        format_scan_detail,
        "template of",
        template.char_len(),
        "chars needs",
        prediction.required_args(),
        "args, stopped at",
        prediction.stop()
    );
    Ok(prediction)
}
