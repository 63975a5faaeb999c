use super::options::{comment_text, py_str, OptionList, Quote, NONE_SENTINEL};
use super::{de, resolve_as, PANDAS_IMPORT};
use crate::component::{Bindings, Category, CodeGenerator, ComponentDescriptor};
use crate::error::GenerateError;
use crate::schema::{ConfigSchema, FieldKind, FieldOption, FieldSpec};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const ID: &str = "csvFileInput";

/// Separator value asking pandas to sniff the delimiter.
const INFER_SEPARATOR: &str = "infer";

/// Reads a delimited text file into a data frame.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CsvFileInputConfig {
    #[serde(deserialize_with = "de::opt_string")]
    pub file_path: Option<String>,
    pub csv_options: CsvOptions,
}

/// Keyword arguments forwarded to `pd.read_csv`.
///
/// Keys the form does not know about are kept in `extra` and passed through.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    #[serde(deserialize_with = "de::opt_string")]
    pub sep: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub header: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub on_bad_lines: Option<String>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub verbose: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CsvFileInputConfig {
    fn options(&self) -> OptionList {
        let opts = &self.csv_options;
        let infer = opts.sep.as_deref() == Some(INFER_SEPARATOR);

        let mut list = OptionList::new(Quote::Single).with_fixed(&["filepath_or_buffer"]);
        if infer {
            list.raw("sep", NONE_SENTINEL).text("engine", Some("python"));
        } else {
            list.text("sep", opts.sep.as_deref());
        }
        list.integer_or_text("header", opts.header.as_deref())
            .text("on_bad_lines", opts.on_bad_lines.as_deref())
            .flag("verbose", opts.verbose);

        for (key, value) in &opts.extra {
            list.extra(key, value);
        }
        list
    }
}

impl CodeGenerator for CsvFileInputConfig {
    fn imports(&self) -> Vec<String> {
        vec![PANDAS_IMPORT.to_string()]
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        let output = bindings.output()?;
        let path = self.file_path.as_deref().unwrap_or_default();
        Ok(format!(
            "# Reading data from {}\n{} = pd.read_csv({}{}).convert_dtypes()\n",
            comment_text(path),
            output,
            py_str(path, Quote::Single),
            self.options().render_trailing()
        ))
    }
}

pub fn descriptor() -> ComponentDescriptor {
    let fields = vec![
        FieldSpec::new("filePath", FieldKind::FilePath, "File path")
            .placeholder("Type file name")
            .validation(
                r"\.(csv|tsv|txt)$",
                "This field expects a file with a csv, tsv or txt extension such as input.csv.",
            )
            .required(),
        FieldSpec::new("csvOptions.sep", FieldKind::SingleSelect, "Separator")
            .placeholder("default: ,")
            .options(vec![
                FieldOption::disabled("null", "Select or type delimiter"),
                FieldOption::new(",", "comma (,)"),
                FieldOption::new(";", "semicolon (;)"),
                FieldOption::new(" ", "space"),
                FieldOption::new("\t", "tab"),
                FieldOption::new("|", "pipe (|)"),
                FieldOption::new(INFER_SEPARATOR, "infer (tries to auto detect)"),
            ]),
        FieldSpec::new("csvOptions.header", FieldKind::Text, "Header")
            .placeholder("infer")
            .advanced(),
        FieldSpec::new("csvOptions.on_bad_lines", FieldKind::SingleSelect, "On Bad Lines")
            .placeholder("error")
            .options(vec![
                FieldOption::new("error", "Error: raise an Exception when a bad line is encountered"),
                FieldOption::new("warn", "Warn: raise a warning and skip the bad line"),
                FieldOption::new("skip", "Skip: skip bad lines silently"),
            ])
            .advanced(),
        FieldSpec::new("csvOptions.verbose", FieldKind::Boolean, "Verbose")
            .placeholder("false")
            .advanced(),
    ];
    let defaults = json!({ "csvOptions": { "sep": "," } });

    ComponentDescriptor::new(
        ID,
        "CSV File Input",
        Category::Input,
        ConfigSchema::new(fields, defaults),
        resolve_as::<CsvFileInputConfig>,
    )
    .with_icon("file-text")
    .with_file_drop(&["csv", "tsv"])
}
