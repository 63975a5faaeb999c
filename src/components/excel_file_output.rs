use super::options::{py_str, OptionList, Quote};
use super::{de, resolve_as, PANDAS_IMPORT};
use crate::component::{Bindings, Category, CodeGenerator, ComponentDescriptor};
use crate::error::GenerateError;
use crate::schema::{ConfigSchema, FieldKind, FieldOption, FieldSpec};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const ID: &str = "excelFileOutput";

/// Mode value selecting append; every other value writes a fresh file.
pub const APPEND_MODE: &str = "a";

/// Writes the incoming data frame to an Excel workbook.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcelFileOutputConfig {
    #[serde(deserialize_with = "de::opt_string")]
    pub file_path: Option<String>,
    pub excel_options: ExcelOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExcelOptions {
    #[serde(alias = "sheet", deserialize_with = "de::opt_string")]
    pub sheet_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub mode: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ExcelFileOutputConfig {
    pub fn appends(&self) -> bool {
        self.excel_options.mode.as_deref() == Some(APPEND_MODE)
    }

    fn options(&self) -> OptionList {
        let mut list = OptionList::new(Quote::Single).with_fixed(&["excel_writer", "index"]);
        list.text("sheet_name", self.excel_options.sheet_name.as_deref());
        for (key, value) in &self.excel_options.extra {
            list.extra(key, value);
        }
        list
    }
}

impl CodeGenerator for ExcelFileOutputConfig {
    fn dependencies(&self) -> Vec<String> {
        vec!["openpyxl".to_string()]
    }

    fn imports(&self) -> Vec<String> {
        vec![PANDAS_IMPORT.to_string()]
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        let input = bindings.input()?;
        let path = py_str(self.file_path.as_deref().unwrap_or_default(), Quote::Single);
        let options = self.options().render_trailing();

        let code = if self.appends() {
            format!(
                "# Export to Excel file\nwith pd.ExcelWriter({}, mode='a') as writer:\n    {}.to_excel(writer, index=False{})\n",
                path, input, options
            )
        } else {
            format!(
                "# Export to Excel file\n{}.to_excel({}, index=False{})\n",
                input, path, options
            )
        };
        Ok(code)
    }
}

pub fn descriptor() -> ComponentDescriptor {
    let fields = vec![
        FieldSpec::new("filePath", FieldKind::FilePath, "File path")
            .placeholder("Type file name")
            .validation(
                r"\.(xlsx)$",
                "This field expects a file with a xlsx extension such as output.xlsx.",
            )
            .required(),
        FieldSpec::new("excelOptions.sheet_name", FieldKind::Text, "Sheet")
            .placeholder("default: Sheet1"),
        FieldSpec::new("excelOptions.mode", FieldKind::Radio, "Mode")
            .options(vec![
                FieldOption::new("w", "Write"),
                FieldOption::new(APPEND_MODE, "Append"),
            ])
            .advanced(),
    ];
    let defaults = json!({ "excelOptions": {} });

    ComponentDescriptor::new(
        ID,
        "Excel File Output",
        Category::Output,
        ConfigSchema::new(fields, defaults),
        resolve_as::<ExcelFileOutputConfig>,
    )
    .with_icon("file-plus")
    .with_file_drop(&["xlsx"])
}
