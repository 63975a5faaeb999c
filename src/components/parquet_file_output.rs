use super::options::{py_str, OptionList, Quote};
use super::{de, resolve_as, PANDAS_IMPORT};
use crate::component::{Bindings, Category, CodeGenerator, ComponentDescriptor};
use crate::error::GenerateError;
use crate::schema::{ConfigSchema, FieldKind, FieldOption, FieldSpec};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const ID: &str = "parquetFileOutput";

/// Writes the incoming data frame to a Parquet file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParquetFileOutputConfig {
    #[serde(deserialize_with = "de::opt_string")]
    pub file_path: Option<String>,
    pub parquet_options: ParquetOptions,
    #[serde(deserialize_with = "de::opt_bool")]
    pub create_folders_if_not_exist: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParquetOptions {
    #[serde(deserialize_with = "de::opt_string")]
    pub compression: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ParquetFileOutputConfig {
    fn creates_folders(&self) -> bool {
        self.create_folders_if_not_exist.unwrap_or(false)
    }

    fn options(&self) -> OptionList {
        let mut list = OptionList::new(Quote::Double).with_fixed(&["path"]);
        list.text("compression", self.parquet_options.compression.as_deref());
        for (key, value) in &self.parquet_options.extra {
            list.extra(key, value);
        }
        list
    }
}

impl CodeGenerator for ParquetFileOutputConfig {
    fn dependencies(&self) -> Vec<String> {
        vec!["pyarrow".to_string()]
    }

    fn imports(&self) -> Vec<String> {
        let mut imports = vec![PANDAS_IMPORT.to_string()];
        if self.creates_folders() {
            imports.push("import os".to_string());
        }
        imports
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        let input = bindings.input()?;
        let path = py_str(self.file_path.as_deref().unwrap_or_default(), Quote::Double);

        let mut code = String::from("# Export to Parquet file\n");
        if self.creates_folders() {
            // dirname() is empty for bare file names, which makedirs rejects.
            code.push_str(&format!(
                "os.makedirs(os.path.dirname({}) or \".\", exist_ok=True)\n",
                path
            ));
        }
        code.push_str(&format!(
            "{}.to_parquet({}{})\n",
            input,
            path,
            self.options().render_trailing()
        ));
        Ok(code)
    }
}

pub fn descriptor() -> ComponentDescriptor {
    let fields = vec![
        FieldSpec::new("filePath", FieldKind::FilePath, "File path")
            .placeholder("Type file name")
            .validation(
                r"\.(parquet)$",
                "This field expects a file with a .parquet extension such as output.parquet.",
            )
            .required(),
        FieldSpec::new("parquetOptions.compression", FieldKind::Radio, "Compression")
            .options(vec![
                FieldOption::new("snappy", "Snappy"),
                FieldOption::new("gzip", "GZip"),
                FieldOption::new("brotli", "Brotli"),
                FieldOption::new("None", "None"),
            ])
            .advanced(),
        FieldSpec::new(
            "createFoldersIfNotExist",
            FieldKind::Boolean,
            "Create folders if don't exist",
        )
        .advanced(),
    ];
    let defaults = json!({ "parquetOptions": { "compression": "snappy" } });

    ComponentDescriptor::new(
        ID,
        "Parquet File Output",
        Category::Output,
        ConfigSchema::new(fields, defaults),
        resolve_as::<ParquetFileOutputConfig>,
    )
    .with_icon("file-plus")
}
