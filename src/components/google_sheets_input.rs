use super::options::{py_str_or_none, Quote};
use super::{de, resolve_as, PANDAS_IMPORT};
use crate::component::{Bindings, Category, CodeGenerator, ComponentDescriptor};
use crate::error::GenerateError;
use crate::schema::{ConfigSchema, FieldKind, FieldSpec};
use serde::Deserialize;
use serde_json::json;

pub const ID: &str = "googleSheetsInput";

const SCOPES: &str =
    "['https://spreadsheets.google.com/feeds', 'https://www.googleapis.com/auth/drive']";

/// Reads one worksheet of a Google spreadsheet through a service account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleSheetsInputConfig {
    /// Path to the service account key file.
    #[serde(deserialize_with = "de::opt_string")]
    pub file_path: Option<String>,
    pub sheet_options: SheetOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetOptions {
    #[serde(deserialize_with = "de::opt_string")]
    pub spreadsheet_id: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub range: Option<String>,
}

impl GoogleSheetsInputConfig {
    /// The worksheet part of the range, i.e. everything before `!`.
    pub fn worksheet(&self) -> Option<&str> {
        self.sheet_options
            .range
            .as_deref()
            .and_then(|range| range.split('!').next())
            .filter(|sheet| !sheet.is_empty())
    }
}

impl CodeGenerator for GoogleSheetsInputConfig {
    fn dependencies(&self) -> Vec<String> {
        vec!["gspread".to_string(), "oauth2client".to_string()]
    }

    fn helper_suffixes(&self) -> &'static [&'static str] {
        &["Scope", "Creds", "Client", "Sheet"]
    }

    fn imports(&self) -> Vec<String> {
        vec![
            PANDAS_IMPORT.to_string(),
            "import gspread".to_string(),
            "from oauth2client.service_account import ServiceAccountCredentials".to_string(),
        ]
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        let out = bindings.output()?;
        let key_file = py_str_or_none(self.file_path.as_deref(), Quote::Single);
        let spreadsheet =
            py_str_or_none(self.sheet_options.spreadsheet_id.as_deref(), Quote::Single);
        let worksheet = py_str_or_none(self.worksheet(), Quote::Single);

        let mut code = String::from("# Reading data from Google Sheets\n");
        code.push_str(&format!("{out}Scope = {SCOPES}\n"));
        code.push_str(&format!(
            "{out}Creds = ServiceAccountCredentials.from_json_keyfile_name({key_file}, {out}Scope)\n"
        ));
        code.push_str(&format!("{out}Client = gspread.authorize({out}Creds)\n"));
        code.push_str(&format!(
            "{out}Sheet = {out}Client.open_by_key({spreadsheet}).worksheet({worksheet})\n"
        ));
        code.push_str(&format!(
            "{out} = pd.DataFrame({out}Sheet.get_all_records())\n"
        ));
        Ok(code)
    }
}

pub fn descriptor() -> ComponentDescriptor {
    let fields = vec![
        FieldSpec::new("filePath", FieldKind::FilePath, "Service Account Key")
            .placeholder("Type file name")
            .validation(
                r"\.(json)$",
                "This field expects a file with a .json extension such as your-service-account-file.json.",
            )
            .required(),
        FieldSpec::new("sheetOptions.spreadsheetId", FieldKind::Text, "Spreadsheet ID")
            .placeholder("Enter Google Sheets' name or ID")
            .validation(r"^[a-zA-Z0-9_-]+$", "Invalid Spreadsheet ID.")
            .required(),
        FieldSpec::new("sheetOptions.range", FieldKind::Text, "Range")
            .placeholder("e.g., Sheet1 or Sheet1!A1:D5")
            .validation(r"^[a-zA-Z0-9_!:-]+$", "Invalid Range."),
    ];
    let defaults = json!({ "sheetOptions": { "spreadsheetId": "", "range": "Sheet1" } });

    ComponentDescriptor::new(
        ID,
        "G. Sheets Input",
        Category::Input,
        ConfigSchema::new(fields, defaults),
        resolve_as::<GoogleSheetsInputConfig>,
    )
    .with_icon("google-sheets")
}
