use super::options::{comment_text, py_str, Quote};
use super::{de, resolve_as, PANDAS_IMPORT};
use crate::component::{Bindings, Category, CodeGenerator, ComponentDescriptor};
use crate::error::GenerateError;
use crate::schema::{ConfigSchema, FieldKind, FieldSpec};
use serde::Deserialize;
use serde_json::json;

pub const ID: &str = "mySQLInput";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "3306";
const ENGINE_SUFFIX: &str = "_Engine";

/// Reads a whole MySQL table into a data frame.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MySqlInputConfig {
    pub db_options: DbOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DbOptions {
    #[serde(deserialize_with = "de::opt_string")]
    pub host: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub port: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub database_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub username: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub password: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub table_name: Option<String>,
}

impl MySqlInputConfig {
    /// SQLAlchemy URL; credentials are percent-encoded so that `@`, `:` and
    /// `/` in passwords survive.
    pub fn connection_url(&self) -> String {
        let db = &self.db_options;
        let user = urlencoding::encode(db.username.as_deref().unwrap_or_default());
        let password = urlencoding::encode(db.password.as_deref().unwrap_or_default());
        format!(
            "mysql+pymysql://{}:{}@{}:{}/{}",
            user,
            password,
            db.host.as_deref().unwrap_or(DEFAULT_HOST),
            db.port.as_deref().unwrap_or(DEFAULT_PORT),
            db.database_name.as_deref().unwrap_or_default()
        )
    }
}

impl CodeGenerator for MySqlInputConfig {
    fn dependencies(&self) -> Vec<String> {
        vec!["sqlalchemy".to_string(), "pymysql".to_string()]
    }

    fn helper_suffixes(&self) -> &'static [&'static str] {
        &[ENGINE_SUFFIX]
    }

    fn imports(&self) -> Vec<String> {
        vec![
            PANDAS_IMPORT.to_string(),
            "import sqlalchemy".to_string(),
            "import pymysql".to_string(),
        ]
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        let out = bindings.output()?;
        let engine = format!("{}{}", out, ENGINE_SUFFIX);
        let table = self.db_options.table_name.as_deref().unwrap_or_default();
        Ok(format!(
            "# Connect to the MySQL database\n# Reading table {}\n{} = sqlalchemy.create_engine({})\n{} = pd.read_sql_table({}, {}).convert_dtypes()\n",
            comment_text(table),
            engine,
            py_str(&self.connection_url(), Quote::Single),
            out,
            py_str(table, Quote::Single),
            engine
        ))
    }
}

pub fn descriptor() -> ComponentDescriptor {
    let fields = vec![
        FieldSpec::new("dbOptions.host", FieldKind::Text, "Host")
            .placeholder("Enter database host")
            .advanced(),
        FieldSpec::new("dbOptions.port", FieldKind::Text, "Port")
            .placeholder("Enter database port")
            .validation(r"^[0-9]+$", "The port must be a number.")
            .advanced(),
        FieldSpec::new("dbOptions.databaseName", FieldKind::Text, "Database Name")
            .placeholder("Enter database name")
            .required(),
        FieldSpec::new("dbOptions.username", FieldKind::Text, "Username")
            .placeholder("Enter username")
            .advanced(),
        FieldSpec::new("dbOptions.password", FieldKind::Password, "Password")
            .placeholder("Enter password")
            .advanced(),
        FieldSpec::new("dbOptions.tableName", FieldKind::Text, "Table Name")
            .placeholder("Enter table name")
            .required(),
    ];
    let defaults = json!({
        "dbOptions": {
            "host": DEFAULT_HOST,
            "port": DEFAULT_PORT,
            "databaseName": "",
            "username": "",
            "password": "",
            "tableName": ""
        }
    });

    ComponentDescriptor::new(
        ID,
        "MySQL Input",
        Category::Input,
        ConfigSchema::new(fields, defaults),
        resolve_as::<MySqlInputConfig>,
    )
    .with_icon("mysql")
}
