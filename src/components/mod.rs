//! Built-in pipeline components.
//!
//! Each component module defines a strongly typed configuration record, the
//! [`CodeGenerator`] implementation for it, and the descriptor that binds the
//! two to a form schema. [`ComponentConfig`] is the tagged union over all of
//! them; the compiler dispatches on its variant.

use crate::component::{Bindings, CodeGenerator, ComponentRegistry};
use crate::error::{GenerateError, RegistryError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

mod de;
pub mod options;

pub mod console;
pub mod csv_file_input;
pub mod excel_file_output;
pub mod google_sheets_input;
pub mod mysql_input;
pub mod parquet_file_output;

pub use console::ConsoleConfig;
pub use csv_file_input::CsvFileInputConfig;
pub use excel_file_output::ExcelFileOutputConfig;
pub use google_sheets_input::GoogleSheetsInputConfig;
pub use mysql_input::MySqlInputConfig;
pub use parquet_file_output::ParquetFileOutputConfig;

/// The pandas import shared by every component.
pub(crate) const PANDAS_IMPORT: &str = "import pandas as pd";

/// Deserializes a configuration record into `T`. A `null` record is treated as empty.
pub(crate) fn resolve_as<T>(config: &Value) -> Result<ComponentConfig, serde_json::Error>
where
    T: DeserializeOwned + Into<ComponentConfig>,
{
    if config.is_null() {
        return T::deserialize(&Value::Object(Map::new())).map(Into::into);
    }
    T::deserialize(config).map(Into::into)
}

/// Master macro tying each component's typed configuration to its variant and its descriptor.
macro_rules! define_components {
    ( $( ($variant:ident, $config:ty, $module:ident) ),* $(,)? ) => {
        /// The resolved configuration of one node, tagged by component kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ComponentConfig {
            $( $variant($config), )*
        }

        impl ComponentConfig {
            fn generator(&self) -> &dyn CodeGenerator {
                match self {
                    $( ComponentConfig::$variant(config) => config, )*
                }
            }
        }

        $(
            impl From<$config> for ComponentConfig {
                fn from(config: $config) -> Self {
                    ComponentConfig::$variant(config)
                }
            }
        )*

        /// Registers every built-in component.
        pub fn register_default_components(
            registry: &mut ComponentRegistry,
        ) -> Result<(), RegistryError> {
            $( registry.register($module::descriptor())?; )*
            Ok(())
        }
    };
}

define_components! {
    (CsvFileInput, CsvFileInputConfig, csv_file_input),
    (GoogleSheetsInput, GoogleSheetsInputConfig, google_sheets_input),
    (MySqlInput, MySqlInputConfig, mysql_input),
    (ParquetFileOutput, ParquetFileOutputConfig, parquet_file_output),
    (ExcelFileOutput, ExcelFileOutputConfig, excel_file_output),
    (Console, ConsoleConfig, console),
}

impl CodeGenerator for ComponentConfig {
    fn dependencies(&self) -> Vec<String> {
        self.generator().dependencies()
    }

    fn helper_suffixes(&self) -> &'static [&'static str] {
        self.generator().helper_suffixes()
    }

    fn imports(&self) -> Vec<String> {
        self.generator().imports()
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        self.generator().generate(bindings)
    }
}
