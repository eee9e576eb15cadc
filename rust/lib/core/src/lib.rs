pub mod config;
pub mod error;

pub use config::{
    CheckerConfig, ColumnsConfig, DatabaseConfig, FilesConfig, SwVersionsColumns, TablesConfig,
    TopModelsColumns,
};
pub use error::CheckError;
