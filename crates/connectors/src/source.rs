use serde::{Deserialize, Serialize};

/// Where the table files live: a directory path or a data source name.
/// Handed to drivers untouched apart from the connection-string helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub root: String,
}

impl DataSource {
    pub fn new(root: impl Into<String>) -> Self {
        DataSource { root: root.into() }
    }

    /// Connection string for the Microsoft dBASE ODBC driver.
    pub fn odbc_connection_string(&self) -> String {
        format!(
            "Driver={{Microsoft dBASE Driver (*.dbf)}};DefaultDir={}",
            self.root
        )
    }

    /// Connection string for the Visual FoxPro OLE DB provider.
    pub fn oledb_connection_string(&self) -> String {
        format!("Provider=VFPOLEDB.1;Data Source={}", self.root)
    }
}
