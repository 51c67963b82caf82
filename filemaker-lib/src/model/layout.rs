//! Layout destination

/// The layout a query is sent to.
///
/// Requests on the XML gateway always target a layout within a database.
/// The database normally comes from [`Config`](crate::Config); a layout can
/// override it to reach a second file on the same server.
///
/// # Examples
///
/// ```
/// use filemaker_lib::model::Layout;
///
/// let layout = Layout::new("Customers");
/// assert_eq!(layout.name(), "Customers");
/// assert_eq!(layout.database(), None);
///
/// let layout = Layout::new("Invoices").in_database("Billing");
/// assert_eq!(layout.database(), Some("Billing"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    name: String,
    database: Option<String>,
}

impl Layout {
    /// Creates a layout in the configured database.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: None,
        }
    }

    /// Targets the layout in a specific database.
    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Returns the layout name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the database override, if set.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }
}

impl From<&str> for Layout {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Layout {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.database {
            Some(database) => write!(f, "{}/{}", database, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
