//! Find request builder.

use std::collections::BTreeMap;

use url::Url;

use super::QueryValue;
use super::SortOrder;
use crate::Config;
use crate::error::ConfigError;
use crate::error::Error;
use crate::error::MAX_SORT_KEYS;
use crate::error::ParameterError;
use crate::model::Layout;

/// Path of the `fmresultset` grammar on the XML gateway.
const XML_GATEWAY_PATH: &str = "/fmi/xml/fmresultset.xml";

/// The find command a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Find records matching the search options.
    Find,
    /// Return every record in the layout's table.
    FindAll,
    /// Return one random record.
    FindAny,
}

impl Command {
    /// Returns the protocol flag for this command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "-find",
            Self::FindAll => "-findall",
            Self::FindAny => "-findany",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for the parameters of one find request.
///
/// Each directive writes only its own keys, so calling a directive again
/// replaces the indices it touches and leaves every other key in place.
/// Sort indices are 1-based and follow argument order.
///
/// # Example
///
/// ```
/// use filemaker_lib::api::query::Command;
/// use filemaker_lib::api::query::QueryBuilder;
/// use filemaker_lib::Config;
///
/// let config = Config::builder()
///     .host("fm.example.com")
///     .database("Contacts")
///     .build()?;
///
/// let url = QueryBuilder::new("Web")
///     .sort_field(["LastName"])?
///     .max(10)
///     .build_url(&config, Command::FindAll)?;
///
/// assert_eq!(
///     url.as_str(),
///     "https://fm.example.com/fmi/xml/fmresultset.xml?-db=Contacts&-lay=Web&-max=10&-sortfield.1=LastName&-findall"
/// );
/// # Ok::<(), filemaker_lib::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    layout: Layout,
    query: BTreeMap<String, QueryValue>,
}

impl QueryBuilder {
    /// Creates an empty query bound to a layout.
    pub fn new(layout: impl Into<Layout>) -> Self {
        Self {
            layout: layout.into(),
            query: BTreeMap::new(),
        }
    }

    /// Creates an empty query bound to the config's default layout.
    ///
    /// Fails with [`ConfigError::MissingLayout`] if none is set.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config
            .default_layout()
            .map(Self::new)
            .ok_or(ConfigError::MissingLayout)
    }

    /// Merges raw protocol parameters into the query verbatim.
    ///
    /// Keys are not validated; callers pass protocol-shaped keys such as
    /// field names for find criteria or `-lop`.
    pub fn search_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: Into<QueryValue>,
    {
        for (key, value) in options {
            self.query.insert(key.to_string(), value.into());
        }
        self
    }

    /// Sets `-sortfield.1` through `-sortfield.N` in argument order.
    ///
    /// Fails if more than nine fields are given.
    pub fn sort_field<I, S>(mut self, fields: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.len() > MAX_SORT_KEYS {
            return Err(ParameterError::TooManySortFields {
                count: fields.len(),
            });
        }

        for (i, field) in fields.into_iter().enumerate() {
            self.query
                .insert(format!("-sortfield.{}", i + 1), QueryValue::Text(field));
        }
        Ok(self)
    }

    /// Sets `-sortorder.1` through `-sortorder.N` in argument order.
    ///
    /// `"asc"` and `"desc"` become `ascend` and `descend`; other tokens
    /// (value list names for custom orders) pass through. Fails if more
    /// than nine orders are given.
    pub fn sort_order<I, S>(mut self, orders: I) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SortOrder>,
    {
        let orders: Vec<SortOrder> = orders.into_iter().map(Into::into).collect();
        if orders.len() > MAX_SORT_KEYS {
            return Err(ParameterError::TooManySortOrders {
                count: orders.len(),
            });
        }

        for (i, order) in orders.into_iter().enumerate() {
            self.query.insert(
                format!("-sortorder.{}", i + 1),
                QueryValue::Text(order.as_str().to_string()),
            );
        }
        Ok(self)
    }

    /// Limits the number of records returned (`-max`).
    pub fn max(mut self, value: usize) -> Self {
        self.query.insert("-max".to_string(), value.into());
        self
    }

    /// Skips the first `value` records of the found set (`-skip`).
    pub fn skip(mut self, value: usize) -> Self {
        self.query.insert("-skip".to_string(), value.into());
        self
    }

    /// Returns the destination layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the accumulated parameters.
    pub fn query(&self) -> &BTreeMap<String, QueryValue> {
        &self.query
    }

    /// Consumes the builder and returns the parameters.
    pub fn into_query(self) -> BTreeMap<String, QueryValue> {
        self.query
    }

    /// Builds the gateway URL for this query.
    ///
    /// The query string is `-db`, `-lay`, every accumulated parameter in
    /// key order, then the command flag. The database comes from the
    /// layout if it names one, else from the config.
    pub fn build_url(&self, config: &Config, command: Command) -> Result<Url, Error> {
        let database = self
            .layout
            .database()
            .or(config.database())
            .ok_or(ConfigError::MissingDatabase)?;

        let mut url = config
            .base_url()?
            .join(XML_GATEWAY_PATH)
            .map_err(|source| ConfigError::InvalidHost {
                host: config.host().to_string(),
                source,
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("-db", database);
            pairs.append_pair("-lay", self.layout.name());
            for (key, value) in &self.query {
                pairs.append_pair(key, &value.to_string());
            }
            pairs.append_key_only(command.as_str());
        }

        if config.log_actions() {
            log::info!("{} {}", command, url);
        }

        Ok(url)
    }
}
