//! Grammar dialect configuration
//!
//! A [`Dialect`] is an immutable value built once before a parse and threaded
//! into every grammar function. The parser never inspects the raw fields; it
//! asks feature questions (`supports_switch`, `supports_maps`, ...) so that
//! vendor and extension implications live in one place.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// W3C XQuery language version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XQueryVersion {
    V1_0,
    V3_0,
    #[default]
    V3_1,
}

/// XQuery Update Facility version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateVersion {
    V1_0,
    V3_0,
}

/// Version of a vendor product, e.g. MarkLogic 9 or BaseX 8.5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProductVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Vendor dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vendor {
    MarkLogic(ProductVersion),
    BaseX(ProductVersion),
}

/// The feature set a parse runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialect {
    pub xquery_version: XQueryVersion,
    pub update_facility: Option<UpdateVersion>,
    pub scripting: bool,
    pub vendor: Option<Vendor>,
}

/// Errors from parsing a dialect string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    #[error("unknown XQuery version or dialect '{0}'")]
    UnknownVersion(String),
    #[error("unknown dialect extension '{0}'")]
    UnknownExtension(String),
    #[error("invalid product version '{0}'")]
    InvalidProductVersion(String),
    #[error("empty dialect string")]
    Empty,
}

const MARKLOGIC_DEFAULT: ProductVersion = ProductVersion::new(10, 0);
const BASEX_DEFAULT: ProductVersion = ProductVersion::new(9, 1);

impl Dialect {
    /// Plain W3C XQuery without extensions
    pub const fn xquery(version: XQueryVersion) -> Self {
        Self {
            xquery_version: version,
            update_facility: None,
            scripting: false,
            vendor: None,
        }
    }

    /// MarkLogic's `1.0-ml` dialect
    pub const fn marklogic(version: ProductVersion) -> Self {
        Self {
            xquery_version: XQueryVersion::V1_0,
            update_facility: None,
            scripting: false,
            vendor: Some(Vendor::MarkLogic(version)),
        }
    }

    /// BaseX, which implements XQuery 3.1 and the Update Facility
    pub const fn basex(version: ProductVersion) -> Self {
        Self {
            xquery_version: XQueryVersion::V3_1,
            update_facility: Some(UpdateVersion::V3_0),
            scripting: false,
            vendor: Some(Vendor::BaseX(version)),
        }
    }

    pub const fn with_update_facility(mut self, version: UpdateVersion) -> Self {
        self.update_facility = Some(version);
        self
    }

    pub const fn with_scripting(mut self) -> Self {
        self.scripting = true;
        self
    }

    /// The dialect an `xquery version "..."` declaration asks for
    pub fn from_version_decl(version: &str) -> Option<Self> {
        match version {
            "1.0" => Some(Self::xquery(XQueryVersion::V1_0)),
            "3.0" => Some(Self::xquery(XQueryVersion::V3_0)),
            "3.1" => Some(Self::xquery(XQueryVersion::V3_1)),
            "1.0-ml" | "0.9-ml" => Some(Self::marklogic(MARKLOGIC_DEFAULT)),
            _ => None,
        }
    }

    pub fn marklogic_version(&self) -> Option<ProductVersion> {
        match self.vendor {
            Some(Vendor::MarkLogic(v)) => Some(v),
            _ => None,
        }
    }

    pub fn basex_version(&self) -> Option<ProductVersion> {
        match self.vendor {
            Some(Vendor::BaseX(v)) => Some(v),
            _ => None,
        }
    }

    fn is_marklogic(&self, major: u8) -> bool {
        self.marklogic_version().is_some_and(|v| v.major >= major)
    }

    fn is_basex(&self, version: ProductVersion) -> bool {
        self.basex_version().is_some_and(|v| v >= version)
    }

    // =========================================================================
    // Feature queries
    // =========================================================================

    /// XQuery 3.0 syntax: annotations, inline functions, `!`, `||`, EQNames,
    /// window/group by/count clauses, switch, try/catch
    pub fn supports_xquery30(&self) -> bool {
        self.xquery_version >= XQueryVersion::V3_0 || self.is_marklogic(6) || self.basex_version().is_some()
    }

    /// XQuery 3.1 syntax: maps, arrays, lookups, arrows, string constructors
    pub fn supports_xquery31(&self) -> bool {
        self.xquery_version >= XQueryVersion::V3_1 || self.basex_version().is_some()
    }

    pub fn supports_try_catch(&self) -> bool {
        self.supports_xquery30() || self.marklogic_version().is_some()
    }

    pub fn supports_switch(&self) -> bool {
        self.supports_xquery30()
    }

    pub fn supports_maps(&self) -> bool {
        self.supports_xquery31()
    }

    pub fn update_version(&self) -> Option<UpdateVersion> {
        self.update_facility
    }

    pub fn supports_update(&self) -> bool {
        self.update_facility.is_some()
    }

    pub fn supports_update30(&self) -> bool {
        self.update_facility >= Some(UpdateVersion::V3_0)
    }

    pub fn supports_scripting(&self) -> bool {
        self.scripting
    }

    /// `;` between complete modules in one source
    pub fn supports_transaction_separator(&self) -> bool {
        self.marklogic_version().is_some() || self.scripting
    }

    /// MarkLogic `binary { }` and `binary()`
    pub fn supports_binary(&self) -> bool {
        self.marklogic_version().is_some()
    }

    /// MarkLogic 8 JSON node constructors and tests
    pub fn supports_json_nodes(&self) -> bool {
        self.is_marklogic(8)
    }

    /// MarkLogic 7 schema component tests
    pub fn supports_schema_components(&self) -> bool {
        self.is_marklogic(7)
    }

    /// MarkLogic `private` function modifier and stylesheet imports
    pub fn supports_marklogic_prolog(&self) -> bool {
        self.marklogic_version().is_some()
    }

    /// MarkLogic accepts HTML entity names in literals
    pub fn allows_html_entities(&self) -> bool {
        self.marklogic_version().is_some()
    }

    /// BaseX 8.5 `expr update { ... }`
    pub fn supports_update_expr(&self) -> bool {
        self.is_basex(ProductVersion::new(8, 5))
    }

    /// BaseX 9.1 `a ?? b !! c` and `a ?: b`
    pub fn supports_ternary(&self) -> bool {
        self.is_basex(ProductVersion::new(9, 1))
    }

    /// BaseX 8.4 `non-deterministic f()`
    pub fn supports_non_deterministic(&self) -> bool {
        self.is_basex(ProductVersion::new(8, 4))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vendor {
            Some(Vendor::MarkLogic(v)) => write!(f, "marklogic-{v}")?,
            Some(Vendor::BaseX(v)) => write!(f, "basex-{v}")?,
            None => f.write_str(match self.xquery_version {
                XQueryVersion::V1_0 => "1.0",
                XQueryVersion::V3_0 => "3.0",
                XQueryVersion::V3_1 => "3.1",
            })?,
        }
        let implied_update = self.basex_version().map(|_| UpdateVersion::V3_0);
        if self.update_facility != implied_update {
            match self.update_facility {
                Some(UpdateVersion::V1_0) => f.write_str("+update")?,
                Some(UpdateVersion::V3_0) => f.write_str("+update-3.0")?,
                None => {}
            }
        }
        if self.scripting {
            f.write_str("+scripting")?;
        }
        Ok(())
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('+');
        let base = parts.next().map(str::trim).unwrap_or_default();
        if base.is_empty() {
            return Err(DialectError::Empty);
        }
        let mut dialect = if let Some(dialect) = Dialect::from_version_decl(base) {
            dialect
        } else if let Some(version) = base.strip_prefix("marklogic-") {
            Dialect::marklogic(parse_product_version(version)?)
        } else if base == "marklogic" {
            Dialect::marklogic(MARKLOGIC_DEFAULT)
        } else if let Some(version) = base.strip_prefix("basex-") {
            Dialect::basex(parse_product_version(version)?)
        } else if base == "basex" {
            Dialect::basex(BASEX_DEFAULT)
        } else {
            return Err(DialectError::UnknownVersion(base.to_string()));
        };
        for extension in parts.map(str::trim) {
            dialect = match extension {
                "update" | "update-1.0" => dialect.with_update_facility(UpdateVersion::V1_0),
                "update-3.0" => dialect.with_update_facility(UpdateVersion::V3_0),
                "scripting" => dialect.with_scripting(),
                other => return Err(DialectError::UnknownExtension(other.to_string())),
            };
        }
        Ok(dialect)
    }
}

fn parse_product_version(text: &str) -> Result<ProductVersion, DialectError> {
    let invalid = || DialectError::InvalidProductVersion(text.to_string());
    let (major, minor) = text.split_once('.').unwrap_or((text, "0"));
    let major = major.parse().map_err(|_| invalid())?;
    let minor = minor.parse().map_err(|_| invalid())?;
    Ok(ProductVersion::new(major, minor))
}
