//! Invoicing report queries and their result rows.
//!
//! A report query is discriminated by [`ReportKind`]; each kind requires a
//! different field. Date bounds are inclusive calendar days: the start bound
//! is the first instant of its day and the end bound the last millisecond of
//! its day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::ModuleRole;

/// Local validation failures for a report submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValidationError {
    /// Tax report requested without a NIT.
    MissingNit,
    /// Provider report requested without a provider name.
    MissingProviderName,
    /// Category report requested without a category.
    MissingItemCategory,
    /// Kind value outside the offered options.
    UnknownKind(String),
    /// Module value outside the offered options.
    UnknownModuleRole(String),
    /// Start or end date that is not `YYYY-MM-DD`.
    InvalidDate { field: &'static str, value: String },
}

impl fmt::Display for ReportValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNit => write!(f, "NIT is required for this report."),
            Self::MissingProviderName => write!(f, "Provider Name is required."),
            Self::MissingItemCategory => write!(f, "Item Category is required."),
            Self::UnknownKind(kind) => write!(f, "Invalid report type selected: {kind}"),
            Self::UnknownModuleRole(role) => write!(f, "Invalid module role selected: {role}"),
            Self::InvalidDate { field, value } => {
                write!(f, "{field} must be a calendar date (YYYY-MM-DD), got {value:?}")
            }
        }
    }
}

impl std::error::Error for ReportValidationError {}

/// Discriminator selecting the backend aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportKind {
    /// Tax report for one client tax id (NIT).
    #[default]
    ByTaxId,
    /// Tax report for orders placed by one client module.
    ByModule,
    /// Sales across all orders.
    General,
    /// Tax report for one provider.
    ByProvider,
    /// Tax report for one item category.
    ByItemCategory,
}

impl ReportKind {
    /// Every kind, in the order the form offers them.
    pub const ALL: [Self; 5] = [
        Self::ByTaxId,
        Self::ByModule,
        Self::General,
        Self::ByProvider,
        Self::ByItemCategory,
    ];

    /// Form value identifying the kind.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ByTaxId => "nit",
            Self::ByModule => "module",
            Self::General => "general",
            Self::ByProvider => "provider",
            Self::ByItemCategory => "itemCategory",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ByTaxId => "Tax Report by NIT",
            Self::ByModule => "Tax Report by Module",
            Self::General => "General Sales Report",
            Self::ByProvider => "Tax Report by Provider",
            Self::ByItemCategory => "Tax Report by Item Category",
        }
    }
}

impl FromStr for ReportKind {
    type Err = ReportValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| ReportValidationError::UnknownKind(s.to_owned()))
    }
}

/// Kind-specific mandatory parameter of a report query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCriteria {
    /// Client tax id.
    ByTaxId { nit: String },
    /// Client module that placed the orders.
    ByModule { module: ModuleRole },
    /// No parameter.
    General,
    /// Provider display name.
    ByProvider { provider_name: String },
    /// Item category name.
    ByItemCategory { category: String },
}

impl ReportCriteria {
    /// Kind this criteria belongs to.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::ByTaxId { .. } => ReportKind::ByTaxId,
            Self::ByModule { .. } => ReportKind::ByModule,
            Self::General => ReportKind::General,
            Self::ByProvider { .. } => ReportKind::ByProvider,
            Self::ByItemCategory { .. } => ReportKind::ByItemCategory,
        }
    }
}

/// Optional inclusive date range, already widened to instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl DateBounds {
    /// Widen calendar days to the instants transmitted upstream.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use console::domain::DateBounds;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date");
    /// let bounds = DateBounds::from_calendar_days(None, Some(day)).expect("bounds");
    /// let end = bounds.end().expect("end bound");
    /// assert_eq!(end.format("%H:%M:%S%.3f").to_string(), "23:59:59.999");
    /// ```
    pub fn from_calendar_days(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ReportValidationError> {
        let end = end
            .map(|day| {
                day.and_hms_milli_opt(23, 59, 59, 999)
                    .ok_or_else(|| ReportValidationError::InvalidDate {
                        field: "End date",
                        value: day.to_string(),
                    })
            })
            .transpose()?;
        Ok(Self {
            start: start.map(|day| day.and_time(NaiveTime::MIN)),
            end,
        })
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }
}

/// Fully validated report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub criteria: ReportCriteria,
    pub bounds: DateBounds,
}

impl ReportQuery {
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        self.criteria.kind()
    }
}

/// Raw report form input as submitted by the operator.
///
/// Only the field relevant to `kind` is inspected; the others are kept so
/// the form can be re-rendered unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportForm {
    pub kind: ReportKind,
    pub nit: String,
    pub module_role: ModuleRole,
    pub provider_name: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
}

impl ReportForm {
    /// Validate the form into a query without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field or malformed date.
    pub fn to_query(&self) -> Result<ReportQuery, ReportValidationError> {
        let criteria = match self.kind {
            ReportKind::ByTaxId => ReportCriteria::ByTaxId {
                nit: required(&self.nit, ReportValidationError::MissingNit)?,
            },
            ReportKind::ByModule => ReportCriteria::ByModule {
                module: self.module_role,
            },
            ReportKind::General => ReportCriteria::General,
            ReportKind::ByProvider => ReportCriteria::ByProvider {
                provider_name: required(
                    &self.provider_name,
                    ReportValidationError::MissingProviderName,
                )?,
            },
            ReportKind::ByItemCategory => ReportCriteria::ByItemCategory {
                category: required(&self.category, ReportValidationError::MissingItemCategory)?,
            },
        };
        let start = parse_day("Start date", &self.start_date)?;
        let end = parse_day("End date", &self.end_date)?;
        Ok(ReportQuery {
            criteria,
            bounds: DateBounds::from_calendar_days(start, end)?,
        })
    }
}

fn required(value: &str, missing: ReportValidationError) -> Result<String, ReportValidationError> {
    if value.trim().is_empty() {
        Err(missing)
    } else {
        Ok(value.to_owned())
    }
}

fn parse_day(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, ReportValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ReportValidationError::InvalidDate {
            field,
            value: raw.to_owned(),
        })
}

/// Read-only projection of one invoiced order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub order_id: i64,
    pub client_name: String,
    pub client_nit: String,
    pub provider_name: Option<String>,
    pub order_date: Option<NaiveDateTime>,
    pub total_taxes: Option<f64>,
    pub total_amount: Option<f64>,
    /// Document path relative to the backend's invoicing root.
    pub invoice_pdf_path: Option<String>,
}
