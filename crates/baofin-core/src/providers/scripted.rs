use super::MemoryCursor;
use crate::remote::{ProviderFault, RemoteProvider, RemoteStatus, ResultCursor};
use crate::{FiscalQuarter, IndicatorFamily, RemoteQuery};

/// Canned answer for one remote query.
///
/// Test double: [`Panic`](Self::Panic) makes the provider panic on purpose,
/// so never hand a scripted provider to production code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    /// OK status with these columns and rows.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Non-OK status, no rows.
    Status(RemoteStatus),
    /// The call itself faults before a cursor exists.
    Fault(ProviderFault),
    /// OK status, but the cursor faults when it reaches row `after`.
    CursorFault {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        after: usize,
    },
    /// The provider panics mid-call, to exercise unwinding through a session.
    Panic(String),
}

impl ScriptedResponse {
    pub fn rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::Rows {
            columns: owned(columns),
            rows: rows.iter().map(|row| owned(row)).collect(),
        }
    }

    pub fn empty(columns: &[&str]) -> Self {
        Self::rows(columns, &[])
    }

    pub fn no_record() -> Self {
        Self::Status(RemoteStatus::no_record())
    }

    pub fn status(code: &str, message: &str) -> Self {
        Self::Status(RemoteStatus::new(code, message))
    }

    pub fn fault(message: &str) -> Self {
        Self::Fault(ProviderFault::Transport(message.to_owned()))
    }

    pub fn cursor_fault(columns: &[&str], rows: &[&[&str]], after: usize) -> Self {
        Self::CursorFault {
            columns: owned(columns),
            rows: rows.iter().map(|row| owned(row)).collect(),
            after,
        }
    }

    pub fn panic(message: &str) -> Self {
        Self::Panic(message.to_owned())
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// Programmable provider that records every call it receives.
///
/// This is a test double for driving the session guard, query adapter and
/// aggregation engine through failure modes; real callers use a network
/// provider or [`FixtureProvider`](crate::FixtureProvider).
///
/// Responses are resolved most-specific first: a (family, quarter) entry,
/// then a family-wide entry, then the default (`no record found` unless
/// replaced with [`with_default`](Self::with_default)).
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    default: ScriptedResponse,
    overrides: Vec<(IndicatorFamily, Option<FiscalQuarter>, ScriptedResponse)>,
    login_status: RemoteStatus,
    login_fault: Option<ProviderFault>,
    logout_fault: Option<ProviderFault>,
    active: bool,
    login_count: usize,
    logout_count: usize,
    queries: Vec<RemoteQuery>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self {
            default: ScriptedResponse::no_record(),
            overrides: Vec::new(),
            login_status: RemoteStatus::ok(),
            login_fault: None,
            logout_fault: None,
            active: false,
            login_count: 0,
            logout_count: 0,
            queries: Vec::new(),
        }
    }
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, response: ScriptedResponse) -> Self {
        self.default = response;
        self
    }

    pub fn with_family(mut self, family: IndicatorFamily, response: ScriptedResponse) -> Self {
        self.overrides.push((family, None, response));
        self
    }

    /// Answer `family` for one quarter only.
    pub fn with_quarter(
        mut self,
        family: IndicatorFamily,
        period: FiscalQuarter,
        response: ScriptedResponse,
    ) -> Self {
        self.overrides.push((family, Some(period), response));
        self
    }

    pub fn with_login_status(mut self, status: RemoteStatus) -> Self {
        self.login_status = status;
        self
    }

    pub fn with_login_fault(mut self, fault: ProviderFault) -> Self {
        self.login_fault = Some(fault);
        self
    }

    pub fn with_logout_fault(mut self, fault: ProviderFault) -> Self {
        self.logout_fault = Some(fault);
        self
    }

    pub const fn login_count(&self) -> usize {
        self.login_count
    }

    pub const fn logout_count(&self) -> usize {
        self.logout_count
    }

    pub fn query_count(&self) -> usize {
        self.queries.len()
    }

    /// Queries received, in call order.
    pub fn queries(&self) -> &[RemoteQuery] {
        &self.queries
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    fn response_for(&self, query: &RemoteQuery) -> &ScriptedResponse {
        let family = query.family();
        let period = query.period();
        self.overrides
            .iter()
            .find(|(f, p, _)| *f == family && *p == Some(period))
            .or_else(|| self.overrides.iter().find(|(f, p, _)| *f == family && p.is_none()))
            .map_or(&self.default, |(_, _, response)| response)
    }
}

impl RemoteProvider for ScriptedProvider {
    fn login(&mut self) -> Result<RemoteStatus, ProviderFault> {
        self.login_count += 1;
        if let Some(fault) = &self.login_fault {
            return Err(fault.clone());
        }
        self.active = self.login_status.is_ok();
        Ok(self.login_status.clone())
    }

    fn logout(&mut self) -> Result<RemoteStatus, ProviderFault> {
        self.logout_count += 1;
        self.active = false;
        match &self.logout_fault {
            Some(fault) => Err(fault.clone()),
            None => Ok(RemoteStatus::ok()),
        }
    }

    fn query(
        &mut self,
        query: &RemoteQuery,
    ) -> Result<Box<dyn ResultCursor + '_>, ProviderFault> {
        self.queries.push(query.clone());
        if !self.active {
            return Err(ProviderFault::NotLoggedIn);
        }

        let cursor = match self.response_for(query).clone() {
            ScriptedResponse::Rows { columns, rows } => {
                MemoryCursor::new(RemoteStatus::ok(), columns, rows)
            }
            ScriptedResponse::Status(status) => MemoryCursor::status_only(status),
            ScriptedResponse::Fault(fault) => return Err(fault),
            ScriptedResponse::CursorFault {
                columns,
                rows,
                after,
            } => MemoryCursor::new(RemoteStatus::ok(), columns, rows).with_fault_at(after),
            ScriptedResponse::Panic(message) => panic!("{message}"),
        };
        Ok(Box::new(cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StockCode;

    fn query(family: IndicatorFamily, year: &str, quarter: u8) -> RemoteQuery {
        RemoteQuery::new(
            family,
            StockCode::parse("sz.000001").expect("valid code"),
            year,
            quarter,
        )
        .expect("valid query")
    }

    #[test]
    fn quarter_override_beats_family_override() {
        let provider = ScriptedProvider::new()
            .with_family(IndicatorFamily::Profit, ScriptedResponse::fault("down"))
            .with_quarter(
                IndicatorFamily::Profit,
                FiscalQuarter::new(2023, 2).expect("valid quarter"),
                ScriptedResponse::rows(&["a"], &[&["1"]]),
            );

        assert!(matches!(
            provider.response_for(&query(IndicatorFamily::Profit, "2023", 2)),
            ScriptedResponse::Rows { .. }
        ));
        assert!(matches!(
            provider.response_for(&query(IndicatorFamily::Profit, "2023", 1)),
            ScriptedResponse::Fault(_)
        ));
        assert_eq!(
            provider.response_for(&query(IndicatorFamily::Growth, "2023", 1)),
            &ScriptedResponse::no_record()
        );
    }

    #[test]
    fn counts_calls_and_rejects_queries_without_login() {
        let mut provider = ScriptedProvider::new();
        assert!(provider.query(&query(IndicatorFamily::Dupont, "2022", 4)).is_err());

        provider.login().expect("login");
        provider.logout().expect("logout");

        assert_eq!(provider.login_count(), 1);
        assert_eq!(provider.logout_count(), 1);
        assert_eq!(provider.query_count(), 1);
    }

    #[test]
    fn invalid_quarters_are_rejected_before_scripting() {
        assert!(FiscalQuarter::new(2023, 5).is_err());

        let provider = ScriptedProvider::new().with_quarter(
            IndicatorFamily::Balance,
            FiscalQuarter::new(2023, 4).expect("valid quarter"),
            ScriptedResponse::empty(&["code"]),
        );
        assert!(matches!(
            provider.response_for(&query(IndicatorFamily::Balance, "2023", 4)),
            ScriptedResponse::Rows { rows, .. } if rows.is_empty()
        ));
    }
}
