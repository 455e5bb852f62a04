//! Report engine: fetch dispatch plus pure composition.
//!
//! [`ReportEngine::generate`] is the async entry point: it resolves the
//! reporting window, pulls exactly the record collections the requested
//! report consumes, and hands them to [`ReportEngine::compose`]. Compose
//! itself is synchronous, infallible, and free of clock access, so the
//! same records always produce the same report.

use crate::period::{Granularity, WeekStart};
use crate::reports::{
    budget, client, financial, monetary, project, resource, tasks, team, time_tracking,
    ReportResult,
};
use crate::request::{DateRange, FilterSet, ReportKind, ReportRequest};
use crate::source::{RecordSet, RecordSource};
use atelier_common::{BudgetRecord, Result};
use atelier_config::ReportSettings;
use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

/// Stateless facade over the composition pipeline.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    settings: ReportSettings,
    week_start: WeekStart,
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new(ReportSettings::default())
    }
}

impl ReportEngine {
    /// Build an engine from validated report settings.
    pub fn new(settings: ReportSettings) -> Self {
        let week_start = WeekStart::from_label(&settings.week_start).unwrap_or_default();
        Self {
            settings,
            week_start,
        }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Fetch the records for `request` and compose its report.
    ///
    /// `today` anchors preset resolution and budget projections; passing it
    /// in keeps the engine deterministic for callers that pin the date.
    #[instrument(skip_all, fields(kind = %request.kind))]
    pub async fn generate(
        &self,
        source: &dyn RecordSource,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> Result<ReportResult> {
        let range = request.resolve_range(today)?;
        for warning in request.validation_warnings(&range, today) {
            warn!("{warning}");
        }
        debug!(%range, granularity = request.granularity.as_str(), "fetching records");

        let records = self
            .fetch_for(source, request.kind, &range, &request.filters)
            .await?;
        Ok(self.compose(request.kind, &records, range, request.granularity, today))
    }

    /// Pull only the collections the report kind consumes.
    async fn fetch_for(
        &self,
        source: &dyn RecordSource,
        kind: ReportKind,
        range: &DateRange,
        filters: &FilterSet,
    ) -> Result<RecordSet> {
        let mut records = RecordSet::default();
        match kind {
            ReportKind::RevenueAnalysis => {
                records.revenues = source.fetch_revenues(range, filters).await?;
                records.clients = source.fetch_clients().await?;
            }
            ReportKind::ExpenseAnalysis => {
                records.expenses = source.fetch_expenses(range, filters).await?;
            }
            ReportKind::ProjectPerformance => {
                records.projects = source.fetch_projects(filters).await?;
                records.tasks = source.fetch_tasks(range, filters).await?;
            }
            ReportKind::TeamProductivity => {
                records.members = source.fetch_members().await?;
                records.tasks = source.fetch_tasks(range, filters).await?;
                records.time_entries = source.fetch_time_entries(range, filters).await?;
            }
            ReportKind::ClientProfitability => {
                records.clients = source.fetch_clients().await?;
                records.revenues = source.fetch_revenues(range, filters).await?;
                records.expenses = source.fetch_expenses(range, filters).await?;
            }
            ReportKind::BudgetVariance => {
                records.budgets = source.fetch_budgets(range, filters).await?;
                // actual spend must see expenses across each budget's whole
                // window, not just the requested range
                let envelope = Self::budget_envelope(&records.budgets, *range);
                records.expenses = source.fetch_expenses(&envelope, filters).await?;
            }
            ReportKind::TimeTracking => {
                records.time_entries = source.fetch_time_entries(range, filters).await?;
                // tasks act as the entry-to-project join here, so the
                // window does not apply to them
                records.tasks = source.fetch_tasks(&DateRange::unbounded(), filters).await?;
                records.projects = source.fetch_projects(filters).await?;
                records.members = source.fetch_members().await?;
            }
            ReportKind::TaskCompletion => {
                records.tasks = source.fetch_tasks(range, filters).await?;
                records.members = source.fetch_members().await?;
            }
            ReportKind::FinancialTrend => {
                records.revenues = source.fetch_revenues(range, filters).await?;
                records.expenses = source.fetch_expenses(range, filters).await?;
            }
            ReportKind::ResourceUtilization => {
                records.members = source.fetch_members().await?;
                records.tasks = source.fetch_tasks(range, filters).await?;
                records.time_entries = source.fetch_time_entries(range, filters).await?;
            }
        }
        Ok(records)
    }

    /// Widest window covering the range and every budget in it.
    fn budget_envelope(budgets: &[BudgetRecord], range: DateRange) -> DateRange {
        let mut envelope = range;
        for budget in budgets {
            envelope.from = envelope.from.min(budget.start_date);
            envelope.to = envelope.to.max(budget.end_date);
        }
        envelope
    }

    /// Compose `kind` from an already-materialized record set.
    ///
    /// Pure: no fetching, no clock, no failure paths. `as_of` feeds budget
    /// burn projections and nothing else.
    pub fn compose(
        &self,
        kind: ReportKind,
        records: &RecordSet,
        range: DateRange,
        granularity: Granularity,
        as_of: NaiveDate,
    ) -> ReportResult {
        match kind {
            ReportKind::RevenueAnalysis => ReportResult::RevenueAnalysis(monetary::revenue_analysis(
                &records.revenues,
                &records.clients,
                granularity,
                self.week_start,
                self.settings.top_limit,
            )),
            ReportKind::ExpenseAnalysis => ReportResult::ExpenseAnalysis(monetary::expense_analysis(
                &records.expenses,
                granularity,
                self.week_start,
                self.settings.top_limit,
            )),
            ReportKind::ProjectPerformance => ReportResult::ProjectPerformance(
                project::project_performance(&records.projects, &records.tasks),
            ),
            ReportKind::TeamProductivity => ReportResult::TeamProductivity(team::team_productivity(
                &records.members,
                &records.tasks,
                &records.time_entries,
            )),
            ReportKind::ClientProfitability => ReportResult::ClientProfitability(
                client::client_profitability(&records.clients, &records.revenues, &records.expenses),
            ),
            ReportKind::BudgetVariance => ReportResult::BudgetVariance(budget::budget_variance(
                &records.budgets,
                &records.expenses,
                as_of,
            )),
            ReportKind::TimeTracking => ReportResult::TimeTracking(time_tracking::time_tracking(
                &records.time_entries,
                &records.tasks,
                &records.projects,
                &records.members,
                granularity,
                self.week_start,
            )),
            ReportKind::TaskCompletion => ReportResult::TaskCompletion(tasks::task_completion(
                &records.tasks,
                &records.members,
                granularity,
                self.week_start,
            )),
            ReportKind::FinancialTrend => ReportResult::FinancialTrend(financial::financial_trend(
                &records.revenues,
                &records.expenses,
                range,
                self.settings.forecast_periods,
                self.settings.confidence_floor,
                self.settings.confidence_decay,
            )),
            ReportKind::ResourceUtilization => ReportResult::ResourceUtilization(
                resource::resource_utilization(
                    &records.members,
                    &records.tasks,
                    &records.time_entries,
                    range,
                    self.settings.workday_hours,
                ),
            ),
        }
    }
}
