use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::approval::classify;
use crate::catalog::Catalog;
use crate::domain::{OrderRequest, OutcomeRecord, PolicyRecord, SiteId};
use crate::observability::{MetricsRegistry, TimingGuard};
use crate::selection::select_vendor;
use crate::storage::{PolicyStore, StorageError};

/// Entry points handed to the intent-parsing collaborator.
///
/// Owns the policy store and catalog explicitly; nothing here is global.
/// Business outcomes (no rules, nothing eligible, over limit) come back as
/// `OutcomeRecord` statuses, only storage faults come back as `Err`.
pub struct Procurement {
    store: PolicyStore,
    catalog: Catalog,
    metrics: Arc<MetricsRegistry>,
}

impl Procurement {
    pub fn new(store: PolicyStore, catalog: Catalog) -> Self {
        Procurement {
            store,
            catalog,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Share an existing metrics registry.
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Store (or replace) the rules for a site.
    pub fn store_site_rules<I, S>(
        &self,
        site: impl Into<SiteId>,
        approval_limit: Decimal,
        banned_vendors: I,
    ) -> Result<PolicyRecord, StorageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let result = self
            .store
            .write_site_rules(site, approval_limit, banned_vendors);
        self.metrics.record_store_write(result.is_ok());
        result
    }

    /// Evaluate an order against the site's stored rules.
    pub fn evaluate_order(
        &self,
        site: impl Into<SiteId>,
        item: impl Into<String>,
        quantity: u32,
    ) -> Result<OutcomeRecord, StorageError> {
        let order = OrderRequest::new(site, item, quantity);
        self.evaluate(&order)
    }

    /// Evaluate a prepared order request.
    pub fn evaluate(&self, order: &OrderRequest) -> Result<OutcomeRecord, StorageError> {
        let _timer = TimingGuard::new(&self.metrics);

        let policy = match self.store.read_site_rules(&order.site) {
            Ok(p) => {
                self.metrics.record_store_read(true);
                p
            }
            Err(e) => {
                self.metrics.record_store_read(false);
                warn!(site = %order.site, error = %e, "Policy store read failed");
                return Err(e);
            }
        };

        let selection = policy.as_ref().map(|p| {
            let offers = self.catalog.load_offers(&order.item);
            select_vendor(p, &offers)
        });

        let outcome = classify(order, policy.as_ref(), selection.as_ref());
        self.metrics.record_outcome(outcome.status);

        info!(
            site = %order.site,
            item = %order.item,
            quantity = order.quantity,
            status = %outcome.status,
            vendor = outcome.vendor.as_deref().unwrap_or("-"),
            "Order evaluated"
        );

        Ok(outcome)
    }

    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }
}
