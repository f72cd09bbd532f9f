//! Composable authorization rules.
//!
//! A [`Ruleset`] holds two ordered collections of predicates over an
//! arbitrary subject type: synchronous rules and asynchronous rules. The
//! core imposes no schema on subjects - the type parameter is whatever the
//! host evaluates, a user record, a request context, anything.
//!
//! Evaluation is insertion-ordered, strictly sequential, and short-circuits
//! on the first failing rule. Sequential (not concurrent) evaluation of the
//! async collection is deliberate: later rules may assume earlier ones
//! passed, and sequential execution bounds resource usage predictably.
//!
//! # Example
//!
//! ```ignore
//! use gatekeeper::ruleset::{Ruleset, sync_rule, async_rule};
//!
//! let mut rules = Ruleset::new();
//! rules
//!     .add_sync_rule(sync_rule(|user: &User| user.active))
//!     .add_sync_rule(sync_rule(|user: &User| !user.locked_out));
//!
//! assert!(rules.evaluate_sync(&user));
//! ```

use std::sync::Arc;

use futures_util::future::BoxFuture;

/// A synchronous predicate over a subject.
pub type SyncRule<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// An asynchronous predicate over a subject.
pub type AsyncRule<S> = Arc<dyn for<'a> Fn(&'a S) -> BoxFuture<'a, bool> + Send + Sync>;

/// Wraps a plain closure into a [`SyncRule`].
pub fn sync_rule<S, F>(rule: F) -> SyncRule<S>
where
    F: Fn(&S) -> bool + Send + Sync + 'static,
{
    Arc::new(rule)
}

/// Wraps a future-returning closure into an [`AsyncRule`].
///
/// The closure receives the subject by reference and returns an owned
/// future, so any subject data the future needs must be extracted (or
/// cloned) before the closure returns.
pub fn async_rule<S, F, Fut>(rule: F) -> AsyncRule<S>
where
    F: Fn(&S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    Arc::new(move |subject: &S| Box::pin(rule(subject)) as BoxFuture<'_, bool>)
}

/// Ordered collections of authorization predicates with short-circuit
/// evaluation.
///
/// Rules are identity-unique per collection: adding the same `Arc` twice is
/// a no-op, and membership checks compare allocations, not behavior. The
/// ruleset holds no token-related state and is mutated freely by the host
/// between evaluations.
pub struct Ruleset<S> {
    sync_rules: Vec<SyncRule<S>>,
    async_rules: Vec<AsyncRule<S>>,
}

impl<S> Ruleset<S> {
    /// Creates an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sync_rules: Vec::new(),
            async_rules: Vec::new(),
        }
    }

    /// Creates a ruleset pre-seeded with rules, preserving the given order.
    #[must_use]
    pub fn with_rules(sync_rules: Vec<SyncRule<S>>, async_rules: Vec<AsyncRule<S>>) -> Self {
        let mut ruleset = Self::new();
        for rule in sync_rules {
            ruleset.add_sync_rule(rule);
        }
        for rule in async_rules {
            ruleset.add_async_rule(rule);
        }
        ruleset
    }

    /// Appends a synchronous rule. Adding a rule already present (same
    /// allocation) is a no-op. Returns `self` for chaining.
    pub fn add_sync_rule(&mut self, rule: SyncRule<S>) -> &mut Self {
        if !self.has_sync_rule(&rule) {
            self.sync_rules.push(rule);
        }
        self
    }

    /// Appends an asynchronous rule. Adding a rule already present (same
    /// allocation) is a no-op. Returns `self` for chaining.
    pub fn add_async_rule(&mut self, rule: AsyncRule<S>) -> &mut Self {
        if !self.has_async_rule(&rule) {
            self.async_rules.push(rule);
        }
        self
    }

    /// Returns `true` if the exact rule (by identity) is present.
    #[must_use]
    pub fn has_sync_rule(&self, rule: &SyncRule<S>) -> bool {
        self.sync_rules.iter().any(|r| Arc::ptr_eq(r, rule))
    }

    /// Returns `true` if the exact rule (by identity) is present.
    #[must_use]
    pub fn has_async_rule(&self, rule: &AsyncRule<S>) -> bool {
        self.async_rules.iter().any(|r| Arc::ptr_eq(r, rule))
    }

    /// Removes a synchronous rule. Returns `true` if it was present.
    pub fn delete_sync_rule(&mut self, rule: &SyncRule<S>) -> bool {
        let before = self.sync_rules.len();
        self.sync_rules.retain(|r| !Arc::ptr_eq(r, rule));
        self.sync_rules.len() < before
    }

    /// Removes an asynchronous rule. Returns `true` if it was present.
    pub fn delete_async_rule(&mut self, rule: &AsyncRule<S>) -> bool {
        let before = self.async_rules.len();
        self.async_rules.retain(|r| !Arc::ptr_eq(r, rule));
        self.async_rules.len() < before
    }

    /// Removes all synchronous rules.
    pub fn clear_sync_rules(&mut self) {
        self.sync_rules.clear();
    }

    /// Removes all asynchronous rules.
    pub fn clear_async_rules(&mut self) {
        self.async_rules.clear();
    }

    /// Number of synchronous rules.
    #[must_use]
    pub fn sync_rule_count(&self) -> usize {
        self.sync_rules.len()
    }

    /// Number of asynchronous rules.
    #[must_use]
    pub fn async_rule_count(&self) -> usize {
        self.async_rules.len()
    }

    /// Evaluates the synchronous rules in insertion order.
    ///
    /// Returns `false` on the first failing rule without invoking the rest;
    /// `true` if every rule passes or the collection is empty.
    #[must_use]
    pub fn evaluate_sync(&self, subject: &S) -> bool {
        for rule in &self.sync_rules {
            if !rule(subject) {
                return false;
            }
        }
        true
    }

    /// Evaluates the asynchronous rules in insertion order, awaiting each
    /// rule before invoking the next.
    ///
    /// Returns `false` on the first failing rule without invoking the rest;
    /// `true` if every rule passes or the collection is empty.
    pub async fn evaluate_async(&self, subject: &S) -> bool {
        for rule in &self.async_rules {
            if !rule(subject).await {
                return false;
            }
        }
        true
    }
}

impl<S> Default for Ruleset<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Ruleset<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ruleset")
            .field("sync_rules", &self.sync_rules.len())
            .field("async_rules", &self.async_rules.len())
            .finish()
    }
}
