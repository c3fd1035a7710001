//! Presenter rules and description composition.
//!
//! A presenter renders one line of a thing's description from an exact set
//! of facets. Composing a description walks the rules from most to least
//! specific and lets each rule whose facets are all still unclaimed fire,
//! claiming them. A rule for `{name, description}` therefore wins over the
//! rule for `{name}` and produces one combined line, while facets no wider
//! rule covers still fall through to narrower ones.

use crate::error::{facet_set_label, ModelError, ModelResult};
use crate::Thing;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;
use thingbot_types::Context;
use tracing::info;

/// Signature of a render function. `Ok(None)` contributes no line.
pub type RenderFn = dyn Fn(&Thing, &dyn Context) -> ModelResult<Option<String>> + Send + Sync;

/// A rendering rule for an exact facet set.
pub struct Presenter {
    facets: BTreeSet<String>,
    order: i32,
    render: Box<RenderFn>,
}

impl Presenter {
    /// The facets this rule requires and claims.
    pub fn facets(&self) -> &BTreeSet<String> {
        &self.facets
    }

    /// Tie-break among rules of equal size; lower goes first.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Whether this rule handles exactly `facets`.
    pub fn handles(&self, facets: &BTreeSet<&str>) -> bool {
        self.facets.iter().map(String::as_str).eq(facets.iter().copied())
    }

    pub fn render(&self, thing: &Thing, ctx: &dyn Context) -> ModelResult<Option<String>> {
        (self.render)(thing, ctx)
    }

    fn label(&self) -> String {
        facet_set_label(self.facets.iter().map(String::as_str))
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("facets", &self.facets)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Presenter rules, kept sorted by descending facet count, then by `order`,
/// then by registration order.
#[derive(Debug, Default)]
pub struct PresenterRegistry {
    presenters: Vec<Presenter>,
}

impl PresenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule for exactly `facets`.
    ///
    /// An empty set or a set that already has a rule is a configuration
    /// error.
    pub fn register<F>(&mut self, facets: &[&str], order: i32, render: F) -> ModelResult<()>
    where
        F: Fn(&Thing, &dyn Context) -> ModelResult<Option<String>> + Send + Sync + 'static,
    {
        let facets: BTreeSet<String> = facets.iter().map(|name| name.to_string()).collect();
        if facets.is_empty() {
            return Err(ModelError::EmptyPresenter);
        }
        let presenter = Presenter {
            facets,
            order,
            render: Box::new(render),
        };
        if self.presenters.iter().any(|p| p.facets == presenter.facets) {
            return Err(ModelError::DuplicatePresenter(presenter.label()));
        }
        info!(facets = %presenter.label(), order, "Presenter registered");
        self.presenters.push(presenter);
        // Stable, so equal keys keep registration order.
        self.presenters
            .sort_by_key(|p| (Reverse(p.facets.len()), p.order));
        Ok(())
    }

    /// The rule registered for exactly `facets`. No subset matching.
    pub fn get(&self, facets: &[&str]) -> ModelResult<&Presenter> {
        let wanted: BTreeSet<&str> = facets.iter().copied().collect();
        self.presenters
            .iter()
            .find(|p| p.handles(&wanted))
            .ok_or_else(|| ModelError::PresenterNotFound(facet_set_label(wanted)))
    }

    /// Picks the rules that describe a thing with the `attached` facets.
    ///
    /// Each chosen rule's facets are a subset of `attached`, and no facet is
    /// claimed by two chosen rules. Rules come back in firing order.
    pub fn compose<I, S>(&self, attached: I) -> Vec<&Presenter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut remaining: BTreeSet<String> = attached
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let mut chosen = Vec::new();
        for presenter in &self.presenters {
            if remaining.is_empty() {
                break;
            }
            if presenter.facets.is_subset(&remaining) {
                for facet in &presenter.facets {
                    remaining.remove(facet);
                }
                chosen.push(presenter);
            }
        }
        chosen
    }

    /// Rules in matching order.
    pub fn iter(&self) -> impl Iterator<Item = &Presenter> {
        self.presenters.iter()
    }

    pub fn len(&self) -> usize {
        self.presenters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presenters.is_empty()
    }
}
