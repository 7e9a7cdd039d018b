//! Generic keyed-state container.
//!
//! A [`StatefulObjectManager`] owns one resource per state value, a set of
//! directed edges saying which state changes are legal, and the state that is
//! currently active. Edges are declared once up front and then driven purely
//! by runtime requests through [`StatefulObjectManager::state_transition`].

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

use crate::texture::AssetError;

/// Errors reported by the state manager.
#[derive(Debug, Error)]
pub enum StateError {
    /// An operation was invoked out of its required order.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(&'static str),
    /// The state already has a bound resource.
    #[error("State {0} is already bound")]
    DuplicateState(String),
    /// The transition target has no bound resource.
    #[error("State {0} has no bound resource")]
    UnboundState(String),
    /// No edge was declared from the active state to the target.
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },
    /// Resolving the resource for a binding failed.
    #[error("Resource load failed: {0}")]
    ResourceLoad(#[from] AssetError),
}

/// Result type for state manager operations.
pub type StateResult<T> = Result<T, StateError>;

/// Owns one resource per state and gates changes of the active state.
///
/// `S` is a small closed set of state values (usually a fieldless enum).
/// The manager is seeded exactly once with an initial state, after which
/// extra states can be bound and edges declared. The active state is always
/// a bound state.
#[derive(Debug)]
pub struct StatefulObjectManager<R, S> {
    /// Resource bound to each state.
    objects: HashMap<S, R>,
    /// Declared edges (from, to).
    transitions: HashSet<(S, S)>,
    /// Currently active state, `None` until initialised.
    active: Option<S>,
}

impl<R, S> StatefulObjectManager<R, S>
where
    S: Copy + Eq + Hash + Debug,
{
    /// Create an empty, uninitialised manager.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            transitions: HashSet::new(),
            active: None,
        }
    }

    /// Create a manager already seeded with its initial state.
    pub fn with_initial(state: S, object: R) -> Self {
        let mut objects = HashMap::new();
        objects.insert(state, object);
        Self {
            objects,
            transitions: HashSet::new(),
            active: Some(state),
        }
    }

    /// Bind the initial resource and make `state` active.
    ///
    /// Must be the first call on a manager created with [`Self::new`], and
    /// may only happen once.
    pub fn set_init_stateful_object(&mut self, state: S, object: R) -> StateResult<()> {
        self.try_set_init_stateful_object(state, || Ok::<_, StateError>(object))
    }

    /// Fallible form of [`Self::set_init_stateful_object`].
    ///
    /// `make` is only run once the precondition holds. If it fails, the error
    /// is returned unchanged and the manager stays uninitialised.
    pub fn try_set_init_stateful_object<F, E>(&mut self, state: S, make: F) -> StateResult<()>
    where
        F: FnOnce() -> Result<R, E>,
        E: Into<StateError>,
    {
        if self.active.is_some() {
            return Err(StateError::PreconditionViolation(
                "initial stateful object already set",
            ));
        }
        let object = make().map_err(Into::into)?;
        self.objects.insert(state, object);
        self.active = Some(state);
        Ok(())
    }

    /// Bind an additional resource to `state`.
    ///
    /// Binding never replaces an existing resource: a second bind for the
    /// same state is rejected and the first binding stays in place.
    pub fn bind_stateful_object(&mut self, state: S, object: R) -> StateResult<()> {
        self.try_bind_stateful_object(state, || Ok::<_, StateError>(object))
    }

    /// Fallible form of [`Self::bind_stateful_object`].
    pub fn try_bind_stateful_object<F, E>(&mut self, state: S, make: F) -> StateResult<()>
    where
        F: FnOnce() -> Result<R, E>,
        E: Into<StateError>,
    {
        self.ensure_initialized("bind before initial stateful object")?;
        if self.objects.contains_key(&state) {
            return Err(StateError::DuplicateState(format!("{state:?}")));
        }
        let object = make().map_err(Into::into)?;
        self.objects.insert(state, object);
        Ok(())
    }

    /// Declare the directed edge `from -> to`.
    ///
    /// Declaring an edge twice is a no-op. The reverse edge is not implied.
    pub fn set_state_transition(&mut self, from: S, to: S) -> StateResult<()> {
        self.ensure_initialized("transition declared before initial stateful object")?;
        self.transitions.insert((from, to));
        Ok(())
    }

    /// Move the active state to `target`.
    ///
    /// Succeeds only if `target` is bound and the edge from the active state
    /// was declared. On failure the active state is unchanged.
    pub fn state_transition(&mut self, target: S) -> StateResult<()> {
        let from = self.active_state()?;
        if !self.objects.contains_key(&target) {
            return Err(StateError::UnboundState(format!("{target:?}")));
        }
        if !self.transitions.contains(&(from, target)) {
            return Err(StateError::IllegalTransition {
                from: format!("{from:?}"),
                to: format!("{target:?}"),
            });
        }
        self.active = Some(target);
        Ok(())
    }

    /// The currently active state.
    pub fn active_state(&self) -> StateResult<S> {
        self.active.ok_or(StateError::PreconditionViolation(
            "query before initial stateful object",
        ))
    }

    /// The resource bound to the currently active state.
    pub fn active_state_object(&self) -> StateResult<&R> {
        let state = self.active_state()?;
        self.objects
            .get(&state)
            .ok_or_else(|| StateError::UnboundState(format!("{state:?}")))
    }

    /// The resource bound to `state`, if any.
    pub fn stateful_object(&self, state: S) -> Option<&R> {
        self.objects.get(&state)
    }

    /// Check if `state` has a bound resource.
    pub fn is_bound(&self, state: S) -> bool {
        self.objects.contains_key(&state)
    }

    /// Check if the edge `from -> to` was declared.
    pub fn has_transition(&self, from: S, to: S) -> bool {
        self.transitions.contains(&(from, to))
    }

    /// Iterate over declared edges in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (S, S)> + '_ {
        self.transitions.iter().copied()
    }

    /// Check if the initial state has been set.
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    fn ensure_initialized(&self, what: &'static str) -> StateResult<()> {
        if self.active.is_none() {
            return Err(StateError::PreconditionViolation(what));
        }
        Ok(())
    }
}

impl<R, S> Default for StatefulObjectManager<R, S>
where
    S: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
