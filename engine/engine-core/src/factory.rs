//! Deferred construction of simulator instances
//!
//! A [`Factory`] captures a constructor together with its arguments and
//! builds a brand-new instance on every [`Factory::create`] call. Factories
//! are cheap to clone and can be moved into worker threads, so each
//! self-play worker owns its own simulator without any shared registry.

use std::fmt;
use std::sync::Arc;

type BuildFn<S> = dyn Fn() -> S + Send + Sync;

/// Callable that spawns independent instances of `S`
///
/// # Example
///
/// ```rust
/// use engine_core::factory::Factory;
///
/// #[derive(Debug, PartialEq)]
/// struct Engine {
///     threshold: usize,
/// }
///
/// let factory = Factory::new(|threshold| Engine { threshold }, 64);
/// assert_eq!(factory.create(), Engine { threshold: 64 });
/// ```
pub struct Factory<S> {
    build: Arc<BuildFn<S>>,
}

impl<S: 'static> Factory<S> {
    /// Capture `ctor` and the arguments it is invoked with.
    ///
    /// `args` is cloned for every instance, so nothing is shared between the
    /// instances a factory produces.
    pub fn new<A, F>(ctor: F, args: A) -> Self
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A) -> S + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(move || ctor(args.clone())),
        }
    }

    /// Wrap an argument-free constructor
    pub fn from_fn<F>(build: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
        }
    }

    /// Build a fresh instance
    pub fn create(&self) -> S {
        (self.build)()
    }

    /// Build `count` fresh instances, e.g. one per worker
    pub fn create_many(&self, count: usize) -> Vec<S> {
        (0..count).map(|_| self.create()).collect()
    }

    /// Post-process every instance this factory builds
    ///
    /// Mostly used to erase the concrete type:
    /// `factory.map(|sim| Box::new(sim) as Box<dyn Simulator>)`.
    pub fn map<T, F>(self, f: F) -> Factory<T>
    where
        T: 'static,
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        let build = self.build;
        Factory {
            build: Arc::new(move || f(build())),
        }
    }
}

impl<S> Clone for Factory<S> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
        }
    }
}

impl<S> fmt::Debug for Factory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("output", &std::any::type_name::<S>())
            .finish()
    }
}
